use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with a map; the game never starts when one of these is hit.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read map {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("map has no pacman start ('c')")]
    MissingPacman,
}
