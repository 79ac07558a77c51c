use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Quit,
    Restart,
    NextLevel,
}

/// Reads at most one pending terminal event without blocking.
pub fn poll_command() -> io::Result<Option<Command>> {
    if !event::poll(Duration::from_millis(0))? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(command_for(key)),
        _ => Ok(None),
    }
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        _ => return None,
    }
    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Char(' ') => Command::NextLevel,
        KeyCode::Up | KeyCode::Char('k') => Command::Move(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(Dir::Right),
        _ => return None,
    };
    Some(command)
}
