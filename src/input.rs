use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    NewGame,
    Quit,
}

/// Maps a terminal event to a command. Releases and unknown keys give `None`.
pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => command_for_key(key),
            _ => None,
        },
        _ => None,
    }
}

fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Command::Move(Dir::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Command::Move(Dir::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Command::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Command::Move(Dir::Left),
        KeyCode::Char('n') => Command::NewGame,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}
