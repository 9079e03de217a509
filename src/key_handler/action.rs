use crate::{REFRESH_RATE, key_handler::*, ui_state::UiState};
use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};

use KeyCode::*;

pub fn handle_key_event(key_event: KeyEvent, state: &UiState) -> Option<Action> {
    if state.get_error().is_some() {
        return match (key_event.modifiers, key_event.code) {
            (C, Char('c')) => Some(Action::QUIT),
            (_, Esc) | (_, Enter) => Some(Action::ClearError),
            _ => None,
        };
    }

    match (key_event.modifiers, key_event.code) {
        (C, Char('c')) | (X, Char('q')) => Some(Action::QUIT),
        (X, Tab) => Some(Action::SwitchPane),

        // TOUCH
        (X, Enter) => Some(Action::Tap),
        (X, Backspace) | (X, Esc) => Some(Action::Back),

        // MEDIA CONTROLS
        (X, Char(' ')) => Some(Action::TogglePause),
        (X, Char('s')) => Some(Action::Stop),

        (X, Char('>')) | (S, Char('>')) | (X, Char('.')) => {
            Some(Action::SeekForward(SEEK_SMALL))
        }
        (X, Char('<')) | (S, Char('<')) | (X, Char(',')) => Some(Action::SeekBack(SEEK_SMALL)),
        (S, Char('N')) => Some(Action::SeekForward(SEEK_LARGE)),
        (S, Char('P')) => Some(Action::SeekBack(SEEK_LARGE)),

        // SCROLLING
        (X, Char('j')) | (X, Down) => Some(Action::Scroll(Director::Down(1))),
        (X, Char('k')) | (X, Up) => Some(Action::Scroll(Director::Up(1))),
        (X, Char('d')) => Some(Action::Scroll(Director::Down(SCROLL_MID))),
        (X, Char('u')) => Some(Action::Scroll(Director::Up(SCROLL_MID))),

        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(REFRESH_RATE)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}
