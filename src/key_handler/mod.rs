mod action;

pub use action::{handle_key_event, next_event};

use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

const SEEK_SMALL: u64 = 10;
const SEEK_LARGE: u64 = 30;
const SCROLL_MID: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    // Touch
    Tap,
    Back,
    Scroll(Director),

    // Media controls
    TogglePause,
    Stop,
    SeekForward(u64),
    SeekBack(u64),

    // Application
    SwitchPane,
    ClearError,
    QUIT,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Director {
    Up(usize),
    Down(usize),
}
