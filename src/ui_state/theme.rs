use super::{Pane, UiState};
use ratatui::{
    style::Color,
    widgets::{BorderType, Borders},
};

const SOFT_WHITE: Color = Color::Rgb(210, 210, 210);
const MID_GRAY: Color = Color::Rgb(100, 100, 100);
const SLATE: Color = Color::Rgb(50, 50, 50);
const PANEL: Color = Color::Rgb(25, 25, 25);
const PANEL_DIM: Color = Color::Rgb(10, 10, 10);
const CORAL: Color = Color::Rgb(255, 70, 70);
const CORAL_DIM: Color = Color::Rgb(180, 30, 30);
const GOLD: Color = Color::Rgb(220, 220, 100);
pub const GOLD_DIM: Color = Color::Rgb(130, 130, 60);

/// Colours for one pane at one focus level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTheme {
    pub bg_panel: Color,
    pub border: Color,
    pub text_focused: Color,
    pub text_secondary: Color,
    pub text_faded: Color,
    pub text_highlighted: Color,

    pub border_display: Borders,
    pub border_type: BorderType,
}

pub(crate) struct Theme {
    pub backdrop: Color,
    pub focused: DisplayTheme,
    pub unfocused: DisplayTheme,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            backdrop: PANEL,
            focused: DisplayTheme {
                bg_panel: PANEL,
                border: GOLD,
                text_focused: SOFT_WHITE,
                text_secondary: CORAL,
                text_faded: MID_GRAY,
                text_highlighted: GOLD,
                border_display: Borders::ALL,
                border_type: BorderType::Rounded,
            },
            unfocused: DisplayTheme {
                bg_panel: PANEL_DIM,
                border: SLATE,
                text_focused: MID_GRAY,
                text_secondary: CORAL_DIM,
                text_faded: MID_GRAY,
                text_highlighted: GOLD_DIM,
                border_display: Borders::ALL,
                border_type: BorderType::Rounded,
            },
        }
    }
}

impl UiState {
    /// Colours for a surface, dimmed unless it has keyboard focus. The head
    /// unit gets a heavier frame than the phone.
    pub fn get_theme(&self, pane: Pane) -> DisplayTheme {
        let mut theme = match pane == self.get_pane() {
            true => self.theme.focused,
            false => self.theme.unfocused,
        };

        if pane == Pane::Car {
            theme.border_type = BorderType::Thick;
        }
        theme
    }

    /// Colours for chrome that belongs to no surface.
    pub fn chrome(&self) -> DisplayTheme {
        self.theme.unfocused
    }

    pub fn backdrop(&self) -> Color {
        self.theme.backdrop
    }
}
