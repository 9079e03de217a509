use super::{PAUSE_ICON, PLAY_ICON};
use crate::{
    DurationStyle, get_readable_duration,
    now_playing::{Capability, PlaybackStatus},
    ui_state::{GOLD_DIM, UiState},
};
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};

/// The lock-screen style media controls, fed only by published metadata.
pub struct NowPlayingBar;
impl StatefulWidget for NowPlayingBar {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let theme = state.chrome();
        let faded = theme.text_faded;
        let block = Block::bordered()
            .border_type(theme.border_type)
            .border_style(Style::new().fg(theme.border))
            .title(" Now Playing ".fg(faded));

        let headline = match state.now_playing() {
            Some(info) if info.title.is_some() => {
                let icon = match info.status {
                    PlaybackStatus::Playing => PLAY_ICON,
                    _ => PAUSE_ICON,
                };
                let elapsed = state.elapsed().unwrap_or_default();

                Line::from_iter([
                    Span::from(format!(" {icon} ")).fg(theme.text_highlighted),
                    Span::from(info.title.unwrap_or_default()).fg(theme.text_secondary),
                    Span::from(" ✧ ").fg(faded),
                    Span::from(info.author.unwrap_or_default()).fg(faded),
                    Span::from(format!(
                        "  {} ",
                        get_readable_duration(elapsed, DurationStyle::Compact)
                    ))
                    .fg(faded),
                ])
            }
            _ => Line::from(" Not Playing ").fg(faded),
        };

        let controls = [
            (Capability::Play, "play"),
            (Capability::Pause, "pause"),
            (Capability::TogglePlayPause, "toggle"),
            (Capability::ChangePlaybackPosition, "scrub"),
        ]
        .into_iter()
        .map(|(capability, name)| match state.is_enabled(capability) {
            true => Span::from(format!("[{name}] ")).fg(GOLD_DIM),
            false => Span::from(format!("[{name}] ")).fg(faded).crossed_out(),
        });

        Paragraph::new(vec![headline, Line::from_iter(controls).right_aligned()])
            .block(block)
            .render(area, buf);
    }
}
