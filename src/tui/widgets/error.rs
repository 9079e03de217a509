use crate::ui_state::UiState;
use ratatui::{
    style::{Color, Stylize},
    text::Line,
    widgets::{Block, BorderType, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};

const ALERT_BG: Color = Color::Rgb(120, 20, 20);

/// Popup for the last failed action, headed by what kind of failure it was.
pub struct ErrorMsg;
impl StatefulWidget for ErrorMsg {
    type State = UiState;
    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let Some(notice) = state.get_error() else {
            return;
        };

        let block = Block::bordered()
            .border_type(BorderType::Thick)
            .title(Line::from(format!(" {} ", notice.headline)).bold().centered())
            .title_bottom(Line::from(" <Esc> dismiss ").centered())
            .padding(Padding::symmetric(4, 1));

        Paragraph::new(notice.detail.as_str())
            .wrap(Wrap { trim: true })
            .centered()
            .block(block)
            .fg(Color::White)
            .bg(ALERT_BG)
            .render(area, buf);
    }
}
