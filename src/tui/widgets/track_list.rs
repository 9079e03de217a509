use super::status_icon;
use crate::ui_state::{Pane, UiState};
use ratatui::{
    layout::Constraint,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Row, StatefulWidget, Table},
};

/// The phone surface: every catalog track, one row each.
pub struct TrackList;
impl StatefulWidget for TrackList {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let theme = state.get_theme(Pane::Phone);
        let catalog = state.player.catalog();
        let model = *state.list.model();

        let title = Line::from_iter([
            Span::from(" ♠ ").fg(theme.text_focused),
            Span::from("Phone").fg(theme.text_highlighted),
            Span::from(" ♠ ").fg(theme.text_focused),
            Span::from(format!("[{} Songs] ", catalog.len())).fg(theme.text_faded),
        ]);

        let rows = catalog
            .iter()
            .enumerate()
            .map(|(idx, track)| {
                let icon = status_icon(idx, model.selected, model.in_play);
                let title_style = match model.in_play == Some(idx) {
                    true => Style::new().fg(theme.text_secondary),
                    false => Style::new().fg(theme.text_focused),
                };

                Row::new([
                    Cell::from(format!("{:>2}", idx + 1)).fg(theme.text_faded),
                    Cell::from(icon).fg(theme.text_secondary),
                    Cell::from(track.title().to_string()).style(title_style),
                    Cell::from(track.author().to_string()).fg(theme.text_faded),
                ])
            })
            .collect::<Vec<Row>>();

        let widths = [
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Fill(2),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .block(
                Block::bordered()
                    .borders(theme.border_display)
                    .border_type(theme.border_type)
                    .border_style(Style::new().fg(theme.border))
                    .title(title)
                    .bg(theme.bg_panel),
            )
            .row_highlight_style(Style::new().fg(theme.text_highlighted).italic());

        StatefulWidget::render(table, area, buf, &mut state.list.cursor);
    }
}
