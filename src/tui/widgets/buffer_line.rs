use crate::ui_state::{Pane, UiState};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Stylize,
    text::Line,
    widgets::{StatefulWidget, Widget},
};

const HINTS: &str = "<Enter> tap  <Space> play/pause  <s> stop  <,/.> scrub  <Tab> pane  <q> quit";

pub struct BufferLine;

impl StatefulWidget for BufferLine {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let theme = state.get_theme(state.get_pane());

        let focus = match state.get_pane() {
            Pane::Phone => "  phone",
            Pane::Car => "  car",
        };

        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(10), Constraint::Fill(1)])
            .areas(area);

        Line::from(focus).fg(theme.text_highlighted).render(left, buf);
        Line::from(HINTS)
            .fg(theme.text_faded)
            .right_aligned()
            .render(right, buf);
    }
}
