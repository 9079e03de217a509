use super::{AppLayout, BufferLine, CarScreen, ErrorMsg, NowPlayingBar, TrackList};
use crate::UiState;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    widgets::{Block, Clear, StatefulWidget, Widget},
};

pub fn render(f: &mut Frame, state: &mut UiState) {
    let layout = AppLayout::new(f.area());

    Block::new()
        .bg(state.backdrop())
        .render(f.area(), f.buffer_mut());

    TrackList.render(layout.phone, f.buffer_mut(), state);
    CarScreen.render(layout.car, f.buffer_mut(), state);
    NowPlayingBar.render(layout.now_playing, f.buffer_mut(), state);
    BufferLine.render(layout.buffer_line, f.buffer_mut(), state);

    if state.get_error().is_some() {
        let popup_rect = centered_rect(40, 30, f.area());
        Clear.render(popup_rect, f.buffer_mut());
        ErrorMsg.render(popup_rect, f.buffer_mut(), state);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
