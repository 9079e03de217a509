use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub phone: Rect,
    pub car: Rect,
    pub now_playing: Rect,
    pub buffer_line: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [upper_block, now_playing, buffer_line] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .areas(area);

        let [phone, _, car] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(upper_block);

        AppLayout {
            phone,
            car,
            now_playing,
            buffer_line,
        }
    }
}
