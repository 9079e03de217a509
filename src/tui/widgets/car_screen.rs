use super::{PAUSE_ICON, PLAY_ICON, status_icon};
use crate::{
    DurationStyle, get_readable_duration,
    now_playing::PlaybackStatus,
    surfaces::{CarTemplate, LIST_TITLE, SECTION_HEADER, TAB_IMAGE},
    ui_state::{Pane, UiState},
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Gauge, List, ListItem, Paragraph, StatefulWidget, Widget},
};

/// The in-car screen, showing whichever template is on top of its stack.
pub struct CarScreen;
impl StatefulWidget for CarScreen {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let theme = state.get_theme(Pane::Car);

        let block = Block::bordered()
            .borders(theme.border_display)
            .border_type(theme.border_type)
            .border_style(Style::new().fg(theme.border))
            .title(Line::from_iter([
                Span::from(format!(" {} ", TAB_IMAGE)).fg(theme.text_secondary),
                Span::from(format!("{} ", LIST_TITLE)).fg(theme.text_highlighted),
            ]))
            .bg(theme.bg_panel);

        let inner = block.inner(area);
        block.render(area, buf);

        match state.car.top() {
            CarTemplate::List => render_list(inner, buf, state),
            CarTemplate::NowPlaying => render_now_playing(inner, buf, state),
        }
    }
}

fn render_list(area: Rect, buf: &mut ratatui::prelude::Buffer, state: &mut UiState) {
    let theme = state.get_theme(Pane::Car);
    let model = *state.car.model();

    let [header, body] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

    Line::from(SECTION_HEADER)
        .fg(theme.text_faded)
        .bold()
        .render(header, buf);

    let items = state
        .car
        .items()
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let icon = status_icon(idx, model.selected, model.in_play);
            ListItem::new(Text::from_iter([
                Line::from_iter([
                    Span::from(format!("{icon:<2}")).fg(theme.text_secondary),
                    Span::from(item.text.clone()).fg(theme.text_focused),
                ]),
                Line::from(format!("  {}", item.detail_text)).fg(theme.text_faded),
            ]))
        })
        .collect::<Vec<_>>();

    let list = List::new(items).highlight_style(Style::new().fg(theme.text_highlighted).italic());
    StatefulWidget::render(list, body, buf, &mut state.car_cursor);
}

fn render_now_playing(area: Rect, buf: &mut ratatui::prelude::Buffer, state: &mut UiState) {
    let theme = state.get_theme(Pane::Car);

    let [info_area, _, gauge_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let Some(info) = state.now_playing() else {
        Paragraph::new("Not Playing")
            .centered()
            .fg(theme.text_faded)
            .render(info_area, buf);
        return;
    };

    let icon = match info.status {
        PlaybackStatus::Playing => PLAY_ICON,
        PlaybackStatus::Paused => PAUSE_ICON,
        PlaybackStatus::Stopped => "",
    };

    Paragraph::new(Text::from_iter([
        Line::from(info.title.clone().unwrap_or_default()).fg(theme.text_secondary),
        Line::from(info.author.clone().unwrap_or_default()).fg(theme.text_faded),
        Line::from(icon).fg(theme.text_focused),
    ]))
    .centered()
    .render(info_area, buf);

    let elapsed = state.elapsed().unwrap_or_default();
    let ratio = match info.duration {
        Some(d) if !d.is_zero() => (elapsed.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
        _ => 0.0,
    };
    let label = match info.duration {
        Some(d) => format!(
            "{} / {}",
            get_readable_duration(elapsed, DurationStyle::Compact),
            get_readable_duration(d, DurationStyle::Compact)
        ),
        None => get_readable_duration(elapsed, DurationStyle::Compact),
    };

    Gauge::default()
        .ratio(ratio)
        .label(label)
        .gauge_style(Style::new().fg(theme.text_highlighted))
        .render(gauge_area, buf);

    Line::from(" <Backspace> Back ")
        .fg(theme.text_faded)
        .render(hint_area, buf);
}
