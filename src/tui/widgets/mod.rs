mod buffer_line;
mod car_screen;
mod error;
mod now_playing_bar;
mod track_list;

pub use buffer_line::BufferLine;
pub use car_screen::CarScreen;
pub use error::ErrorMsg;
pub use now_playing_bar::NowPlayingBar;
pub use track_list::TrackList;

const PLAY_ICON: &str = "▶";
const PAUSE_ICON: &str = "󰏤";

/// Row affordance: pause on the row in play, play on a paused selection.
fn status_icon(
    row: usize,
    selected: Option<usize>,
    in_play: Option<usize>,
) -> &'static str {
    match (in_play == Some(row), selected == Some(row)) {
        (true, _) => PAUSE_ICON,
        (false, true) => PLAY_ICON,
        _ => "",
    }
}
