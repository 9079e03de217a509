use carplay_music::{
    Catalog, PlayerHandle, UiState,
    bridge::RemoteCommand,
    catalog::{StaticCatalogSource, Track},
    key_handler::{Action, Director, handle_key_event},
    now_playing::{DesktopControlSurface, NowPlayingBoard},
    player::{Observer, SilentTransport, Transport},
    surfaces::{CarSurface, CarTemplate, ListSurface, SurfaceModel},
    ui_state::Pane,
};
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    widgets::BorderType,
};
use std::{
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

fn spawn() -> (PlayerHandle, Arc<Mutex<NowPlayingBoard>>) {
    let tracks = [
        ("Europe Travel", "Cesar"),
        ("Forest Lullaby", "Amanda"),
        ("Wanderer's life", "Jakaya"),
        ("Dark world", "Renee"),
        ("Snowflakes Pattern", "Pietro Schellino"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (title, author))| {
        Track::new(title, author, format!("{i}.mp3"), format!("author{}.png", i + 1))
    })
    .collect();

    let catalog = Arc::new(Catalog::load(&StaticCatalogSource::new(tracks)).unwrap());
    let board = NowPlayingBoard::shared();

    let player = PlayerHandle::spawn(
        catalog,
        || Ok(Box::new(SilentTransport::default()) as Box<dyn Transport>),
        Box::new(DesktopControlSurface::new(Arc::clone(&board))),
    )
    .unwrap();

    (player, board)
}

fn playing(index: usize) -> SurfaceModel {
    SurfaceModel {
        selected: Some(index),
        in_play: Some(index),
        last_in_play: Some(index),
    }
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for coordinator");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn list_tap_plays_then_toggles() {
    let (player, _board) = spawn();
    let mut list = ListSurface::attach(player.clone()).unwrap();

    list.tap(1).unwrap();
    assert_eq!(*list.model(), playing(1));
    assert!(!list.sync(), "the tap already caught up");

    list.tap(1).unwrap();
    assert_eq!(list.model().selected, Some(1));
    assert_eq!(list.model().in_play, None);
    assert!(!player.is_playing());
}

#[test]
fn car_tap_shows_now_playing_once() {
    let (player, _board) = spawn();
    let mut car = CarSurface::attach(player.clone()).unwrap();

    assert_eq!(car.items().len(), 5);
    assert_eq!(car.items()[3].text, "Dark world");
    assert_eq!(car.items()[3].detail_text, "Renee");
    assert_eq!(car.top(), CarTemplate::List);

    car.tap(0).unwrap();
    car.tap(2).unwrap();
    assert_eq!(car.top(), CarTemplate::NowPlaying);
    assert_eq!(car.depth(), 2);

    player.sync().unwrap();
    assert_eq!(player.current_index(), Some(2));

    assert!(car.back());
    assert_eq!(car.top(), CarTemplate::List);
    assert!(!car.back());
}

#[test]
fn surfaces_converge_on_the_same_track() {
    let (player, _board) = spawn();
    let mut list = ListSurface::attach(player.clone()).unwrap();
    let mut car = CarSurface::attach(player.clone()).unwrap();

    list.tap(3).unwrap();
    player.sync().unwrap();
    assert!(car.sync());
    assert_eq!(*car.model(), playing(3));

    car.tap(1).unwrap();
    player.sync().unwrap();
    list.sync();
    car.sync();

    assert_eq!(*list.model(), playing(1));
    assert_eq!(*car.model(), playing(1));
}

#[test]
fn remote_resume_after_stop_restores_both_surfaces() {
    let (player, _board) = spawn();
    let mut list = ListSurface::attach(player.clone()).unwrap();
    let mut car = CarSurface::attach(player.clone()).unwrap();

    list.tap(2).unwrap();
    player.stop().unwrap();
    player.sync().unwrap();
    list.sync();
    car.sync();

    let stopped = SurfaceModel {
        selected: None,
        in_play: None,
        last_in_play: Some(2),
    };
    assert_eq!(*list.model(), stopped);
    assert_eq!(*car.model(), stopped);

    player.remote().send(RemoteCommand::Play).unwrap();
    wait_until(|| player.is_playing());
    player.sync().unwrap();
    list.sync();
    car.sync();

    assert_eq!(*list.model(), playing(2));
    assert_eq!(*car.model(), playing(2));
}

struct SlowObserver;

impl Observer for SlowObserver {
    fn on_full_reset(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_reset_to_index(&mut self, _index: usize) -> anyhow::Result<()> {
        thread::sleep(Duration::from_millis(20));
        Ok(())
    }

    fn on_resume_to_last(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn list_tap_after_a_play_it_has_not_seen_yet() {
    let (player, _board) = spawn();
    player.subscribe(Box::new(SlowObserver)).unwrap();
    let mut list = ListSurface::attach(player.clone()).unwrap();

    player.play(0).unwrap();
    list.sync();

    // The list still believes track 0 is selected, so it expects a toggle
    player.play(2).unwrap();
    list.tap(0).unwrap();
    player.sync().unwrap();
    list.sync();

    assert_eq!(player.selected_index(), Some(0));
    assert_eq!(*list.model(), playing(0));
}

#[test]
fn racing_surfaces_settle_on_the_session() {
    let (player, _board) = spawn();
    let mut list = ListSurface::attach(player.clone()).unwrap();

    let car_player = player.clone();
    let car_thread = thread::spawn(move || {
        let mut car = CarSurface::attach(car_player).unwrap();
        for round in 0..40 {
            car.tap(round % 5).unwrap();
            car.sync();
        }
        car
    });

    for round in 0..40 {
        list.tap((round * 3) % 5).unwrap();
        list.sync();
    }

    let mut car = car_thread.join().unwrap();
    player.sync().unwrap();
    list.sync();
    car.sync();

    let session = player.session();
    for model in [list.model(), car.model()] {
        assert_eq!(model.selected, session.selected);
        assert_eq!(model.in_play, session.playing);
    }
}

#[test]
fn detached_surface_stops_hearing() {
    let (player, _board) = spawn();
    let mut list = ListSurface::attach(player.clone()).unwrap();

    list.detach().unwrap();
    player.play(4).unwrap();
    player.sync().unwrap();

    assert!(!list.sync());
    assert_eq!(list.model().in_play, None);
}

#[test]
fn late_surface_starts_from_current_session() {
    let (player, _board) = spawn();
    player.play(4).unwrap();
    player.sync().unwrap();

    let list = ListSurface::attach(player.clone()).unwrap();
    assert_eq!(*list.model(), playing(4));
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn keys_map_to_actions() {
    let (player, board) = spawn();
    let mut ui = UiState::new(player, board).unwrap();

    assert_eq!(handle_key_event(key(KeyCode::Enter), &ui), Some(Action::Tap));
    assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &ui), Some(Action::TogglePause));
    assert_eq!(handle_key_event(key(KeyCode::Char('q')), &ui), Some(Action::QUIT));
    assert_eq!(
        handle_key_event(key(KeyCode::Down), &ui),
        Some(Action::Scroll(Director::Down(1)))
    );
    assert_eq!(
        handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &ui),
        Some(Action::QUIT)
    );

    ui.set_error(anyhow::anyhow!("File not found"));
    assert_eq!(ui.get_error().map(|n| n.headline), Some("Error"));
    assert_eq!(handle_key_event(key(KeyCode::Enter), &ui), Some(Action::ClearError));
    assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &ui), None);
}

#[test]
fn media_buttons_toggle_what_the_phone_started() {
    let (player, board) = spawn();
    let mut ui = UiState::new(player.clone(), board).unwrap();

    ui.scroll_down(2);
    ui.tap().unwrap();
    player.sync().unwrap();
    assert_eq!(player.current_index(), Some(2));

    ui.press(RemoteCommand::TogglePlayPause).unwrap();
    wait_until(|| !player.is_playing());
    assert_eq!(player.selected_index(), Some(2));

    ui.press(RemoteCommand::TogglePlayPause).unwrap();
    wait_until(|| player.is_playing());

    let info = ui.now_playing().unwrap();
    assert_eq!(info.title.as_deref(), Some("Wanderer's life"));

    ui.detach().unwrap();
    player.shutdown().unwrap();
}

#[test]
fn failed_taps_explain_themselves() {
    let (player, board) = spawn();
    let mut ui = UiState::new(player.clone(), board).unwrap();

    player.shutdown().unwrap();
    let e = ui.tap().unwrap_err();
    ui.set_error(e.into());

    let notice = ui.get_error().unwrap();
    assert_eq!(notice.headline, "Playback stopped");
    assert_eq!(notice.detail, "Playback coordinator is no longer running");

    ui.clear_error();
    assert!(ui.get_error().is_none());
}

#[test]
fn focus_dims_the_other_pane() {
    let (player, board) = spawn();
    let mut ui = UiState::new(player, board).unwrap();

    let phone = ui.get_theme(Pane::Phone);
    let car = ui.get_theme(Pane::Car);
    assert_ne!(phone.border, car.border);
    assert_eq!(phone.border_type, BorderType::Rounded);
    assert_eq!(car.border_type, BorderType::Thick);

    ui.switch_pane();
    assert_eq!(ui.get_theme(Pane::Car).border, phone.border);
    assert_eq!(ui.get_theme(Pane::Phone).border, car.border);
}
