use crate::{
    Catalog, PlayerHandle, UiState,
    bridge::RemoteCommand,
    catalog::FsCatalogSource,
    config::Config,
    key_handler::{self, Action, Director},
    now_playing::{DesktopControlSurface, NowPlayingBoard},
    overwrite_line,
    player::{RodioTransport, Transport},
    tui,
    ui_state::{Mode, Pane},
};
use anyhow::Result;
use ratatui::crossterm::event::{Event, KeyEventKind};
use std::{sync::Arc, time::Duration};

pub struct CarPlayMusic {
    ui: UiState,
    player: PlayerHandle,
}

impl CarPlayMusic {
    pub fn new(config: &Config) -> Result<Self> {
        let source = FsCatalogSource::new(&config.assets_dir, config.tracks.clone());
        let catalog = Arc::new(Catalog::load(&source)?);

        let board = NowPlayingBoard::shared();
        let control_surface = DesktopControlSurface::new(Arc::clone(&board));

        let player = PlayerHandle::spawn(
            catalog,
            || Ok(Box::new(RodioTransport::new()?) as Box<dyn Transport>),
            Box::new(control_surface),
        )?;

        let ui = UiState::new(player.clone(), board)?;

        Ok(CarPlayMusic { ui, player })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        // MAIN ROUTINE
        loop {
            self.ui.sync();

            match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(key, &self.ui) {
                        if let Err(e) = self.handle_action(action) {
                            self.ui.set_error(e);
                        }
                    }
                }
                _ => (),
            }

            terminal.draw(|f| tui::render(f, &mut self.ui))?;

            if self.ui.get_mode() == Mode::Quit {
                break;
            }
        }

        ratatui::restore();
        overwrite_line("Shutting down...")?;

        self.ui.detach()?;
        self.player.shutdown()?;

        overwrite_line("Drive safe!\n\n")?;

        Ok(())
    }
}

impl CarPlayMusic {
    #[rustfmt::skip]
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Touch
            Action::Tap             => self.ui.tap()?,
            Action::Back            => self.back(),
            Action::Scroll(Director::Up(n))   => self.ui.scroll_up(n),
            Action::Scroll(Director::Down(n)) => self.ui.scroll_down(n),

            // Media controls
            Action::TogglePause     => self.ui.press(RemoteCommand::TogglePlayPause)?,
            Action::Stop            => self.player.stop()?,
            Action::SeekForward(s)  => self.ui.scrub(true, Duration::from_secs(s))?,
            Action::SeekBack(s)     => self.ui.scrub(false, Duration::from_secs(s))?,

            // Application
            Action::SwitchPane      => self.ui.switch_pane(),
            Action::ClearError      => self.ui.clear_error(),
            Action::QUIT            => self.ui.set_mode(Mode::Quit),
        }
        Ok(())
    }

    fn back(&mut self) {
        if self.ui.get_pane() == Pane::Car {
            self.ui.car.back();
        }
    }
}
