mod app;
pub use app::CarPlayMusic;
