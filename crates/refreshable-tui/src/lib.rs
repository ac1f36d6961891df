pub mod app;
pub mod event;
pub mod host;
pub mod indicator;
pub mod input;
pub mod page;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
