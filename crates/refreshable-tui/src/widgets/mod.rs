mod indicator;
mod page;
mod status_bar;

pub use indicator::IndicatorWidget;
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;
