pub mod animation;
pub mod config;
pub mod error;
pub mod gesture;
pub mod host;
pub mod scheduler;
pub mod settings;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AppConfig, EasingType};
pub use error::{Error, Result};
pub use gesture::{GestureState, HideKind, PullToRefreshController};
pub use host::{LoadingIndicator, OnRefreshListener, ScrollEvent, ScrollHost};
pub use scheduler::{ManualScheduler, Scheduler, TimerEvent, TimerHandle, TokioScheduler};
pub use settings::{RefreshSettings, RefreshSettingsBuilder};
pub use view::RefreshableView;
