//! Immutable pull-to-refresh settings and their validating builder

use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::debug;

use crate::animation::{AnimationConfigExt, HideAnimation};
use crate::config::{AppConfig, DEFAULT_REFRESH_DELAY_SECS, DEFAULT_THRESHOLD_DISTANCE};
use crate::host::{LoadingIndicator, OnRefreshListener};
use crate::{Error, Result};

/// Settings bundle attached to a `RefreshableView`
///
/// Only obtainable through [`RefreshSettingsBuilder`], which guarantees that a
/// listener and an indicator are present. The listener is held weakly so the
/// view never keeps its embedding application alive.
#[derive(Clone)]
pub struct RefreshSettings {
    listener: Weak<dyn OnRefreshListener>,
    indicator: Rc<dyn LoadingIndicator>,
    threshold_distance: f64,
    refresh_delay: Duration,
    animation: HideAnimation,
}

impl RefreshSettings {
    pub fn builder() -> RefreshSettingsBuilder {
        RefreshSettingsBuilder::default()
    }

    /// The listener, if it is still alive
    pub fn listener(&self) -> Option<Rc<dyn OnRefreshListener>> {
        self.listener.upgrade()
    }

    pub fn indicator(&self) -> &Rc<dyn LoadingIndicator> {
        &self.indicator
    }

    /// Net pull distance that commits a refresh
    pub fn threshold_distance(&self) -> f64 {
        self.threshold_distance
    }

    /// Delay between release and the listener callback
    pub fn refresh_delay(&self) -> Duration {
        self.refresh_delay
    }

    pub fn animation(&self) -> &HideAnimation {
        &self.animation
    }
}

impl fmt::Debug for RefreshSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshSettings")
            .field("listener_alive", &(self.listener.strong_count() > 0))
            .field("indicator_height", &self.indicator.height())
            .field("threshold_distance", &self.threshold_distance)
            .field("refresh_delay", &self.refresh_delay)
            .field("animation", &self.animation)
            .finish()
    }
}

/// Fluent builder for [`RefreshSettings`]
pub struct RefreshSettingsBuilder {
    listener: Option<Weak<dyn OnRefreshListener>>,
    indicator: Option<Rc<dyn LoadingIndicator>>,
    threshold_distance: f64,
    refresh_delay: Duration,
    /// Seconds value that could not be turned into a `Duration`
    invalid_delay_secs: Option<f64>,
    animation: HideAnimation,
}

impl Default for RefreshSettingsBuilder {
    fn default() -> Self {
        Self {
            listener: None,
            indicator: None,
            threshold_distance: DEFAULT_THRESHOLD_DISTANCE,
            refresh_delay: Duration::from_secs_f64(DEFAULT_REFRESH_DELAY_SECS),
            invalid_delay_secs: None,
            animation: HideAnimation::default(),
        }
    }
}

impl RefreshSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the `[refresh]` and `[animation]` sections of the config file
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            threshold_distance: config.refresh.threshold_distance,
            animation: config.animation.hide_animation(),
            ..Self::default()
        }
        .refresh_delay_secs(config.refresh.refresh_delay_secs)
    }

    /// Set the refresh listener; only a weak reference is kept
    pub fn listener<L: OnRefreshListener + 'static>(mut self, listener: &Rc<L>) -> Self {
        let weak: Weak<L> = Rc::downgrade(listener);
        let weak: Weak<dyn OnRefreshListener> = weak;
        self.listener = Some(weak);
        self
    }

    pub fn indicator<I: LoadingIndicator + 'static>(mut self, indicator: Rc<I>) -> Self {
        let indicator: Rc<dyn LoadingIndicator> = indicator;
        self.indicator = Some(indicator);
        self
    }

    pub fn threshold(mut self, distance: f64) -> Self {
        self.threshold_distance = distance;
        self
    }

    pub fn refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self.invalid_delay_secs = None;
        self
    }

    /// Set the delay in seconds; negative, non-finite or out-of-range values fail the build
    pub fn refresh_delay_secs(mut self, secs: f64) -> Self {
        match Duration::try_from_secs_f64(secs) {
            Ok(delay) => self.refresh_delay(delay),
            Err(_) => {
                self.invalid_delay_secs = Some(secs);
                self
            }
        }
    }

    pub fn animation(mut self, animation: HideAnimation) -> Self {
        self.animation = animation;
        self
    }

    /// Build the settings, reporting the first missing or invalid field
    pub fn try_build(self) -> Result<RefreshSettings> {
        let listener = self
            .listener
            .filter(|listener| listener.strong_count() > 0)
            .ok_or(Error::MissingListener)?;
        let indicator = self.indicator.ok_or(Error::MissingIndicator)?;

        if !self.threshold_distance.is_finite() || self.threshold_distance <= 0.0 {
            return Err(Error::InvalidThreshold(self.threshold_distance));
        }
        if let Some(secs) = self.invalid_delay_secs {
            return Err(Error::InvalidRefreshDelay(secs));
        }

        Ok(RefreshSettings {
            listener,
            indicator,
            threshold_distance: self.threshold_distance,
            refresh_delay: self.refresh_delay,
            animation: self.animation,
        })
    }

    /// Build the settings, or `None` if a listener or indicator is missing
    pub fn build(self) -> Option<RefreshSettings> {
        match self.try_build() {
            Ok(settings) => Some(settings),
            Err(e) => {
                debug!(error = %e, "Refresh settings incomplete");
                None
            }
        }
    }
}
