//! Zoom easing state machine.
//!
//! Wheel input sets a *desired* scale; every animation tick moves the
//! *current* scale a fixed fraction of the remaining distance.
//!
//! ```text
//! zoom(delta):  desired = clamp(current * (1 - sign(delta) * step), min, max)
//!
//! tick():       |current - desired| / current > threshold ?
//!                   current += (desired - current) * ease   -> Some(transform)
//!                 : None
//! ```
//!
//! Exponential approach: from 1 to 100 the controller settles in about 230
//! ticks at the default ease fraction.

use lifeview_shared::{TransformSink, ViewTransform, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};

/// Zoom tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Scale at startup.
    pub initial_scale: f32,
    /// Lower scale bound.
    pub min_scale: f32,
    /// Upper scale bound.
    pub max_scale: f32,
    /// Relative change per wheel notch.
    pub step: f32,
    /// Fraction of the remaining distance covered per tick.
    pub ease: f32,
    /// Relative distance below which the controller is settled.
    pub settle_threshold: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial_scale: DEFAULT_SCALE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            step: 0.5,
            ease: 1.0 / 50.0,
            settle_threshold: 0.01,
        }
    }
}

/// Eases the view scale toward the scale the user asked for.
#[derive(Debug, Clone)]
pub struct ZoomController {
    config: ZoomConfig,
    current: f32,
    desired: f32,
    x_offset: f32,
    y_offset: f32,
}

impl ZoomController {
    /// Creates a controller settled at the configured initial scale.
    ///
    /// The configured bounds are narrowed to `[MIN_SCALE, MAX_SCALE]`.
    #[must_use]
    pub fn new(mut config: ZoomConfig) -> Self {
        config.min_scale = config.min_scale.clamp(MIN_SCALE, MAX_SCALE);
        config.max_scale = config.max_scale.clamp(config.min_scale, MAX_SCALE);
        let scale = config
            .initial_scale
            .clamp(config.min_scale, config.max_scale);
        Self {
            config,
            current: scale,
            desired: scale,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }

    /// Registers a wheel movement. Only the sign of `delta` matters.
    ///
    /// Positive deltas zoom out, negative deltas zoom in. Zero and NaN are
    /// ignored.
    pub fn zoom(&mut self, delta: f32) {
        if delta == 0.0 || delta.is_nan() {
            return;
        }
        let target = self.current * (1.0 - delta.signum() * self.config.step);
        self.desired = target.clamp(self.config.min_scale, self.config.max_scale);
    }

    /// Advances the easing by one tick.
    ///
    /// Returns the new transform if the scale changed.
    pub fn tick(&mut self) -> Option<ViewTransform> {
        if self.is_settled() {
            return None;
        }
        self.current += (self.desired - self.current) * self.config.ease;
        Some(self.transform())
    }

    /// Ticks and pushes the transform into `sink` if it changed.
    ///
    /// Returns true if the sink was updated.
    pub fn tick_into<S: TransformSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        match self.tick() {
            Some(transform) => {
                sink.set_transform(transform);
                true
            }
            None => false,
        }
    }

    /// Sets the pan offset. Does not affect easing.
    pub fn set_offset(&mut self, x_offset: f32, y_offset: f32) {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
    }

    /// Returns true if the current scale is within the settle threshold.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        (self.current - self.desired).abs() / self.current <= self.config.settle_threshold
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.x_offset, self.y_offset, self.current)
    }

    /// Scale currently applied.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Scale being eased toward.
    #[inline]
    #[must_use]
    pub const fn desired(&self) -> f32 {
        self.desired
    }

    /// Returns the tuning in use.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ZoomConfig {
        &self.config
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
