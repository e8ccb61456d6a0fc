//! Sampling decorator for high-volume scenarios
//!
//! Wraps an inner core and lets only a configurable fraction of accepted
//! entries through `check`, so callers stop before building fields for
//! events that would be dropped anyway. Levels listed in `always_sample`
//! bypass the draw entirely.

use super::chain::Core;
use super::entry::Entry;
use super::error::Result;
use super::field::Field;
use super::level::Level;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Configuration for the sampling decorator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Sample rate between 0.0 and 1.0; 1.0 keeps everything.
    pub rate: f64,

    /// Levels that are never sampled away.
    pub always_sample: Vec<Level>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            always_sample: vec![Level::Error],
        }
    }
}

impl SamplingConfig {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_always_sample(mut self, levels: Vec<Level>) -> Self {
        self.always_sample = levels;
        self
    }
}

/// Pass/drop counters, shared across `with`-derived samplers.
#[derive(Debug, Default)]
pub struct SamplerMetrics {
    sampled: AtomicU64,
    dropped: AtomicU64,
}

impl SamplerMetrics {
    pub fn sampled_count(&self) -> u64 {
        self.sampled.load(Ordering::Relaxed)
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Core decorator applying the sampling policy at `check` time.
pub struct SamplerCore {
    inner: Arc<dyn Core>,
    config: SamplingConfig,
    metrics: Arc<SamplerMetrics>,
}

impl SamplerCore {
    pub fn new(inner: Arc<dyn Core>, config: SamplingConfig) -> Self {
        Self {
            inner,
            config,
            metrics: Arc::new(SamplerMetrics::default()),
        }
    }

    pub fn metrics(&self) -> Arc<SamplerMetrics> {
        Arc::clone(&self.metrics)
    }

    fn should_sample(&self, level: Level) -> bool {
        if self.config.always_sample.contains(&level) {
            self.metrics.sampled.fetch_add(1, Ordering::Relaxed);
            return true;
        }
        if self.config.rate >= 1.0 {
            self.metrics.sampled.fetch_add(1, Ordering::Relaxed);
            return true;
        }
        if self.config.rate <= 0.0 {
            self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        let sampled = rand::thread_rng().gen::<f64>() < self.config.rate;
        if sampled {
            self.metrics.sampled.fetch_add(1, Ordering::Relaxed);
        } else {
            self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
        }
        sampled
    }
}

impl Core for SamplerCore {
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core> {
        Arc::new(SamplerCore {
            inner: self.inner.with(fields),
            config: self.config.clone(),
            metrics: Arc::clone(&self.metrics),
        })
    }

    fn check(&self, entry: &Entry) -> bool {
        if !self.inner.check(entry) {
            return false;
        }
        self.should_sample(entry.level)
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()> {
        self.inner.write(entry, fields)
    }

    fn sync(&self) -> Result<()> {
        self.inner.sync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::ObserverCore;

    fn sampler(rate: f64) -> SamplerCore {
        SamplerCore::new(Arc::new(ObserverCore::new(Level::Debug)), SamplingConfig::new(rate))
    }

    #[test]
    fn test_rate_one_keeps_everything() {
        let core = sampler(1.0);
        for _ in 0..100 {
            assert!(core.check(&Entry::new("", Level::Info, "m")));
        }
        assert_eq!(core.metrics().sampled_count(), 100);
    }

    #[test]
    fn test_rate_zero_drops_non_critical() {
        let core = sampler(0.0);
        for _ in 0..20 {
            assert!(!core.check(&Entry::new("", Level::Info, "m")));
        }
        assert_eq!(core.metrics().dropped_count(), 20);
    }

    #[test]
    fn test_always_sample_bypasses_rate() {
        let core = sampler(0.0);
        for _ in 0..10 {
            assert!(core.check(&Entry::new("", Level::Error, "boom")));
        }
        assert_eq!(core.metrics().sampled_count(), 10);
    }

    #[test]
    fn test_inner_level_gate_wins() {
        let core = SamplerCore::new(
            Arc::new(ObserverCore::new(Level::Warn)),
            SamplingConfig::new(1.0),
        );
        assert!(!core.check(&Entry::new("", Level::Debug, "quiet")));
        // Entries the inner core rejects are not counted as sampled.
        assert_eq!(core.metrics().sampled_count(), 0);
    }

    #[test]
    fn test_statistical_rate() {
        let core = sampler(0.5);
        let mut passed = 0;
        for _ in 0..10_000 {
            if core.check(&Entry::new("", Level::Info, "m")) {
                passed += 1;
            }
        }
        let rate = passed as f64 / 10_000.0;
        assert!(
            (0.45..=0.55).contains(&rate),
            "expected ~50% pass rate, got {}%",
            rate * 100.0
        );
    }

    #[test]
    fn test_config_rate_clamped() {
        assert_eq!(SamplingConfig::new(1.5).rate, 1.0);
        assert_eq!(SamplingConfig::new(-0.5).rate, 0.0);
    }
}
