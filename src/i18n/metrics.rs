//! Translation resolution metrics.
//!
//! Counts how each lookup was satisfied so tooling can tell how much of the
//! UI is really localized for the current culture.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolution counters for one translator.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Lookups answered by the current culture's variant
    exact_hits: AtomicUsize,

    /// Lookups answered by the default culture's variant
    default_fallbacks: AtomicUsize,

    /// Lookups that fell through to the literal key
    key_fallbacks: AtomicUsize,

    /// Misses newly written to the missing-translation store
    misses_recorded: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_exact_hit(&self) {
        self.exact_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_default_fallback(&self) {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_key_fallback(&self) {
        self.key_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn exact_hits(&self) -> usize {
        self.exact_hits.load(Ordering::Relaxed)
    }

    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    pub fn key_fallbacks(&self) -> usize {
        self.key_fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses_recorded(&self) -> usize {
        self.misses_recorded.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let exact = self.exact_hits();
        let defaults = self.default_fallbacks();
        let keys = self.key_fallbacks();
        let total = exact + defaults + keys;
        let coverage = if total > 0 {
            (exact as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups: total,
            exact_hits: exact,
            default_fallbacks: defaults,
            key_fallbacks: keys,
            misses_recorded: self.misses_recorded(),
            coverage,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.exact_hits.store(0, Ordering::Relaxed);
        self.default_fallbacks.store(0, Ordering::Relaxed);
        self.key_fallbacks.store(0, Ordering::Relaxed);
        self.misses_recorded.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of translation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Lookups that reached the store (blank keys are not counted)
    pub lookups: usize,

    pub exact_hits: usize,

    pub default_fallbacks: usize,

    pub key_fallbacks: usize,

    pub misses_recorded: usize,

    /// Share of lookups answered in the current culture, as a percentage (0-100)
    pub coverage: f64,
}
