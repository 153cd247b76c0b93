use std::{thread, time::Duration};

use crate::{engine::search::{memo::MemoMode, SearchParams}, util::errors::ValueError};


pub const DEFAULT_DEPTH: u32 = 10;
/// Iterative deepening never searches deeper than this.
pub const MAX_DEPTH: u32 = 50;
pub const DEFAULT_THINK_TIME: Duration = Duration::from_millis(10);
/// Tolerance used when matching a child's value against the root's.
pub const DEFAULT_PRECISION: f32 = 0.001;
/// How long the scheduler keeps collecting in-flight searches once it has
/// stopped launching new ones and the deadline has passed.
pub const JOIN_GRACE: Duration = Duration::from_millis(50);


lazy_static! {
    pub static ref HARDWARE_THREADS: usize = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
}


#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub min_depth: u32,
    pub max_depth: u32,
    pub think_time: Duration,
    pub compare_precision: f32,
    pub memo_mode: MemoMode,
    /// `None` uses every hardware thread.
    pub threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_depth: DEFAULT_DEPTH,
            max_depth: MAX_DEPTH,
            think_time: DEFAULT_THINK_TIME,
            compare_precision: DEFAULT_PRECISION,
            memo_mode: MemoMode::default(),
            threads: None,
        }
    }
}

impl SearchConfig {
    pub fn with_min_depth(mut self, min_depth: u32) -> Self {
        self.min_depth = min_depth;
        return self;
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        return self;
    }

    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        return self;
    }

    pub fn with_precision(mut self, compare_precision: f32) -> Self {
        self.compare_precision = compare_precision;
        return self;
    }

    pub fn with_memo_mode(mut self, memo_mode: MemoMode) -> Self {
        self.memo_mode = memo_mode;
        return self;
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        return self;
    }

    pub fn validate(&self) -> Result<(), ValueError> {
        if self.min_depth == 0 {
            return Err(ValueError::new("minimum search depth must be at least 1"));
        }
        if self.min_depth > self.max_depth {
            return Err(ValueError::new(&format!("minimum depth {} exceeds the depth ceiling {}", self.min_depth, self.max_depth)));
        }
        if !self.compare_precision.is_finite() || self.compare_precision < 0.0 {
            return Err(ValueError::new("compare precision must be a non-negative number"));
        }
        if self.threads == Some(0) {
            return Err(ValueError::new("at least one search thread is required"));
        }
        return Ok(());
    }

    /// Concurrent searches allowed, never more than the hardware offers.
    pub fn parallelism(&self) -> usize {
        return self.threads.unwrap_or(*HARDWARE_THREADS).clamp(1, *HARDWARE_THREADS);
    }

    pub fn params_for_depth(&self, depth: u32) -> SearchParams {
        return SearchParams::new(depth)
            .with_max_time(self.think_time)
            .with_precision(self.compare_precision)
            .with_memo_mode(self.memo_mode);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_depth, 10);
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.think_time, Duration::from_millis(10));
    }

    #[test]
    fn rejects_inverted_depths_and_zero_threads() {
        assert!(SearchConfig::default().with_min_depth(0).validate().is_err());
        assert!(SearchConfig::default().with_min_depth(8).with_max_depth(4).validate().is_err());
        assert!(SearchConfig::default().with_threads(Some(0)).validate().is_err());
        assert!(SearchConfig::default().with_precision(f32::NAN).validate().is_err());
    }

    #[test]
    fn parallelism_is_capped_by_hardware() {
        let config = SearchConfig::default().with_threads(Some(usize::MAX));
        assert_eq!(config.parallelism(), *HARDWARE_THREADS);
        assert_eq!(SearchConfig::default().with_threads(Some(1)).parallelism(), 1);
    }

    #[test]
    fn depth_params_share_time_and_precision() {
        let config = SearchConfig::default().with_think_time(Duration::from_secs(2)).with_memo_mode(MemoMode::Strict);
        let params = config.params_for_depth(7);
        assert_eq!(params.max_depth, 7);
        assert_eq!(params.max_time, Duration::from_secs(2));
        assert_eq!(params.memo_mode, MemoMode::Strict);
    }
}
