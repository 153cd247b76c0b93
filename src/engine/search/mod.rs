use std::time::Duration;

use crate::config::{DEFAULT_PRECISION, DEFAULT_THINK_TIME};

use self::memo::MemoMode;

pub mod alpha_beta;
pub mod memo;
pub mod minimax;


#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchParams {
    pub max_depth: u32,
    pub max_time: Duration,
    pub compare_precision: f32,
    pub memo_mode: MemoMode,
}

impl SearchParams {
    pub fn new(max_depth: u32) -> Self {
        return Self {
            max_depth: max_depth,
            max_time: DEFAULT_THINK_TIME,
            compare_precision: DEFAULT_PRECISION,
            memo_mode: MemoMode::default(),
        }
    }

    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = max_time;
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
}


#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub evaluations: u64,
    pub cache_hits: u64,
    pub cutoffs: u64,
    pub peak_live_nodes: usize,
}


#[derive(Clone, Debug)]
pub struct SearchReport<A> {
    /// `None` when the root itself was a leaf (terminal, no actions, or a
    /// zero depth limit).
    pub action: Option<A>,
    pub value: f32,
    pub depth: u32,
    pub stats: SearchStats,
    pub elapsed: Duration,
}
