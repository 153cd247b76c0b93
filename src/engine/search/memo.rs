use std::{fmt, str::FromStr};

use fxhash::FxHashMap;

use crate::util::{errors::ValueError, fingerprint::FingerprintMap};


/// How a single search run memoizes the values of positions it has seen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MemoMode {
    /// Keyed by fingerprint alone. A position reached again at a different
    /// remaining depth or in the other layer reuses the first value stored,
    /// and values cut off by pruning are stored as if they were exact. Fast,
    /// but the result may differ from a full minimax search.
    #[default]
    Lossy,
    /// Keyed by fingerprint, remaining depth and layer, and only values that
    /// fell strictly inside their alpha-beta window are stored.
    Strict,
    Disabled,
}

impl MemoMode {
    pub fn value(&self) -> &str {
        return match self {
            MemoMode::Lossy => "lossy",
            MemoMode::Strict => "strict",
            MemoMode::Disabled => "off",
        }
    }
}

impl fmt::Display for MemoMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for MemoMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s.to_lowercase().as_str() {
            "lossy" => Ok(MemoMode::Lossy),
            "strict" => Ok(MemoMode::Strict),
            "off" | "disabled" | "none" => Ok(MemoMode::Disabled),
            x => Err(ValueError::new(&format!("unknown memo mode '{}' (expected lossy, strict or off)", x))),
        }
    }
}


#[derive(Copy, Clone, PartialEq, Eq, Hash)]
struct StrictKey {
    fingerprint: u64,
    remaining_depth: u32,
    maximizing: bool,
}


pub struct MemoTable {
    mode: MemoMode,
    by_fingerprint: FingerprintMap<f32>,
    by_position: FxHashMap<StrictKey, f32>,
}

impl MemoTable {
    pub fn new(mode: MemoMode) -> Self {
        return Self {
            mode: mode,
            by_fingerprint: Default::default(),
            by_position: Default::default(),
        }
    }

    pub fn lookup(&self, fingerprint: u64, remaining_depth: u32, maximizing: bool) -> Option<f32> {
        return match self.mode {
            MemoMode::Lossy => self.by_fingerprint.get(&fingerprint).copied(),
            MemoMode::Strict => self.by_position.get(&StrictKey { fingerprint, remaining_depth, maximizing }).copied(),
            MemoMode::Disabled => None,
        }
    }

    /// `exact` is false when `value` is only a bound produced by a cutoff.
    pub fn record(&mut self, fingerprint: u64, remaining_depth: u32, maximizing: bool, value: f32, exact: bool) {
        match self.mode {
            MemoMode::Lossy => {
                self.by_fingerprint.entry(fingerprint).or_insert(value);
            },
            MemoMode::Strict => {
                if exact {
                    self.by_position.entry(StrictKey { fingerprint, remaining_depth, maximizing }).or_insert(value);
                }
            },
            MemoMode::Disabled => (),
        }
    }

    pub fn len(&self) -> usize {
        return self.by_fingerprint.len() + self.by_position.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}
