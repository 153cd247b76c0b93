use std::{fmt::Debug, mem, time::{Duration, Instant}};

use fxhash::FxHashSet;

use crate::{engine::SearchableState, util::fingerprint::FingerprintMap};


#[derive(Clone, Debug)]
pub struct Collision {
    pub cause: String,
    pub state_1: String,
    pub state_2: String,
    pub fingerprint: u64,
}


struct AuditContext<S> {
    positions_checked: u32,
    fingerprint_matches: u32,
    collisions_detected: u32,
    unstable_fingerprints: u32,
    start: Instant,
    memory_used: u64,
    collision_fingerprints: FxHashSet<u64>,
    seen: FingerprintMap<Vec<S>>,
    collisions: Vec<Collision>,
}

impl<S: SearchableState + PartialEq + Debug> AuditContext<S> {
    fn new() -> Self {
        return Self {
            positions_checked: 0,
            fingerprint_matches: 0,
            collisions_detected: 0,
            unstable_fingerprints: 0,
            start: Instant::now(),
            memory_used: 0,
            collision_fingerprints: FxHashSet::default(),
            seen: FingerprintMap::default(),
            collisions: Vec::new(),
        };
    }

    fn has_collision(&self) -> bool {
        return self.collisions_detected > 0;
    }

    fn process(&mut self, state: &S, cause: Option<&S::Action>) {
        self.positions_checked += 1;
        let fingerprint = state.fingerprint();
        if state.clone().fingerprint() != fingerprint {
            self.unstable_fingerprints += 1;
        }
        match self.seen.get_mut(&fingerprint) {
            Some(states) => {
                self.fingerprint_matches += 1;
                if !states.contains(state) {
                    self.collisions.push(Collision {
                        cause: cause.map_or(String::from("(root)"), |a| format!("{:?}", a)),
                        state_1: format!("{:?}", state),
                        state_2: states.first().map_or(String::new(), |s| format!("{:?}", s)),
                        fingerprint: fingerprint,
                    });
                    self.collisions_detected += 1;
                    if self.collision_fingerprints.insert(fingerprint) {
                        self.memory_used += mem::size_of::<u64>() as u64;
                    }
                    states.push(state.clone());
                    self.memory_used += mem::size_of::<S>() as u64;
                }
            },
            None => {
                self.seen.insert(fingerprint, vec![state.clone()]);
                self.memory_used += (mem::size_of::<u64>() + mem::size_of::<S>()) as u64;
            },
        }
    }

    fn complete(self) -> AuditResult {
        return AuditResult {
            positions_checked: self.positions_checked,
            fingerprint_matches: self.fingerprint_matches,
            transpositions: self.fingerprint_matches - self.collisions_detected,
            collisions: self.collisions_detected,
            collided_fingerprint_count: self.collision_fingerprints.len() as u32,
            unstable_fingerprints: self.unstable_fingerprints,
            duration: self.start.elapsed(),
            memory_size: self.memory_used,
            collision_pairs: self.collisions,
        };
    }
}


pub struct AuditResult {
    pub positions_checked: u32,
    pub fingerprint_matches: u32,
    /// Matches where the positions really were equal.
    pub transpositions: u32,
    pub collisions: u32,
    pub collided_fingerprint_count: u32,
    /// Positions whose clone fingerprinted differently.
    pub unstable_fingerprints: u32,
    pub duration: Duration,
    pub memory_size: u64,
    pub collision_pairs: Vec<Collision>,
}

impl AuditResult {
    pub fn is_clean(&self) -> bool {
        return self.collisions == 0 && self.unstable_fingerprints == 0;
    }
}


/// Walks every position reachable within `depth` actions and checks that
/// fingerprints separate distinct positions. Stops descending at the first
/// collision.
pub struct FingerprintAudit {}

impl FingerprintAudit {
    pub fn run<S: SearchableState + PartialEq + Debug>(state: &S, depth: u32) -> AuditResult {
        let mut ctx = AuditContext::new();
        Self::walk(state, None, depth, &mut ctx);
        return ctx.complete();
    }

    fn walk<S: SearchableState + PartialEq + Debug>(state: &S, last_action: Option<&S::Action>, depth: u32, ctx: &mut AuditContext<S>) {
        ctx.process(state, last_action);
        if ctx.has_collision() { return }
        if depth == 0 || state.is_terminal() { return }
        for action in state.actions() {
            if ctx.has_collision() { return }
            let mut next = state.clone();
            if next.do_action(&action).is_err() { continue }
            Self::walk(&next, Some(&action), depth - 1, ctx);
        }
    }
}
