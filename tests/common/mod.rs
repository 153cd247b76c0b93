#![allow(dead_code)]

use std::{thread, time::Duration};

use mancala_search::{engine::{Evaluator, SearchableState}, util::{errors::SearchError, fingerprint::fingerprint_of}};


/// A game given as an explicit tree. Node 0 is the root; leaves carry values.
#[derive(Clone, Debug)]
pub struct Tree {
    pub node: usize,
    pub children: &'static [&'static [usize]],
    pub values: &'static [f32],
}

impl SearchableState for Tree {
    type Action = usize;

    fn actions(&self) -> Vec<usize> {
        return self.children[self.node].to_vec();
    }

    fn fingerprint(&self) -> u64 {
        return fingerprint_of(&self.node);
    }

    fn do_action(&mut self, action: &usize) -> Result<(), SearchError> {
        if !self.children[self.node].contains(action) {
            return Err(SearchError::IllegalAction(format!("node {} has no child {}", self.node, action)));
        }
        self.node = *action;
        return Ok(());
    }

    fn is_terminal(&self) -> bool {
        return self.children[self.node].is_empty();
    }
}

pub fn tree_value(state: &Tree) -> f32 {
    return state.values[state.node];
}

// Depth-2 tree where the second and third root children can be pruned once
// the first has been searched.
pub static PRUNABLE_CHILDREN: [&[usize]; 10] = [&[1, 2, 3], &[4, 5], &[6, 7], &[8, 9], &[], &[], &[], &[], &[], &[]];
pub static PRUNABLE_VALUES: [f32; 10] = [0.0, 0.0, 0.0, 0.0, 3.0, 12.0, 2.0, 4.0, 14.0, 1.0];

pub fn prunable_tree() -> Tree {
    return Tree { node: 0, children: &PRUNABLE_CHILDREN, values: &PRUNABLE_VALUES };
}


/// Players alternately add 1, 2 or 3 to a running total until it reaches
/// `target`. Different orders reach the same totals, so positions transpose.
#[derive(Clone, Debug, PartialEq)]
pub struct Counter {
    pub total: u32,
    pub target: u32,
    pub first_to_move: bool,
}

impl Counter {
    pub fn new(target: u32) -> Self {
        return Self { total: 0, target: target, first_to_move: true };
    }
}

impl SearchableState for Counter {
    type Action = u32;

    fn actions(&self) -> Vec<u32> {
        return (1..=3).filter(|n| self.total + n <= self.target).collect();
    }

    fn fingerprint(&self) -> u64 {
        return fingerprint_of(&(self.total, self.target, self.first_to_move));
    }

    fn do_action(&mut self, action: &u32) -> Result<(), SearchError> {
        if !self.actions().contains(action) {
            return Err(SearchError::IllegalAction(format!("cannot add {} to {}", action, self.total)));
        }
        self.total += action;
        self.first_to_move = !self.first_to_move;
        return Ok(());
    }

    fn is_terminal(&self) -> bool {
        return self.total >= self.target;
    }
}

/// Uneven scores so that different lines really differ in value.
pub fn counter_value(state: &Counter) -> f32 {
    let base = ((state.total * 7 + 3) % 11) as f32 - 5.0;
    return if state.first_to_move { base } else { base + 0.5 };
}


/// Only one action is ever available.
#[derive(Clone, Debug)]
pub struct Corridor {
    pub steps: u32,
}

impl SearchableState for Corridor {
    type Action = &'static str;

    fn actions(&self) -> Vec<&'static str> {
        return if self.steps < 100 { vec!["forward"] } else { Vec::new() };
    }

    fn fingerprint(&self) -> u64 {
        return fingerprint_of(&self.steps);
    }

    fn do_action(&mut self, action: &&'static str) -> Result<(), SearchError> {
        if *action != "forward" || self.steps >= 100 {
            return Err(SearchError::IllegalAction(String::from(*action)));
        }
        self.steps += 1;
        return Ok(());
    }

    fn is_terminal(&self) -> bool {
        return self.steps >= 100;
    }
}


/// Wraps another evaluator and sleeps on every call.
pub struct Sluggish<E> {
    pub inner: E,
    pub delay: Duration,
}

impl<S, E: Evaluator<S>> Evaluator<S> for Sluggish<E> {
    fn utility(&self, state: &S) -> f32 {
        thread::sleep(self.delay);
        return self.inner.utility(state);
    }

    fn is_max_layer(&self, state: &S) -> Option<bool> {
        return self.inner.is_max_layer(state);
    }
}
