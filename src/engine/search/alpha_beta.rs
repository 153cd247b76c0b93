use std::{marker::PhantomData, time::Instant};

use tracing::debug;

use crate::{engine::{evaluation::{child_layer, root_layer, Evaluator}, node::SearchNode, scores::{approx_eq, best_of, worst_score}, state::SearchableState}, util::errors::SearchError};

use super::{memo::MemoTable, SearchParams, SearchReport, SearchStats};


/// One depth-bounded, deadline-bounded alpha-beta search. Every run owns its
/// tree and its memo table; nothing is shared between runs.
pub struct AlphaBetaSearch<'a, S: SearchableState, E: Evaluator<S> + ?Sized> {
    evaluator: &'a E,
    params: &'a SearchParams,
    deadline: Option<Instant>,
    memo: MemoTable,
    stats: SearchStats,
    live_at_start: usize,
    _state: PhantomData<S>,
}

impl<'a, S: SearchableState, E: Evaluator<S> + ?Sized> AlphaBetaSearch<'a, S, E> {

    /// Returns the chosen action, or `Timeout` if `start_time + max_time`
    /// passes first. A root without children is a `LogicFault`.
    pub fn search(root_state: &S, evaluator: &'a E, params: &'a SearchParams, start_time: Instant) -> Result<S::Action, SearchError> {
        let report = Self::run(root_state, evaluator, params, start_time)?;
        return report.action.ok_or_else(|| {
            SearchError::LogicFault(String::from("root position has no action to choose from"))
        });
    }

    pub fn run(root_state: &S, evaluator: &'a E, params: &'a SearchParams, start_time: Instant) -> Result<SearchReport<S::Action>, SearchError> {
        let mut search = Self {
            evaluator: evaluator,
            params: params,
            deadline: start_time.checked_add(params.max_time),
            memo: MemoTable::new(params.memo_mode),
            stats: Default::default(),
            live_at_start: SearchNode::<S>::live_nodes(),
            _state: PhantomData,
        };
        let started = Instant::now();
        let mut root = SearchNode::root(root_state.clone());
        let maximizing = root_layer(evaluator, &root.state);
        let value = search.layer(&mut root, f32::NEG_INFINITY, f32::INFINITY, maximizing)?;
        let action = Self::select_action(&root, value, params.compare_precision)?;
        drop(root);

        debug!(
            depth = params.max_depth,
            value = value,
            nodes = search.stats.nodes,
            cache_hits = search.stats.cache_hits,
            cutoffs = search.stats.cutoffs,
            memo_entries = search.memo.len(),
            "alpha-beta search complete"
        );
        return Ok(SearchReport {
            action: action,
            value: value,
            depth: params.max_depth,
            stats: search.stats,
            elapsed: started.elapsed(),
        });
    }

    fn expired(&self) -> bool {
        return match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    fn evaluate(&mut self, node: &mut SearchNode<S>) -> f32 {
        self.stats.evaluations += 1;
        node.value = self.evaluator.utility(&node.state);
        return node.value;
    }

    fn layer(&mut self, node: &mut SearchNode<S>, mut alpha: f32, mut beta: f32, maximizing: bool) -> Result<f32, SearchError> {
        if self.expired() {
            return Err(SearchError::Timeout);
        }
        self.stats.nodes += 1;
        let live = SearchNode::<S>::live_nodes().saturating_sub(self.live_at_start);
        self.stats.peak_live_nodes = self.stats.peak_live_nodes.max(live);

        if node.depth >= self.params.max_depth || node.state.is_terminal() {
            return Ok(self.evaluate(node));
        }
        let actions = node.state.actions();
        if actions.is_empty() {
            return Ok(self.evaluate(node));
        }

        let remaining_depth = self.params.max_depth - node.depth - 1;
        let mut value = worst_score(maximizing);
        for action in actions {
            let mut child_state = node.state.clone();
            child_state.do_action(&action).map_err(|e| {
                SearchError::LogicFault(format!("action {:?} offered by the state was rejected: {}", action, e))
            })?;
            let child_maximizing = child_layer(self.evaluator, &child_state, maximizing);
            let fingerprint = child_state.fingerprint();
            let child = node.add_child(child_state, action);

            let child_value = match self.memo.lookup(fingerprint, remaining_depth, child_maximizing) {
                Some(memoized) => {
                    self.stats.cache_hits += 1;
                    memoized
                },
                None => {
                    let calculated = self.layer(child, alpha, beta, child_maximizing)?;
                    let exact = alpha < calculated && calculated < beta;
                    self.memo.record(fingerprint, remaining_depth, child_maximizing, calculated, exact);
                    calculated
                },
            };
            child.value = child_value;
            child.clear_children();

            value = best_of(child_value, value, maximizing);
            if maximizing {
                if value >= beta {
                    self.stats.cutoffs += 1;
                    node.value = value;
                    return Ok(value);
                }
                alpha = alpha.max(value);
            } else {
                if value <= alpha {
                    self.stats.cutoffs += 1;
                    node.value = value;
                    return Ok(value);
                }
                beta = beta.min(value);
            }
        }
        node.value = value;
        return Ok(value);
    }

    fn select_action(root: &SearchNode<S>, value: f32, precision: f32) -> Result<Option<S::Action>, SearchError> {
        if root.children.is_empty() {
            return Ok(None);
        }
        if root.children.len() == 1 {
            return Ok(root.children[0].action.clone());
        }
        return match root.children.iter().find(|child| approx_eq(child.value, value, precision)) {
            Some(child) => Ok(child.action.clone()),
            None => Err(SearchError::LogicFault(format!("no child of the root matches its value {}", value))),
        }
    }
}
