use crate::{engine::{evaluation::{child_layer, root_layer, Evaluator}, scores::{best_of, worst_score}, state::SearchableState}, util::errors::SearchError};


/// Plain depth-limited minimax with no pruning, no memo table and no
/// deadline. Exponential; only meant for checking the pruned search on
/// small trees.
pub struct MinimaxSearch;

impl MinimaxSearch {
    pub fn value<S: SearchableState, E: Evaluator<S> + ?Sized>(state: &S, evaluator: &E, max_depth: u32) -> Result<f32, SearchError> {
        return Self::layer(state, evaluator, 0, max_depth, root_layer(evaluator, state));
    }

    /// The minimax value of every root action, in `actions()` order.
    pub fn action_values<S: SearchableState, E: Evaluator<S> + ?Sized>(state: &S, evaluator: &E, max_depth: u32) -> Result<Vec<(S::Action, f32)>, SearchError> {
        let maximizing = root_layer(evaluator, state);
        if max_depth == 0 || state.is_terminal() {
            return Ok(Vec::new());
        }
        let mut values = Vec::new();
        for action in state.actions() {
            let mut child = state.clone();
            child.do_action(&action)?;
            let child_maximizing = child_layer(evaluator, &child, maximizing);
            values.push((action, Self::layer(&child, evaluator, 1, max_depth, child_maximizing)?));
        }
        return Ok(values);
    }

    fn layer<S: SearchableState, E: Evaluator<S> + ?Sized>(state: &S, evaluator: &E, depth: u32, max_depth: u32, maximizing: bool) -> Result<f32, SearchError> {
        let actions = state.actions();
        if depth >= max_depth || state.is_terminal() || actions.is_empty() {
            return Ok(evaluator.utility(state));
        }
        let mut value = worst_score(maximizing);
        for action in actions {
            let mut child = state.clone();
            child.do_action(&action)?;
            let child_maximizing = child_layer(evaluator, &child, maximizing);
            value = best_of(Self::layer(&child, evaluator, depth + 1, max_depth, child_maximizing)?, value, maximizing);
        }
        return Ok(value);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // A complete binary tree of height 2 with fixed leaf values.
    #[derive(Clone)]
    struct Leaves {
        path: Vec<usize>,
    }

    const LEAF_VALUES: [f32; 4] = [3.0, 5.0, 2.0, 9.0];

    impl SearchableState for Leaves {
        type Action = usize;
        fn actions(&self) -> Vec<usize> { if self.path.len() < 2 { vec![0, 1] } else { Vec::new() } }
        fn fingerprint(&self) -> u64 { self.path.iter().fold(1u64, |acc, step| acc * 2 + *step as u64) }
        fn do_action(&mut self, action: &usize) -> Result<(), SearchError> { self.path.push(*action); Ok(()) }
        fn is_terminal(&self) -> bool { self.path.len() == 2 }
    }

    fn leaf_value(state: &Leaves) -> f32 {
        if state.path.len() < 2 { return 0.0; }
        return LEAF_VALUES[state.path[0] * 2 + state.path[1]];
    }

    #[test]
    fn max_of_mins() {
        let root = Leaves { path: Vec::new() };
        assert_eq!(MinimaxSearch::value(&root, &leaf_value, 2).unwrap(), 3.0);
        assert_eq!(MinimaxSearch::action_values(&root, &leaf_value, 2).unwrap(), vec![(0, 3.0), (1, 2.0)]);
    }

    #[test]
    fn depth_limit_evaluates_early() {
        let root = Leaves { path: Vec::new() };
        assert_eq!(MinimaxSearch::value(&root, &leaf_value, 0).unwrap(), 0.0);
        assert!(MinimaxSearch::action_values(&root, &leaf_value, 0).unwrap().is_empty());
    }
}
