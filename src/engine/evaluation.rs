/// Scores positions for the search. Higher values favor the maximizing side;
/// the engine never flips the sign between layers.
pub trait Evaluator<S> {
    fn utility(&self, state: &S) -> f32;

    /// Whether the node holding `state` is a maximizing layer. `None` keeps
    /// strict alternation starting from a maximizing root.
    fn is_max_layer(&self, _state: &S) -> Option<bool> {
        return None;
    }
}

impl<S, F> Evaluator<S> for F where F: Fn(&S) -> f32 {
    fn utility(&self, state: &S) -> f32 {
        return self(state);
    }
}


pub fn root_layer<S, E: Evaluator<S> + ?Sized>(evaluator: &E, state: &S) -> bool {
    return evaluator.is_max_layer(state).unwrap_or(true);
}


pub fn child_layer<S, E: Evaluator<S> + ?Sized>(evaluator: &E, child: &S, parent_maximizing: bool) -> bool {
    return evaluator.is_max_layer(child).unwrap_or(!parent_maximizing);
}
