use std::{cell::Cell, marker::PhantomData};

use super::state::SearchableState;


thread_local! {
    static LIVE_NODES: Cell<usize> = Cell::new(0);
}


/// One position in a search tree. A node exclusively owns its state, the
/// action that produced it and every descendant; dropping it releases the
/// whole subtree.
pub struct SearchNode<S: SearchableState> {
    pub state: S,
    pub action: Option<S::Action>,
    pub value: f32,
    pub depth: u32,
    pub children: Vec<SearchNode<S>>,
    _tracked: LiveNode,
}

impl<S: SearchableState> SearchNode<S> {
    pub fn root(state: S) -> Self {
        return Self::new(state, None, 0);
    }

    fn new(state: S, action: Option<S::Action>, depth: u32) -> Self {
        return Self {
            state: state,
            action: action,
            value: f32::NAN,
            depth: depth,
            children: Vec::new(),
            _tracked: LiveNode::track(),
        }
    }

    pub fn add_child(&mut self, state: S, action: S::Action) -> &mut SearchNode<S> {
        self.children.push(Self::new(state, Some(action), self.depth + 1));
        let last = self.children.len() - 1;
        return &mut self.children[last];
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Nodes currently alive on the calling thread, across all trees.
    pub fn live_nodes() -> usize {
        return LIVE_NODES.with(|count| count.get());
    }
}


// Not Send: a node must be dropped on the thread that counted it.
struct LiveNode {
    _not_send: PhantomData<*const ()>,
}

impl LiveNode {
    fn track() -> Self {
        LIVE_NODES.with(|count| count.set(count.get() + 1));
        return Self { _not_send: PhantomData };
    }
}

impl Drop for LiveNode {
    fn drop(&mut self) {
        LIVE_NODES.with(|count| count.set(count.get() - 1));
    }
}
