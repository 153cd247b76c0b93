use std::fmt::Debug;

use crate::util::errors::SearchError;


/// A two-player, perfect-information, zero-sum game position that the
/// alpha-beta engine can search.
///
/// `Clone` must produce an independent copy: applying actions to the clone
/// never affects the original. The engine only ever mutates clones.
pub trait SearchableState: Clone {
    type Action: Clone + Debug;

    /// All legal actions from this position, in a stable order. The order
    /// decides which action wins when several are equally good.
    fn actions(&self) -> Vec<Self::Action>;

    /// Equal positions (including the player to move) must produce equal
    /// fingerprints; two positions that differ only in whose turn it is
    /// must not.
    fn fingerprint(&self) -> u64;

    /// Applies one action in place. An action not returned by `actions()`
    /// is rejected with `SearchError::IllegalAction` and leaves the state
    /// untouched.
    fn do_action(&mut self, action: &Self::Action) -> Result<(), SearchError>;

    /// True when the search should not descend past this position.
    fn is_terminal(&self) -> bool;
}
