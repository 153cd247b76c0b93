use crate::{engine::Evaluator, rules::{mancala::Mancala, Player}};


/// Store difference from `player`'s point of view, plus half credit for
/// stones waiting in the two pits nearest each store. Layers follow the
/// player to move, so extra turns keep the same layer.
#[derive(Copy, Clone, Debug)]
pub struct StoreDifference {
    pub player: Player,
}

impl StoreDifference {
    pub fn new(player: Player) -> Self {
        return Self { player: player };
    }

    fn near_store(board: &Mancala, player: Player) -> f32 {
        let store = board.store(player);
        return board.stones_at(store - 1) as f32 + board.stones_at(store - 2) as f32 / 2.0;
    }
}

impl Evaluator<Mancala> for StoreDifference {
    fn utility(&self, board: &Mancala) -> f32 {
        let opponent = self.player.swap();
        let stores = board.score(self.player) as f32 - board.score(opponent) as f32;
        let waiting = Self::near_store(board, self.player) - Self::near_store(board, opponent);
        return stores + waiting / 2.0;
    }

    fn is_max_layer(&self, board: &Mancala) -> Option<bool> {
        return Some(board.to_move() == self.player);
    }
}
