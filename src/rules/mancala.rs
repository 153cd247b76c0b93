use std::fmt;

use crate::{engine::SearchableState, util::{errors::{SearchError, ValueError}, fingerprint::fingerprint_of}};

use super::Player;


pub const DEFAULT_PITS: usize = 6;
pub const DEFAULT_STONES: u32 = 4;
pub const MIN_PITS: usize = 4;
pub const MAX_PITS: usize = 32;
pub const MAX_STONES: u32 = 100;


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Player),
    Draw,
}


/// A Mancala board. With `pits` pits per side the layout is
///
/// ```text
///        player two
///  store 12 11 10  9  8  7
///         0  1  2  3  4  5  store
///        player one
/// ```
///
/// where player one's store is index `pits` and player two's is `2 * pits + 1`.
/// Stones are sown counter-clockwise, skipping the opponent's store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mancala {
    board: Vec<u32>,
    pits: usize,
    to_move: Player,
    outcome: Option<Outcome>,
    extra_turns: bool,
}

impl Default for Mancala {
    fn default() -> Self {
        Self::with_size(DEFAULT_PITS, DEFAULT_STONES).unwrap_or_else(|_| unreachable!("default board size is valid"))
    }
}

impl Mancala {
    pub fn with_size(pits: usize, stones: u32) -> Result<Self, ValueError> {
        if pits < MIN_PITS || pits > MAX_PITS {
            return Err(ValueError::new(&format!("pits must be between {} and {}", MIN_PITS, MAX_PITS)));
        }
        if stones == 0 || stones > MAX_STONES {
            return Err(ValueError::new(&format!("stones must be between 1 and {}", MAX_STONES)));
        }
        let mut board = Vec::with_capacity(pits * 2 + 2);
        for _ in Player::iter() {
            board.extend(std::iter::repeat(stones).take(pits));
            board.push(0);
        }
        return Self::from_board(board, Player::One);
    }

    /// Builds a board from raw contents: player one's pits, player one's
    /// store, player two's pits, player two's store.
    pub fn from_board(board: Vec<u32>, to_move: Player) -> Result<Self, ValueError> {
        if board.len() % 2 != 0 || board.len() < MIN_PITS * 2 + 2 {
            return Err(ValueError::new(&format!("a board needs two equal sides of at least {} pits plus two stores", MIN_PITS)));
        }
        let mut mancala = Self {
            pits: board.len() / 2 - 1,
            board: board,
            to_move: to_move,
            outcome: None,
            extra_turns: true,
        };
        mancala.finish_if_over();
        return Ok(mancala);
    }

    /// Landing the last stone in your own store earns another move. With this
    /// off, turns always alternate.
    pub fn with_extra_turns(mut self, extra_turns: bool) -> Self {
        self.extra_turns = extra_turns;
        return self;
    }

    pub fn pits(&self) -> usize {
        return self.pits;
    }

    pub fn board(&self) -> &[u32] {
        return &self.board;
    }

    pub fn stones_at(&self, index: usize) -> u32 {
        return self.board[index % self.board.len()];
    }

    pub fn to_move(&self) -> Player {
        return self.to_move;
    }

    pub fn outcome(&self) -> Option<Outcome> {
        return self.outcome;
    }

    pub fn is_over(&self) -> bool {
        return self.outcome.is_some();
    }

    pub fn extra_turns(&self) -> bool {
        return self.extra_turns;
    }

    pub fn store(&self, player: Player) -> usize {
        return match player {
            Player::One => self.pits,
            Player::Two => self.pits * 2 + 1,
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        return self.board[self.store(player)];
    }

    pub fn side(&self, player: Player) -> std::ops::Range<usize> {
        return match player {
            Player::One => 0..self.pits,
            Player::Two => self.pits + 1..self.pits * 2 + 1,
        }
    }

    pub fn owner(&self, index: usize) -> Option<Player> {
        return Player::iter().find(|p| self.side(*p).contains(&index));
    }

    pub fn opposite(&self, pit: usize) -> usize {
        return self.pits * 2 - pit;
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        return self.side(self.to_move).filter(|pit| self.board[*pit] > 0).collect();
    }

    pub fn make_move(&mut self, pit: usize) -> Result<(), SearchError> {
        if self.is_over() {
            return Err(SearchError::IllegalAction(String::from("the game is over")));
        }
        if self.owner(pit) != Some(self.to_move) {
            return Err(SearchError::IllegalAction(format!("pit {} is not one of {}'s pits", pit, self.to_move.value())));
        }
        if self.board[pit] == 0 {
            return Err(SearchError::IllegalAction(format!("pit {} is empty", pit)));
        }
        let end = self.sow(pit);
        self.capture(end);
        self.finish_if_over();
        if !(self.extra_turns && end == self.store(self.to_move)) || self.is_over() {
            self.to_move = self.to_move.swap();
        }
        return Ok(());
    }

    fn sow(&mut self, mut pit: usize) -> usize {
        let mut stones = self.board[pit];
        self.board[pit] = 0;
        let skipped = self.store(self.to_move.swap());
        while stones > 0 {
            pit = (pit + 1) % self.board.len();
            if pit != skipped {
                self.board[pit] += 1;
                stones -= 1;
            }
        }
        return pit;
    }

    // The last stone landed in an empty pit on the mover's side.
    fn capture(&mut self, end: usize) {
        if self.owner(end) != Some(self.to_move) || self.board[end] != 1 {
            return;
        }
        let opposite = self.opposite(end);
        if self.board[opposite] == 0 {
            return;
        }
        let store = self.store(self.to_move);
        self.board[store] += self.board[end] + self.board[opposite];
        self.board[end] = 0;
        self.board[opposite] = 0;
    }

    fn side_is_empty(&self, player: Player) -> bool {
        return self.side(player).all(|pit| self.board[pit] == 0);
    }

    fn finish_if_over(&mut self) {
        if !Player::iter().any(|p| self.side_is_empty(p)) {
            return;
        }
        for player in Player::iter() {
            let store = self.store(player);
            for pit in self.side(player) {
                self.board[store] += self.board[pit];
                self.board[pit] = 0;
            }
        }
        let (one, two) = (self.score(Player::One), self.score(Player::Two));
        self.outcome = Some(if one > two {
            Outcome::Winner(Player::One)
        } else if two > one {
            Outcome::Winner(Player::Two)
        } else {
            Outcome::Draw
        });
    }
}

impl SearchableState for Mancala {
    type Action = usize;

    fn actions(&self) -> Vec<usize> {
        return self.legal_moves();
    }

    fn fingerprint(&self) -> u64 {
        return fingerprint_of(&(&self.board, self.to_move, self.extra_turns));
    }

    fn do_action(&mut self, action: &usize) -> Result<(), SearchError> {
        return self.make_move(*action);
    }

    fn is_terminal(&self) -> bool {
        return self.is_over();
    }
}

impl fmt::Display for Mancala {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let one = self.store(Player::One);
        let two = self.store(Player::Two);
        writeln!(f, "P2")?;
        write!(f, "{:2}", self.board[two])?;
        for pit in self.side(Player::Two).rev() {
            write!(f, "{:3}", self.board[pit])?;
        }
        write!(f, "\n  ")?;
        for pit in self.side(Player::One) {
            write!(f, "{:3}", self.board[pit])?;
        }
        writeln!(f, "{:3}", self.board[one])?;
        writeln!(f, "{} P1", "   ".repeat(self.pits + 1))?;
        return match self.outcome {
            None => write!(f, "Player {}'s turn", self.to_move.number()),
            Some(Outcome::Winner(p)) => write!(f, "Player {} wins {} to {}", p.number(), self.score(p), self.score(p.swap())),
            Some(Outcome::Draw) => write!(f, "Draw at {} each", self.score(Player::One)),
        }
    }
}
