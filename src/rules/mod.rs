pub mod mancala;


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn iter() -> PlayerIterator {
        return PlayerIterator::new();
    }

    pub fn swap(&self) -> Player {
        return match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn value(&self) -> &str {
        return match self {
            &Player::One => "player one",
            &Player::Two => "player two",
        }
    }

    pub fn number(&self) -> u8 {
        return match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}


pub struct PlayerIterator {
    state: Option<Player>,
}

impl PlayerIterator {
    pub fn new() -> Self {
        return Self { state: None }
    }
}

impl Iterator for PlayerIterator {
    type Item = Player;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.state {
            None => Some(Player::One),
            Some(Player::One) => Some(Player::Two),
            Some(Player::Two) => None
        };
        self.state = next;
        return next;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_both_players_once() {
        assert_eq!(Player::iter().collect::<Vec<_>>(), vec![Player::One, Player::Two]);
    }

    #[test]
    fn swapping_gives_the_opponent() {
        assert_eq!(Player::One.swap(), Player::Two);
        assert_eq!(Player::One.swap().number(), 2);
        assert_eq!(Player::Two.value(), "player two");
    }
}
