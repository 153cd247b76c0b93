use std::sync::Arc;

use tracing::info;

use crate::{config::SearchConfig, engine::{DeepeningReport, IterativeDeepening}, rules::{mancala::Mancala, Player}, util::errors::{SearchError, ValueError}};

use self::utility::StoreDifference;

pub mod utility;


pub struct Game {
    board: Mancala,
    ai_player: Option<Player>,
    bot: IterativeDeepening,
    move_history: Vec<(Player, usize)>,
    last_report: Option<DeepeningReport<usize>>,
}

impl Game {
    pub fn new(board: Mancala, ai_player: Option<Player>, config: SearchConfig) -> Result<Self, ValueError> {
        config.validate()?;
        return Ok(Self {
            board: board,
            ai_player: ai_player,
            bot: IterativeDeepening::new(config),
            move_history: Vec::new(),
            last_report: None,
        });
    }

    pub fn board(&self) -> &Mancala {
        return &self.board;
    }

    pub fn ai_player(&self) -> Option<Player> {
        return self.ai_player;
    }

    pub fn config(&self) -> &SearchConfig {
        return self.bot.config();
    }

    pub fn set_config(&mut self, config: SearchConfig) -> Result<(), ValueError> {
        config.validate()?;
        self.bot = IterativeDeepening::new(config);
        return Ok(());
    }

    pub fn move_history(&self) -> &[(Player, usize)] {
        return &self.move_history;
    }

    pub fn last_report(&self) -> Option<&DeepeningReport<usize>> {
        return self.last_report.as_ref();
    }

    pub fn is_ai_turn(&self) -> bool {
        return !self.board.is_over() && self.ai_player == Some(self.board.to_move());
    }

    pub fn get_legal_moves(&self) -> Vec<usize> {
        return self.board.legal_moves();
    }

    pub fn make_move(&mut self, pit: usize) -> Result<(), SearchError> {
        let player = self.board.to_move();
        self.board.make_move(pit)?;
        self.move_history.push((player, pit));
        return Ok(());
    }

    /// Searches on behalf of the player to move without playing the result.
    pub fn suggest_move(&mut self) -> Result<usize, SearchError> {
        let evaluator = Arc::new(StoreDifference::new(self.board.to_move()));
        let report = self.bot.search(&self.board, evaluator);
        let report = self.keep_report(report)?;
        return report.chosen.action.ok_or_else(|| SearchError::LogicFault(String::from("search returned no move")));
    }

    /// Searches for the player to move and plays the chosen pit.
    pub fn play_ai_move(&mut self) -> Result<usize, SearchError> {
        let player = self.board.to_move();
        let pit = self.suggest_move()?;
        self.make_move(pit)?;
        info!(player = player.number(), pit = pit, "computer moved");
        return Ok(pit);
    }

    fn keep_report(&mut self, report: Result<DeepeningReport<usize>, SearchError>) -> Result<&DeepeningReport<usize>, SearchError> {
        match report {
            Ok(r) => {
                self.last_report = Some(r);
                return self.last_report.as_ref().ok_or_else(|| SearchError::LogicFault(String::from("report was not kept")));
            },
            Err(e) => {
                self.last_report = None;
                return Err(e);
            },
        }
    }
}
