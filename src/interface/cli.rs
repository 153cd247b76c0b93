use std::{collections::HashSet, time::Duration};

use num_format::{Locale, ToFormattedString};
use tabled::{Style, Table, Tabled};
use tracing::warn;

use crate::{config::SearchConfig, engine::{DeepeningReport, DepthOutcome}, game::Game, interface::shell::InteractiveShell, rules::{mancala::{Mancala, Outcome}, Player}, testing::fingerprint::FingerprintAudit, util::errors::{SearchError, ValueError}};

use super::arguments::{AiSeat, Arguments, ShellCommand};


#[derive(Tabled)]
struct PrintableDepth {
    depth: u32,
    outcome: String,
    value: String,
    nodes: String,
    time: String,
}

impl PrintableDepth {
    fn rows(report: &DeepeningReport<usize>) -> Vec<Self> {
        return report.depths.iter().map(|d| {
            let (value, nodes, time) = match &d.outcome {
                DepthOutcome::Completed { value, nodes, elapsed } => {
                    (format!("{:.2}", value), nodes.to_formatted_string(&Locale::en), format!("{:?}", elapsed))
                },
                _ => (String::from("-"), String::from("-"), String::from("-")),
            };
            Self { depth: d.depth, outcome: d.outcome.to_string(), value: value, nodes: nodes, time: time }
        }).collect();
    }
}


#[derive(Tabled)]
struct PrintableSetting {
    setting: String,
    value: String,
}

impl PrintableSetting {
    fn new(setting: &str, value: String) -> Self {
        return Self { setting: String::from(setting), value: value };
    }

    fn rows(config: &SearchConfig, ai_player: Option<Player>) -> Vec<Self> {
        return vec![
            Self::new("computer plays", ai_player.map_or(String::from("nobody"), |p| String::from(p.value()))),
            Self::new("min depth", config.min_depth.to_string()),
            Self::new("max depth", config.max_depth.to_string()),
            Self::new("think time", format!("{:?}", config.think_time)),
            Self::new("threads", config.parallelism().to_string()),
            Self::new("memo", config.memo_mode.to_string()),
            Self::new("precision", config.compare_precision.to_string()),
        ];
    }
}


pub struct Interface {
    shell: InteractiveShell,
    game: Game,
    stones: u32,
    confirmations: HashSet<String>,
}

impl Interface {
    pub fn new(args: &Arguments) -> Result<Interface, ValueError> {
        let prompt = "mancala > ";

        return Ok(Interface {
            shell: InteractiveShell::new(Some(prompt)),
            game: Game::new(args.board()?, args.ai_player.player(), args.search_config()?)?,
            stones: args.stones,
            confirmations: HashSet::from([String::from("y"), String::from("yes")]),
        });
    }

    pub fn init(&mut self) {
        self.show_board();
        self.play_computer_turns();
        loop {
            let command = match self.shell.get_command() {
                Ok(Some(c)) => c,
                Ok(None) => continue,
                Err(e) if e.is_exit() => break,
                Err(e) => {
                    self.shell.output(&e.to_string());
                    continue;
                },
            };
            match command {
                ShellCommand::Quit => break,
                ShellCommand::New { pits, stones, ai, no_confirm } => self.do_new(pits, stones, ai, no_confirm),
                ShellCommand::Board => self.show_board(),
                ShellCommand::Moves => self.do_moves(),
                ShellCommand::Move { pit } => self.do_move(pit),
                ShellCommand::Ai => self.do_ai(),
                ShellCommand::Suggest => self.do_suggest(),
                ShellCommand::Stats => self.do_stats(),
                ShellCommand::Config => self.do_config(),
                ShellCommand::Set { depth, max_depth, think_ms, threads, memo } => {
                    let mut config = self.game.config().clone();
                    if let Some(d) = depth { config.min_depth = d; }
                    if let Some(d) = max_depth { config.max_depth = d; }
                    if let Some(ms) = think_ms { config.think_time = Duration::from_millis(ms); }
                    if let Some(t) = threads { config.threads = Some(t); }
                    if let Some(m) = memo { config.memo_mode = m; }
                    match self.game.set_config(config) {
                        Ok(()) => self.do_config(),
                        Err(e) => self.shell.output(&e.to_string()),
                    }
                },
                ShellCommand::Audit { depth } => self.do_audit(depth),
            };
            self.shell.empty_line();
        }
        self.shell.output("Exiting...");
        self.shell.empty_line();
    }

    fn show_board(&self) {
        self.shell.output(&self.game.board().to_string());
    }

    fn do_new(&mut self, pits: Option<usize>, stones: Option<u32>, ai: Option<AiSeat>, no_confirm: bool) {
        let mut confirmed = no_confirm;
        if !confirmed {
            let confirm = self.shell.input("Are you sure you want to start a new game? All progress on the current game will be lost. (y/N): ");
            confirmed = match confirm {
                Ok(answer) => self.confirmations.contains(&answer.to_lowercase()),
                Err(_) => false,
            };
        }
        if !confirmed {
            self.shell.output("OK, aborting...");
            return;
        }
        let current = self.game.board();
        let pits = pits.unwrap_or(current.pits());
        let stones = stones.unwrap_or(self.stones);
        let extra_turns = current.extra_turns();
        let ai_player = match ai {
            Some(seat) => seat.player(),
            None => self.game.ai_player(),
        };
        let board = match Mancala::with_size(pits, stones) {
            Ok(b) => b.with_extra_turns(extra_turns),
            Err(e) => {
                self.shell.output(&e.to_string());
                return;
            },
        };
        match Game::new(board, ai_player, self.game.config().clone()) {
            Ok(game) => {
                self.game = game;
                self.stones = stones;
            },
            Err(e) => {
                self.shell.output(&e.to_string());
                return;
            },
        }
        self.shell.output("New game started!");
        self.show_board();
        self.play_computer_turns();
    }

    fn do_moves(&self) {
        let moves = self.game.get_legal_moves();
        if moves.is_empty() {
            self.shell.output("No legal moves: the game is over.");
            return;
        }
        let listed: Vec<String> = moves.iter().map(|p| format!("{} ({} stones)", p, self.game.board().stones_at(*p))).collect();
        self.shell.output(&format!("{} can sow from: {}", self.game.board().to_move().value(), listed.join(", ")));
    }

    fn do_move(&mut self, pit: usize) {
        if self.game.is_ai_turn() {
            self.shell.output("It is the computer's turn. Use 'ai' to let it move.");
            return;
        }
        match self.game.make_move(pit) {
            Ok(()) => {
                self.show_board();
                self.play_computer_turns();
            },
            Err(e) => self.shell.output(&format!("Can't play pit {}: {}", pit, e)),
        }
    }

    fn do_ai(&mut self) {
        if self.game.board().is_over() {
            self.announce_result();
            return;
        }
        self.shell.output("Thinking...");
        match self.game.play_ai_move() {
            Ok(pit) => {
                self.shell.output(&format!("Computer sows from pit {}{}", pit, self.depth_note()));
                self.show_board();
                self.play_computer_turns();
            },
            Err(e) => self.report_search_error(e),
        }
    }

    fn do_suggest(&mut self) {
        if self.game.board().is_over() {
            self.announce_result();
            return;
        }
        self.shell.output("Thinking...");
        match self.game.suggest_move() {
            Ok(pit) => self.shell.output(&format!("Suggested pit: {}{}", pit, self.depth_note())),
            Err(e) => self.report_search_error(e),
        }
    }

    fn do_stats(&self) {
        match self.game.last_report() {
            None => self.shell.output("No search has completed yet."),
            Some(report) => {
                let table = Table::new(PrintableDepth::rows(report)).with(Style::pseudo_clean());
                self.shell.output(&table.to_string());
                let stats = &report.chosen.stats;
                self.shell.output(&format!(
                    "Chose depth {} in {:?}: {} nodes, {} evaluations, {} memo hits, {} cutoffs, {} nodes alive at peak",
                    report.depth(),
                    report.elapsed,
                    stats.nodes.to_formatted_string(&Locale::en),
                    stats.evaluations.to_formatted_string(&Locale::en),
                    stats.cache_hits.to_formatted_string(&Locale::en),
                    stats.cutoffs.to_formatted_string(&Locale::en),
                    stats.peak_live_nodes.to_formatted_string(&Locale::en),
                ));
            },
        }
    }

    fn do_config(&self) {
        let table = Table::new(PrintableSetting::rows(self.game.config(), self.game.ai_player())).with(Style::pseudo_clean());
        self.shell.output(&table.to_string());
    }

    fn do_audit(&self, depth: u32) {
        self.shell.output(&format!("Checking fingerprints {} moves ahead...", depth));
        let result = FingerprintAudit::run(self.game.board(), depth);
        let rows = vec![
            PrintableSetting::new("positions", result.positions_checked.to_formatted_string(&Locale::en)),
            PrintableSetting::new("matches", result.fingerprint_matches.to_formatted_string(&Locale::en)),
            PrintableSetting::new("transpositions", result.transpositions.to_formatted_string(&Locale::en)),
            PrintableSetting::new("collisions", result.collisions.to_formatted_string(&Locale::en)),
            PrintableSetting::new("unstable", result.unstable_fingerprints.to_formatted_string(&Locale::en)),
            PrintableSetting::new("memory", bytefmt::format(result.memory_size)),
        ];
        self.shell.output(&Table::new(rows).with(Style::pseudo_clean()).to_string());
        self.shell.output(&format!("Completed in {:?}", result.duration));
        for collision in result.collision_pairs.iter() {
            self.shell.output(&format!("Fingerprint {} after {} is shared by:", collision.fingerprint, collision.cause));
            self.shell.output(&format!("    {}", collision.state_1));
            self.shell.output(&format!("    {}", collision.state_2));
        }
    }

    /// Lets the computer move for as long as it holds the turn.
    fn play_computer_turns(&mut self) {
        while self.game.is_ai_turn() {
            self.shell.output("Thinking...");
            match self.game.play_ai_move() {
                Ok(pit) => {
                    self.shell.output(&format!("Computer sows from pit {}{}", pit, self.depth_note()));
                    self.show_board();
                },
                Err(e) => {
                    self.report_search_error(e);
                    return;
                },
            }
        }
        if self.game.board().is_over() {
            self.announce_result();
        }
    }

    fn depth_note(&self) -> String {
        return match self.game.last_report() {
            Some(r) => format!(" (searched {} plies)", r.depth()),
            None => String::new(),
        }
    }

    fn report_search_error(&self, e: SearchError) {
        if e.is_timeout() {
            self.shell.output("The computer ran out of time before finishing any search. Raise the think time with 'set --think-ms' or lower 'set --depth', then try 'ai'.");
        } else {
            warn!(error = %e, "search failed");
            self.shell.output(&format!("Search failed: {}", e));
        }
    }

    fn announce_result(&self) {
        let board = self.game.board();
        let scores = format!("{} - {}", board.score(Player::One), board.score(Player::Two));
        match board.outcome() {
            Some(Outcome::Winner(p)) => self.shell.output(&format!("Game over: {} wins {}", p.value(), scores)),
            Some(Outcome::Draw) => self.shell.output(&format!("Game over: draw {}", scores)),
            None => (),
        }
    }
}
