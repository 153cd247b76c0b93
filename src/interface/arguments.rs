use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{config::{SearchConfig, DEFAULT_PRECISION, MAX_DEPTH}, engine::MemoMode, rules::{mancala::{Mancala, DEFAULT_PITS, DEFAULT_STONES}, Player}, util::errors::{InputError, ValueError}};


/// Deepest walk `audit` accepts. The walk is exhaustive, so each extra ply
/// multiplies its cost by the number of pits.
pub const MAX_AUDIT_DEPTH: u32 = 8;


#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AiSeat {
    /// The computer moves first
    One,
    /// The computer moves second
    Two,
    /// Two humans, no computer
    Off,
}

impl AiSeat {
    pub fn player(&self) -> Option<Player> {
        return match self {
            AiSeat::One => Some(Player::One),
            AiSeat::Two => Some(Player::Two),
            AiSeat::Off => None,
        }
    }
}


#[derive(Parser, Debug)]
#[command(name = "mancala", about = "Play mancala against an iterative-deepening alpha-beta bot")]
pub struct Arguments {
    /// Pits on each side of the board
    #[arg(long, default_value_t = DEFAULT_PITS)]
    pub pits: usize,

    /// Stones initially in each pit
    #[arg(long, default_value_t = DEFAULT_STONES)]
    pub stones: u32,

    /// Which seat the computer plays
    #[arg(long, value_enum, default_value = "two")]
    pub ai_player: AiSeat,

    /// Shallowest depth the bot searches
    #[arg(long, short = 'd', default_value_t = 5)]
    pub depth: u32,

    /// Deepest depth the bot searches
    #[arg(long, default_value_t = MAX_DEPTH)]
    pub max_depth: u32,

    /// Thinking time per computer move, in milliseconds
    #[arg(long, short = 't', default_value_t = 2000)]
    pub think_ms: u64,

    /// Concurrent searches (defaults to every hardware thread)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Transposition memo: lossy, strict, or off
    #[arg(long, default_value = "lossy")]
    pub memo: MemoMode,

    /// Tolerance when matching a move's value to the best value
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    pub precision: f32,

    /// Landing in your own store does not grant another turn
    #[arg(long)]
    pub no_extra_turns: bool,

    /// Log search progress to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Arguments {
    pub fn search_config(&self) -> Result<SearchConfig, ValueError> {
        let config = SearchConfig::default()
            .with_min_depth(self.depth)
            .with_max_depth(self.max_depth)
            .with_think_time(Duration::from_millis(self.think_ms))
            .with_threads(self.threads)
            .with_memo_mode(self.memo)
            .with_precision(self.precision);
        config.validate()?;
        return Ok(config);
    }

    pub fn board(&self) -> Result<Mancala, ValueError> {
        return Ok(Mancala::with_size(self.pits, self.stones)?.with_extra_turns(!self.no_extra_turns));
    }
}


#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}


#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// Start a new game
    New {
        #[arg(long)]
        pits: Option<usize>,
        #[arg(long)]
        stones: Option<u32>,
        #[arg(long, value_enum)]
        ai: Option<AiSeat>,
        #[arg(long)]
        no_confirm: bool,
    },
    /// Print the board
    Board,
    /// List the legal pits for the player to move
    Moves,
    /// Sow from a pit (a bare pit number works too)
    Move {
        pit: usize,
    },
    /// Let the computer play for the player to move
    Ai,
    /// Ask the bot which pit it would play
    Suggest,
    /// Show how each depth of the last search went
    Stats,
    /// Show the bot's settings
    Config,
    /// Change the bot's settings
    Set {
        #[arg(long)]
        depth: Option<u32>,
        #[arg(long)]
        max_depth: Option<u32>,
        #[arg(long)]
        think_ms: Option<u64>,
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long)]
        memo: Option<MemoMode>,
    },
    /// Check fingerprints over every position a few moves ahead
    Audit {
        #[arg(default_value_t = 4, value_parser = clap::value_parser!(u32).range(0..=MAX_AUDIT_DEPTH as i64))]
        depth: u32,
    },
    /// Leave the game
    #[command(alias = "exit")]
    Quit,
}


/// Parses one shell line. A lone number is shorthand for `move <pit>`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, InputError> {
    let words = shell_words::split(line).map_err(|e| InputError::new(&e.to_string()))?;
    if words.is_empty() {
        return Ok(None);
    }
    if words.len() == 1 {
        if let Ok(pit) = words[0].parse::<usize>() {
            return Ok(Some(ShellCommand::Move { pit: pit }));
        }
    }
    let parsed = ShellLine::try_parse_from(words)?;
    return Ok(Some(parsed.command));
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_console_game() {
        let args = Arguments::try_parse_from(["mancala"]).unwrap();
        let config = args.search_config().unwrap();
        assert_eq!(config.min_depth, 5);
        assert_eq!(config.think_time, Duration::from_millis(2000));
        assert_eq!(args.ai_player.player(), Some(Player::Two));
        assert!(args.board().unwrap().extra_turns());
    }

    #[test]
    fn flags_reach_the_config() {
        let args = Arguments::try_parse_from(["mancala", "--depth", "3", "--think-ms", "250", "--memo", "strict", "--ai-player", "off", "--no-extra-turns"]).unwrap();
        let config = args.search_config().unwrap();
        assert_eq!(config.min_depth, 3);
        assert_eq!(config.memo_mode, MemoMode::Strict);
        assert_eq!(args.ai_player.player(), None);
        assert!(!args.board().unwrap().extra_turns());
    }

    #[test]
    fn bad_board_sizes_are_value_errors() {
        let args = Arguments::try_parse_from(["mancala", "--pits", "2"]).unwrap();
        assert!(args.board().is_err());
    }

    #[test]
    fn bare_numbers_are_moves() {
        assert_eq!(parse_command("3").unwrap(), Some(ShellCommand::Move { pit: 3 }));
        assert_eq!(parse_command("move 9").unwrap(), Some(ShellCommand::Move { pit: 9 }));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn subcommands_and_flags_parse() {
        assert_eq!(parse_command("exit").unwrap(), Some(ShellCommand::Quit));
        assert_eq!(parse_command("audit").unwrap(), Some(ShellCommand::Audit { depth: 4 }));
        assert_eq!(
            parse_command("set --depth 7 --memo off").unwrap(),
            Some(ShellCommand::Set { depth: Some(7), max_depth: None, think_ms: None, threads: None, memo: Some(MemoMode::Disabled) }),
        );
        assert_eq!(
            parse_command("new --ai one --no-confirm").unwrap(),
            Some(ShellCommand::New { pits: None, stones: None, ai: Some(AiSeat::One), no_confirm: true }),
        );
    }

    #[test]
    fn audit_depth_is_capped() {
        assert_eq!(parse_command("audit 8").unwrap(), Some(ShellCommand::Audit { depth: MAX_AUDIT_DEPTH }));
        assert!(parse_command("audit 9").is_err());
        assert!(parse_command("audit 40").is_err());
    }

    #[test]
    fn oversized_boards_are_value_errors() {
        let args = Arguments::try_parse_from(["mancala", "--stones", "4294967295"]).unwrap();
        assert!(args.board().is_err());
        assert!(parse_command("new --stones 4294967295").is_ok());
    }

    #[test]
    fn unknown_commands_are_errors() {
        assert!(parse_command("castle kingside").is_err());
        assert!(parse_command("move \"unterminated").is_err());
    }
}
