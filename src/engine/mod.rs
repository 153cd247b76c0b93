pub mod deepening;
pub mod evaluation;
pub mod node;
pub mod scores;
pub mod search;
pub mod state;

pub use self::deepening::{get_move, DeepeningReport, DepthOutcome, DepthResult, IterativeDeepening};
pub use self::evaluation::Evaluator;
pub use self::node::SearchNode;
pub use self::search::{alpha_beta::AlphaBetaSearch, memo::MemoMode, minimax::MinimaxSearch, SearchParams, SearchReport, SearchStats};
pub use self::state::SearchableState;
