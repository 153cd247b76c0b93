#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod engine;
pub mod game;
pub mod interface;
pub mod rules;
pub mod testing;
pub mod util;

pub use engine::{get_move, Evaluator, IterativeDeepening, SearchableState};
pub use util::errors::SearchError;
