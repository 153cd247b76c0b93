use rustyline::error::ReadlineError;
use thiserror::Error;


#[derive(Clone, Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("search failed to complete in allotted time")]
    Timeout,
    #[error("no search finished before the deadline")]
    AllSearchesTimedOut,
    #[error("illegal action: {0}")]
    IllegalAction(String),
    #[error("search invariant violated: {0}")]
    LogicFault(String),
    #[error("invalid search configuration: {0}")]
    InvalidConfig(#[from] ValueError),
}

impl SearchError {
    pub fn is_timeout(&self) -> bool {
        return matches!(self, SearchError::Timeout | SearchError::AllSearchesTimedOut);
    }
}


#[derive(Clone, Debug, Error, PartialEq)]
#[error("Invalid argument: {msg}")]
pub struct ValueError {
    pub msg: String,
}

impl ValueError {
    pub fn new(msg: &str) -> ValueError {
        return ValueError {
            msg: String::from(msg)
        }
    }
}


#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("{0}")]
    Command(#[from] clap::Error),
    #[error("Could not read a line: {0}")]
    Readline(#[from] ReadlineError),
}

impl InputError {
    pub fn new(msg: &str) -> InputError {
        return InputError::Invalid(String::from(msg));
    }

    pub fn is_exit(&self) -> bool {
        return matches!(self, InputError::Readline(ReadlineError::Eof) | InputError::Readline(ReadlineError::Interrupted));
    }
}
