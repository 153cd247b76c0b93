use std::{fmt, sync::Arc, time::{Duration, Instant}};

use tracing::{debug, info, trace, warn};

use crate::{config::{SearchConfig, JOIN_GRACE}, util::{concurrency::pools::TaskSlots, errors::SearchError}};

use super::{evaluation::Evaluator, search::{alpha_beta::AlphaBetaSearch, SearchReport}, state::SearchableState};


#[derive(Clone, Debug, PartialEq)]
pub enum DepthOutcome {
    Completed { value: f32, nodes: u64, elapsed: Duration },
    TimedOut,
    Failed(String),
    /// Still running when the scheduler returned.
    Abandoned,
}

impl fmt::Display for DepthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DepthOutcome::Completed { .. } => write!(f, "completed"),
            DepthOutcome::TimedOut => write!(f, "timed out"),
            DepthOutcome::Failed(reason) => write!(f, "failed: {}", reason),
            DepthOutcome::Abandoned => write!(f, "abandoned"),
        }
    }
}


#[derive(Clone, Debug)]
pub struct DepthResult {
    pub depth: u32,
    pub outcome: DepthOutcome,
}


#[derive(Clone, Debug)]
pub struct DeepeningReport<A> {
    pub chosen: SearchReport<A>,
    /// One entry per launched depth, in launch order.
    pub depths: Vec<DepthResult>,
    pub elapsed: Duration,
}

impl<A> DeepeningReport<A> {
    pub fn depth(&self) -> u32 {
        return self.chosen.depth;
    }
}


type TaskResult<A> = (u32, Result<SearchReport<A>, SearchError>);


/// Races alpha-beta searches at increasing depths against one shared
/// deadline and keeps the deepest one that finished.
pub struct IterativeDeepening {
    config: SearchConfig,
}

impl IterativeDeepening {
    pub fn new(config: SearchConfig) -> Self {
        return Self { config: config };
    }

    pub fn config(&self) -> &SearchConfig {
        return &self.config;
    }

    pub fn get_move<S, E>(&self, state: &S, evaluator: Arc<E>) -> Result<S::Action, SearchError>
    where
        S: SearchableState + Send + Sync + 'static,
        S::Action: Send + 'static,
        E: Evaluator<S> + Send + Sync + ?Sized + 'static,
    {
        let report = self.search(state, evaluator)?;
        return report.chosen.action.ok_or_else(|| {
            SearchError::LogicFault(String::from("completed search returned no action"))
        });
    }

    pub fn search<S, E>(&self, state: &S, evaluator: Arc<E>) -> Result<DeepeningReport<S::Action>, SearchError>
    where
        S: SearchableState + Send + Sync + 'static,
        S::Action: Send + 'static,
        E: Evaluator<S> + Send + Sync + ?Sized + 'static,
    {
        self.config.validate()?;
        let start = Instant::now();
        let deadline = start.checked_add(self.config.think_time);
        let expired = || deadline.map_or(false, |d| Instant::now() >= d);
        let root = Arc::new(state.clone());
        let mut slots: TaskSlots<TaskResult<S::Action>> = TaskSlots::new(self.config.parallelism());
        let mut depths: Vec<DepthResult> = Vec::new();
        let mut reports: Vec<SearchReport<S::Action>> = Vec::new();
        let mut next_depth = self.config.min_depth.max(1);

        while !expired() && next_depth <= self.config.max_depth {
            if slots.has_free_slot() {
                match self.launch(&mut slots, &root, &evaluator, next_depth, start) {
                    Ok(()) => {
                        depths.push(DepthResult { depth: next_depth, outcome: DepthOutcome::Abandoned });
                        next_depth += 1;
                    },
                    Err(e) => {
                        warn!(depth = next_depth, error = %e, "could not start search thread");
                        break;
                    },
                }
                continue;
            }
            let received = match deadline {
                Some(d) => slots.recv_deadline(d),
                None => slots.recv(),
            };
            if let Some(result) = received {
                Self::record(result, &mut depths, &mut reports);
            }
        }

        // Searches poll the same deadline, so in-flight ones report soon after it.
        let drain_until = deadline.map(|d| d.max(Instant::now()) + JOIN_GRACE);
        while slots.in_flight() > 0 {
            let received = match drain_until {
                Some(d) => slots.recv_deadline(d),
                None => slots.recv(),
            };
            match received {
                Some(result) => Self::record(result, &mut depths, &mut reports),
                None => break,
            }
        }
        let abandoned = slots.detach();
        if abandoned > 0 {
            debug!(abandoned = abandoned, "left searches running past the deadline");
        }

        return match Self::deepest(reports) {
            Some(chosen) => {
                info!(depth = chosen.depth, value = chosen.value, launched = depths.len(), "selected deepest completed search");
                Ok(DeepeningReport { chosen: chosen, depths: depths, elapsed: start.elapsed() })
            },
            None => Err(SearchError::AllSearchesTimedOut),
        }
    }

    fn launch<S, E>(&self, slots: &mut TaskSlots<TaskResult<S::Action>>, root: &Arc<S>, evaluator: &Arc<E>, depth: u32, start: Instant) -> Result<(), std::io::Error>
    where
        S: SearchableState + Send + Sync + 'static,
        S::Action: Send + 'static,
        E: Evaluator<S> + Send + Sync + ?Sized + 'static,
    {
        let state = Arc::clone(root);
        let evaluator = Arc::clone(evaluator);
        let params = self.config.params_for_depth(depth);
        trace!(depth = depth, "launching search");
        return slots.spawn(format!("search-depth-{}", depth), Box::new(move || {
            (depth, AlphaBetaSearch::run(&*state, &*evaluator, &params, start))
        }));
    }

    /// Deepest completed search, whatever order the results arrived in.
    fn deepest<A>(reports: Vec<SearchReport<A>>) -> Option<SearchReport<A>> {
        return reports.into_iter().max_by_key(|r| r.depth);
    }

    fn record<A>(result: TaskResult<A>, depths: &mut Vec<DepthResult>, reports: &mut Vec<SearchReport<A>>) {
        let (depth, outcome) = result;
        let outcome = match outcome {
            Ok(report) if report.action.is_some() => {
                let completed = DepthOutcome::Completed { value: report.value, nodes: report.stats.nodes, elapsed: report.elapsed };
                reports.push(report);
                completed
            },
            Ok(_) => DepthOutcome::Failed(String::from("root position has no action to choose from")),
            Err(SearchError::Timeout) => DepthOutcome::TimedOut,
            Err(e) => {
                warn!(depth = depth, error = %e, "search failed");
                DepthOutcome::Failed(e.to_string())
            },
        };
        debug!(depth = depth, outcome = %outcome, "search finished");
        if let Some(entry) = depths.iter_mut().find(|d| d.depth == depth) {
            entry.outcome = outcome;
        }
    }
}


/// One-shot form of `IterativeDeepening::get_move` taking the search
/// parameters directly.
pub fn get_move<S, E>(state: &S, evaluator: Arc<E>, min_depth: u32, time_budget: Duration, compare_precision: f32) -> Result<S::Action, SearchError>
where
    S: SearchableState + Send + Sync + 'static,
    S::Action: Send + 'static,
    E: Evaluator<S> + Send + Sync + ?Sized + 'static,
{
    let config = SearchConfig::default()
        .with_min_depth(min_depth)
        .with_think_time(time_budget)
        .with_precision(compare_precision);
    return IterativeDeepening::new(config).get_move(state, evaluator);
}
