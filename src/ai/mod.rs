mod agent;
pub mod heuristic;
pub mod minimax;
mod random;
pub mod rules;

pub use agent::Agent;
pub use heuristic::{evaluate_board, evaluate_window, Heuristic, WindowHeuristic, WindowWeights};
pub use minimax::{
    choose_move, minimax, search, MinimaxAgent, SearchConfig, SearchReport, TerminalScoring,
    DEFAULT_DEPTH, MAX_DEPTH,
};
pub use random::RandomAgent;
pub use rules::RuleBasedAgent;
