//! Headless game loop: pits two agents against each other and tallies the
//! results.

use serde::{Deserialize, Serialize};

use crate::ai::{
    Agent, MinimaxAgent, RandomAgent, RuleBasedAgent, SearchConfig, WindowHeuristic, WindowWeights,
};
use crate::error::MatchError;
use crate::game::{Board, GameOutcome, GameState, Player};

/// Which strategy plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Minimax,
    Rules,
    Random,
}

impl AgentKind {
    /// Display name of the agents this kind builds.
    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Minimax => "Minimax",
            AgentKind::Rules => "Rules",
            AgentKind::Random => "Random",
        }
    }

    /// Build a fresh agent of this kind.
    pub fn build(self, search: SearchConfig, weights: WindowWeights, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            AgentKind::Minimax => Box::new(MinimaxAgent::with_heuristic(
                search,
                Box::new(WindowHeuristic::new(weights)),
            )),
            AgentKind::Rules => Box::new(RuleBasedAgent::new()),
            AgentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::with_seed(seed)),
                None => Box::new(RandomAgent::new()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play. Red always moves first.
    pub games: usize,
    pub red: AgentKind,
    pub yellow: AgentKind,
    /// Seed for random agents; unseeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            games: 10,
            red: AgentKind::Minimax,
            yellow: AgentKind::Random,
            seed: None,
        }
    }
}

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<usize>,
    pub outcome: GameOutcome,
    pub board: Board,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Running tally over a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub red: String,
    pub yellow: String,
    pub games: usize,
    pub red_wins: usize,
    pub yellow_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl MatchSummary {
    pub fn new(red: &str, yellow: &str) -> Self {
        MatchSummary {
            red: red.to_string(),
            yellow: yellow.to_string(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_moves += game.moves.len();
        match game.winner() {
            Some(Player::Red) => self.red_wins += 1,
            Some(Player::Yellow) => self.yellow_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn red_win_rate(&self) -> f64 {
        self.rate(self.red_wins)
    }

    pub fn yellow_win_rate(&self) -> f64 {
        self.rate(self.yellow_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Mean number of moves per game.
    pub fn average_length(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }

    fn rate(&self, count: usize) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        count as f64 / self.games as f64
    }
}

/// Play one game from the empty board. Red moves first.
pub fn play_game(red: &mut dyn Agent, yellow: &mut dyn Agent) -> Result<GameRecord, MatchError> {
    let mut state = GameState::initial();
    let mut moves = Vec::new();

    loop {
        if let Some(outcome) = state.outcome() {
            return Ok(GameRecord {
                moves,
                outcome,
                board: *state.board(),
            });
        }

        let player = state.current_player();
        let agent: &mut dyn Agent = match player {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };

        let board = *state.board();
        let column = agent
            .select_column(&board, player)
            .ok_or_else(|| MatchError::NoMove {
                agent: agent.name().to_string(),
                player,
            })?;
        state = state
            .apply_move(column)
            .map_err(|_| MatchError::IllegalColumn {
                agent: agent.name().to_string(),
                column,
                legal: state.legal_actions(),
            })?;
        tracing::trace!(player = player.name(), column, "move played");
        moves.push(column);
    }
}

/// Play `config.games` games between freshly built agents.
pub fn run_match(
    config: &MatchConfig,
    search: SearchConfig,
    weights: WindowWeights,
) -> Result<MatchSummary, MatchError> {
    let mut summary = MatchSummary::new(config.red.label(), config.yellow.label());

    for game in 0..config.games {
        let offset = 2 * game as u64;
        let mut red = config
            .red
            .build(search, weights, config.seed.map(|s| s.wrapping_add(offset)));
        let mut yellow = config
            .yellow
            .build(search, weights, config.seed.map(|s| s.wrapping_add(offset + 1)));

        let record = play_game(red.as_mut(), yellow.as_mut())?;
        tracing::info!(
            game = game + 1,
            moves = record.moves.len(),
            winner = record.winner().map_or("draw", Player::name),
            "game finished"
        );
        tracing::debug!("final position:\n{}", record.board);
        summary.record(&record);
    }

    Ok(summary)
}
