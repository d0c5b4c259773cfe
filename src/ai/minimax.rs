//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The searching player is always the maximizer. Children are explored left
//! to right on private copies of the board, so the caller's board is never
//! touched and equal scores resolve to the leftmost column.

use serde::{Deserialize, Serialize};

use crate::game::{Board, Player, COLS};

use super::agent::Agent;
use super::heuristic::{Heuristic, WindowHeuristic};

/// Plies searched below each candidate move unless configured otherwise.
pub const DEFAULT_DEPTH: usize = 3;

/// Deepest search accepted from configuration.
pub const MAX_DEPTH: usize = 8;

/// Base score of a decided game under [`TerminalScoring::WinAware`].
pub const WIN_SCORE: i32 = 1_000_000;

const NEG_INFINITY: i32 = i32::MIN;
const INFINITY: i32 = i32::MAX;

/// How a position where someone has already won is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalScoring {
    /// Won positions get the static evaluation like any other leaf, so a win
    /// found deep in the tree is worth the same as an equal heuristic lead.
    #[default]
    Heuristic,
    /// Won positions score `±(WIN_SCORE + remaining depth)`: quicker wins and
    /// slower losses are preferred, and no heuristic lead outweighs either.
    WinAware,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched after each candidate root move.
    pub depth: usize,
    pub terminal_scoring: TerminalScoring,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            terminal_scoring: TerminalScoring::Heuristic,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: usize) -> Self {
        SearchConfig {
            depth,
            ..Self::default()
        }
    }
}

/// Outcome of one move-selection call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Chosen column, `None` on a full board.
    pub column: Option<usize>,
    /// Score of every root column; `None` for columns that were not playable.
    pub scores: [Option<i32>; COLS],
    /// Positions visited, root children included.
    pub nodes: u64,
}

/// One search call's worth of state. Lives on the stack of the caller.
struct Search<'h> {
    heuristic: &'h dyn Heuristic,
    scoring: TerminalScoring,
    player: Player,
    nodes: u64,
}

impl<'h> Search<'h> {
    fn new(heuristic: &'h dyn Heuristic, scoring: TerminalScoring, player: Player) -> Self {
        Search {
            heuristic,
            scoring,
            player,
            nodes: 0,
        }
    }

    /// Score for positions where the search stops, or `None` to keep going.
    fn leaf_score(&self, board: &Board, depth: usize) -> Option<i32> {
        match self.scoring {
            TerminalScoring::Heuristic => {
                let stop = depth == 0
                    || board.check_win(Player::Red)
                    || board.check_win(Player::Yellow)
                    || board.is_full();
                stop.then(|| self.heuristic.evaluate(board, self.player))
            }
            TerminalScoring::WinAware => {
                let bonus = WIN_SCORE.saturating_add(depth as i32);
                if board.check_win(self.player) {
                    Some(bonus)
                } else if board.check_win(self.player.other()) {
                    Some(-bonus)
                } else if depth == 0 || board.is_full() {
                    Some(self.heuristic.evaluate(board, self.player))
                } else {
                    None
                }
            }
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;
        if let Some(score) = self.leaf_score(board, depth) {
            return score;
        }

        if maximizing {
            let mut max_eval = NEG_INFINITY;
            for col in board.legal_columns() {
                let Some(child) = board.with_move(col, self.player) else {
                    continue;
                };
                let eval = self.minimax(&child, depth - 1, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let opponent = self.player.other();
            let mut min_eval = INFINITY;
            for col in board.legal_columns() {
                let Some(child) = board.with_move(col, opponent) else {
                    continue;
                };
                let eval = self.minimax(&child, depth - 1, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }

    /// Try every legal column for the searching player and keep the strictly
    /// best one, so the leftmost column wins ties.
    fn choose(&mut self, board: &Board, depth: usize) -> SearchReport {
        let mut scores = [None; COLS];
        let mut best: Option<(usize, i32)> = None;

        for col in board.legal_columns() {
            let Some(child) = board.with_move(col, self.player) else {
                continue;
            };
            let score = self.minimax(&child, depth, NEG_INFINITY, INFINITY, false);
            tracing::trace!(column = col, score, "root move scored");
            scores[col] = Some(score);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }

        SearchReport {
            column: best.map(|(col, _)| col),
            scores,
            nodes: self.nodes,
        }
    }
}

/// Score `board` for `player` by searching `depth` more plies.
///
/// `maximizing` says whose turn it is: `true` for `player`, `false` for the
/// opponent. Uses the default window heuristic and scores won positions with
/// it too.
pub fn minimax(
    board: &Board,
    depth: usize,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    player: Player,
) -> i32 {
    let heuristic = WindowHeuristic::default();
    Search::new(&heuristic, TerminalScoring::Heuristic, player)
        .minimax(board, depth, alpha, beta, maximizing)
}

/// Best column for `player` with the default heuristic, or `None` if the board
/// is full.
pub fn choose_move(board: &Board, player: Player, depth: usize) -> Option<usize> {
    let heuristic = WindowHeuristic::default();
    search(&heuristic, SearchConfig::with_depth(depth), board, player).column
}

/// Run a full move-selection call and report every root score.
pub fn search(
    heuristic: &dyn Heuristic,
    config: SearchConfig,
    board: &Board,
    player: Player,
) -> SearchReport {
    let report = Search::new(heuristic, config.terminal_scoring, player).choose(board, config.depth);
    tracing::debug!(
        player = player.name(),
        depth = config.depth,
        column = ?report.column,
        nodes = report.nodes,
        "minimax search finished"
    );
    report
}

/// Minimax agent with alpha-beta pruning.
pub struct MinimaxAgent {
    config: SearchConfig,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        Self::with_config(SearchConfig::with_depth(depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        MinimaxAgent {
            config,
            heuristic: Box::new(WindowHeuristic::default()),
        }
    }

    pub fn with_heuristic(config: SearchConfig, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent { config, heuristic }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `board` for `player` and return the full report.
    pub fn analyze(&self, board: &Board, player: Player) -> SearchReport {
        search(self.heuristic.as_ref(), self.config, board, player)
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize> {
        self.analyze(board, player).column
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::heuristic::evaluate_board;
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, GameState, ROWS};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Same tree as `Search::minimax` but without pruning. Returns the score
    /// and the number of positions visited.
    fn plain_minimax(board: &Board, depth: usize, maximizing: bool, player: Player) -> (i32, u64) {
        if depth == 0
            || board.check_win(Player::Red)
            || board.check_win(Player::Yellow)
            || board.is_full()
        {
            return (evaluate_board(board, player), 1);
        }
        let mover = if maximizing { player } else { player.other() };
        let mut nodes = 1;
        let mut best = if maximizing { NEG_INFINITY } else { INFINITY };
        for col in board.legal_columns() {
            let child = board.with_move(col, mover).unwrap();
            let (score, n) = plain_minimax(&child, depth - 1, !maximizing, player);
            nodes += n;
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        (best, nodes)
    }

    fn random_board(rng: &mut StdRng) -> Board {
        let mut board = Board::new();
        let mut player = Player::Red;
        let moves = rng.random_range(0..24);
        for _ in 0..moves {
            let legal: Vec<usize> = board.legal_columns().collect();
            if legal.is_empty() || board.check_win(player.other()) {
                break;
            }
            let col = legal[rng.random_range(0..legal.len())];
            board.drop_piece(col, player).unwrap();
            player = player.other();
        }
        board
    }

    /// Red holds the bottom row at cols 1..=3 with both ends open.
    fn red_open_three() -> Board {
        let mut board = Board::new();
        for col in [1, 2, 3] {
            board.drop_piece(col, Player::Red).unwrap();
        }
        for col in [6, 6, 5] {
            board.drop_piece(col, Player::Yellow).unwrap();
        }
        board
    }

    /// Yellow holds the bottom row at cols 0..=2; only col 3 completes it.
    fn yellow_threatens_col_three() -> Board {
        let mut board = Board::new();
        for col in [0, 1, 2] {
            board.drop_piece(col, Player::Yellow).unwrap();
        }
        for col in [6, 6, 5] {
            board.drop_piece(col, Player::Red).unwrap();
        }
        board
    }

    // --- Move selector ---

    #[test]
    fn empty_board_picks_a_column() {
        let board = Board::new();
        let first = choose_move(&board, Player::Red, DEFAULT_DEPTH);
        assert_eq!(first, Some(2));
        for _ in 0..3 {
            assert_eq!(choose_move(&board, Player::Red, DEFAULT_DEPTH), first);
        }
    }

    #[test]
    fn empty_board_by_depth() {
        let board = Board::new();
        let picks: Vec<Option<usize>> = (0..=4)
            .map(|depth| choose_move(&board, Player::Yellow, depth))
            .collect();
        assert_eq!(picks, vec![Some(0), Some(0), Some(0), Some(2), Some(2)]);
    }

    #[test]
    fn full_board_has_no_move() {
        let state = GameState::from_moves(&[
            0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, //
            2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, //
            4, 5, 4, 5, 4, 5, 5, 4, 5, 4, 5, 4, //
            6, 6, 6, 6, 6, 6,
        ])
        .unwrap();
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
        assert_eq!(choose_move(state.board(), Player::Red, 3), None);
        let report = MinimaxAgent::new(3).analyze(state.board(), Player::Red);
        assert_eq!(report.scores, [None; COLS]);
        assert_eq!(report.nodes, 0);
    }

    #[test]
    fn single_open_column_is_chosen() {
        let mut board = Board::new();
        for col in 0..COLS - 1 {
            for row in 0..ROWS {
                let player = if (row + col / 2) % 2 == 0 { Player::Red } else { Player::Yellow };
                board.drop_piece(col, player).unwrap();
            }
        }
        assert_eq!(choose_move(&board, Player::Yellow, 3), Some(COLS - 1));
    }

    #[test]
    fn caller_board_is_unchanged() {
        let board = red_open_three();
        let before = board;
        let _ = choose_move(&board, Player::Red, 4);
        let _ = minimax(&board, 3, NEG_INFINITY, INFINITY, true, Player::Yellow);
        assert_eq!(board, before);
    }

    #[test]
    fn takes_winning_move() {
        let board = red_open_three();
        for depth in 1..=3 {
            let col = choose_move(&board, Player::Red, depth).unwrap();
            assert_eq!(col, 0, "depth {depth}");
            assert!(board.with_move(col, Player::Red).unwrap().check_win(Player::Red));
        }
    }

    #[test]
    fn root_scores_at_depth_one() {
        let report = MinimaxAgent::new(1).analyze(&red_open_three(), Player::Red);
        let scores: Vec<i32> = report.scores.iter().map(|s| s.unwrap()).collect();
        assert_eq!(scores, vec![103, 4, 8, 7, 103, 3, 4]);
        // both winning ends tie; the leftmost is kept
        assert_eq!(report.column, Some(0));
    }

    #[test]
    fn heuristic_scoring_can_prefer_a_slower_line() {
        // At depth 4 a quiet move that still wins later scores higher than
        // the immediate win, because won positions are scored statically.
        let board = red_open_three();
        assert_eq!(choose_move(&board, Player::Red, 4), Some(2));
    }

    #[test]
    fn win_aware_takes_win_at_every_depth() {
        let board = red_open_three();
        for depth in 1..=5 {
            let mut agent = MinimaxAgent::with_config(SearchConfig {
                depth,
                terminal_scoring: TerminalScoring::WinAware,
            });
            let col = agent.select_column(&board, Player::Red).unwrap();
            assert!(
                board.with_move(col, Player::Red).unwrap().check_win(Player::Red),
                "depth {depth} picked non-winning column {col}"
            );
        }
    }

    #[test]
    fn win_aware_prefers_faster_win() {
        let agent = MinimaxAgent::with_config(SearchConfig {
            depth: 3,
            terminal_scoring: TerminalScoring::WinAware,
        });
        let report = agent.analyze(&red_open_three(), Player::Red);
        assert_eq!(report.scores[0], Some(WIN_SCORE + 3));
        assert_eq!(report.scores[2], Some(WIN_SCORE + 1));
    }

    #[test]
    fn blocks_opponent_win() {
        let board = yellow_threatens_col_three();
        for depth in 1..=4 {
            assert_eq!(choose_move(&board, Player::Red, depth), Some(3), "depth {depth}");
        }
    }

    #[test]
    fn win_aware_blocks_opponent_win() {
        let board = yellow_threatens_col_three();
        let agent = MinimaxAgent::with_config(SearchConfig {
            depth: 2,
            terminal_scoring: TerminalScoring::WinAware,
        });
        let report = agent.analyze(&board, Player::Red);
        assert_eq!(report.column, Some(3));
        assert_eq!(report.scores[0], Some(-(WIN_SCORE + 1)));
    }

    #[test]
    fn player_roles_are_symmetric() {
        // Swap colours on the blocking board: Yellow must now block Red.
        let mut board = Board::new();
        for col in [0, 1, 2] {
            board.drop_piece(col, Player::Red).unwrap();
        }
        for col in [6, 6, 5] {
            board.drop_piece(col, Player::Yellow).unwrap();
        }
        assert_eq!(choose_move(&board, Player::Yellow, 2), Some(3));
    }

    // --- Search engine ---

    #[test]
    fn depth_zero_is_static_eval() {
        let board = red_open_three();
        for maximizing in [true, false] {
            assert_eq!(
                minimax(&board, 0, NEG_INFINITY, INFINITY, maximizing, Player::Red),
                evaluate_board(&board, Player::Red)
            );
        }
    }

    #[test]
    fn won_position_is_static_eval() {
        let mut board = red_open_three();
        board.drop_piece(0, Player::Red).unwrap();
        assert_eq!(
            minimax(&board, 3, NEG_INFINITY, INFINITY, false, Player::Red),
            evaluate_board(&board, Player::Red)
        );
    }

    #[test]
    fn pruning_matches_plain_minimax() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..40 {
            let board = random_board(&mut rng);
            for depth in 0..=3 {
                for player in [Player::Red, Player::Yellow] {
                    for maximizing in [true, false] {
                        let pruned =
                            minimax(&board, depth, NEG_INFINITY, INFINITY, maximizing, player);
                        let (plain, _) = plain_minimax(&board, depth, maximizing, player);
                        assert_eq!(pruned, plain, "depth {depth} {player:?} max={maximizing}\n{board}");
                    }
                }
            }
        }
    }

    #[test]
    fn pruning_matches_plain_root_choice() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let board = random_board(&mut rng);
            let player = Player::Red;
            let mut plain_best: Option<(usize, i32)> = None;
            for col in board.legal_columns() {
                let child = board.with_move(col, player).unwrap();
                let (score, _) = plain_minimax(&child, 2, false, player);
                if plain_best.map_or(true, |(_, best)| score > best) {
                    plain_best = Some((col, score));
                }
            }
            assert_eq!(
                choose_move(&board, player, 2),
                plain_best.map(|(col, _)| col),
                "\n{board}"
            );
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let board = Board::new();
        let report = MinimaxAgent::new(4).analyze(&board, Player::Red);
        let plain_nodes: u64 = board
            .legal_columns()
            .map(|col| plain_minimax(&board.with_move(col, Player::Red).unwrap(), 4, false, Player::Red).1)
            .sum();
        assert!(
            report.nodes < plain_nodes,
            "pruned {} vs plain {plain_nodes}",
            report.nodes
        );
    }

    // --- Agent ---

    #[test]
    fn selects_legal_action() {
        let mut agent = MinimaxAgent::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let board = random_board(&mut rng);
            match agent.select_column(&board, Player::Yellow) {
                Some(col) => assert!(board.valid_move(col)),
                None => assert!(board.is_full()),
            }
        }
    }

    #[test]
    fn name_is_minimax() {
        let agent = MinimaxAgent::new(2);
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.config().depth, 2);
    }

    #[test]
    fn full_game_vs_random_completes() {
        let mut minimax = MinimaxAgent::new(2);
        let mut random = RandomAgent::with_seed(5);
        let mut state = GameState::initial();

        while !state.is_terminal() {
            let board = *state.board();
            let player = state.current_player();
            let col = if player == Player::Red {
                minimax.select_column(&board, player)
            } else {
                random.select_column(&board, player)
            };
            state = state.apply_move(col.unwrap()).unwrap();
        }

        assert!(state.outcome().is_some());
    }
}
