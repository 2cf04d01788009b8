use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No cell revealed yet, flags may already be placed
    #[default]
    NotStarted,
    /// Timer running
    InProgress,
    /// Every safe cell revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Outcome {
        use GameState::*;
        match self {
            NotStarted | InProgress => Outcome::None,
            Won => Outcome::Won,
            Lost => Outcome::Lost,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    None,
    Won,
    Lost,
}

/// What a single click did to the session
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    FlagChanged,
    Revealed,
    Won,
    Lost,
}

impl ClickOutcome {
    /// Whether the front-end needs to redraw
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Starts a game on a `rows`x`cols` board with `mines` randomly placed mines.
pub fn new_game(rows: Coord, cols: Coord, mines: CellCount) -> Result<GameSession> {
    GameSession::new(GameConfig::new(rows, cols, mines)?)
}

/// One game from the first click to win or loss. Restarting means building a new session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    board: Board,
    state: GameState,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    move_count: u32,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_entropy())
    }

    pub fn with_generator<G: MineGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        Ok(Self::from_board(generate_board(config, generator)?))
    }

    /// Wraps an already numbered board.
    pub fn from_board(board: Board) -> Self {
        debug_assert_eq!(board.phase(), BoardPhase::Numbered);
        Self {
            board,
            state: GameState::NotStarted,
            started_at: None,
            ended_at: None,
            move_count: 0,
        }
    }

    /// Fresh session with the same configuration and a new random layout.
    pub fn restart(&self) -> Result<Self> {
        log::debug!("restarting {:?}", self.config());
        Self::new(self.config())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.board.flags_remaining()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Instant::now())
    }

    /// Whole seconds since the first reveal, 0 before it and frozen once the game ended.
    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or(now)
                .saturating_duration_since(started_at)
                .as_secs(),
            None => 0,
        }
    }

    pub fn on_cell_click(
        &mut self,
        row: Coord,
        col: Coord,
        flag_mode: bool,
    ) -> Result<ClickOutcome> {
        self.on_cell_click_at(row, col, flag_mode, Instant::now())
    }

    /// Applies one click. `flag_mode` toggles a flag instead of revealing.
    ///
    /// Clicks on a finished game and clicks the board refuses are reported as `NoChange`,
    /// only coordinates outside the board are an error.
    pub fn on_cell_click_at(
        &mut self,
        row: Coord,
        col: Coord,
        flag_mode: bool,
        now: Instant,
    ) -> Result<ClickOutcome> {
        let coords = self.board.validate_coords((row, col))?;

        if self.state.is_finished() {
            log::trace!("ignoring click at {:?}, game is over", coords);
            return Ok(ClickOutcome::NoChange);
        }

        let outcome = if flag_mode {
            match self.board.toggle_flag(coords)? {
                MarkOutcome::Changed => ClickOutcome::FlagChanged,
                MarkOutcome::NoChange => ClickOutcome::NoChange,
            }
        } else {
            match self.board.reveal(coords)? {
                RevealOutcome::NoChange => ClickOutcome::NoChange,
                RevealOutcome::HitMine => {
                    self.mark_started(now);
                    self.end_game(false, now);
                    ClickOutcome::Lost
                }
                RevealOutcome::Revealed => {
                    self.mark_started(now);
                    if self.board.check_win_condition() {
                        self.end_game(true, now);
                        ClickOutcome::Won
                    } else {
                        ClickOutcome::Revealed
                    }
                }
            }
        };

        if outcome.has_update() {
            self.move_count += 1;
        }
        Ok(outcome)
    }

    /// View of one cell, mine status is only exposed once revealed or after the game ended.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.board.validate_coords(coords)?;
        Ok(CellView::new(coords, self.board.cell_at(coords), self.is_over()))
    }

    /// All cell views in row-major order.
    pub fn cell_views(&self) -> impl Iterator<Item = CellView> + '_ {
        let game_over = self.is_over();
        self.board
            .iter_cells()
            .map(move |(coords, cell)| CellView::new(coords, cell, game_over))
    }

    pub fn hud(&self) -> HudView {
        self.hud_at(Instant::now())
    }

    pub fn hud_at(&self, now: Instant) -> HudView {
        HudView {
            flags_remaining: self.flags_remaining(),
            elapsed_secs: self.elapsed_secs_at(now),
            is_over: self.is_over(),
            outcome: self.outcome(),
        }
    }

    /// Checks if the state is initial and changes to in-progress recording the start time
    fn mark_started(&mut self, now: Instant) {
        if self.state.is_initial() {
            log::debug!("game started");
            self.started_at = Some(now);
            self.state = GameState::InProgress;
        }
    }

    fn end_game(&mut self, won: bool, now: Instant) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        self.ended_at = Some(now);
        log::debug!(
            "game ended after {} moves: {:?}",
            self.move_count + 1,
            self.state
        );
    }
}
