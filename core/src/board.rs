use ndarray::Array2;
use rand::Rng;
use std::collections::VecDeque;

use crate::*;

/// Setup progress of a board, mines must be placed and numbered before any reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoardPhase {
    #[default]
    Empty,
    Mined,
    Numbered,
}

/// Grid of cells with its mine count and the derived flag/reveal counters.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    flagged_count: CellCount,
    revealed_count: CellCount,
    phase: BoardPhase,
}

impl Board {
    /// Allocates `rows`x`cols` covered cells without any mines.
    pub fn new(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        let config = GameConfig::new(rows, cols, mine_count)?;
        Ok(Self::from_config(config))
    }

    pub(crate) fn from_config(config: GameConfig) -> Self {
        Self {
            cells: Array2::default(config.size().to_nd_index()),
            mine_count: config.mines,
            flagged_count: 0,
            revealed_count: 0,
            phase: BoardPhase::Empty,
        }
    }

    /// Builds a fully numbered board with mines at exactly `mine_coords`, duplicates are merged.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &(row, col) in mine_coords {
            if row >= size.0 || col >= size.1 {
                return Err(GameError::InvalidCoords { row, col });
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }
        // at most Coord::MAX squared, always fits
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        let mut board = Self::new(size.0, size.1, mine_count)?;
        board.place_mines_at(mine_coords)?;
        board.compute_adjacency_numbers();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig::new_unchecked(rows, cols, self.mine_count)
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Flags still available, the flag supply equals the mine count.
    pub fn flags_remaining(&self) -> CellCount {
        self.mine_count - self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    /// Cell at `coords`, panics when out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_mine
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Places `mine_count` mines on distinct cells, uniformly at random.
    ///
    /// Sampling runs over the flat index space so the cost is bounded even for dense boards.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.check_empty()?;

        let cols = self.cells.ncols();
        let picks = rand::seq::index::sample(rng, self.cells.len(), self.mine_count.into());
        for index in picks.iter() {
            self.cells[[index / cols, index % cols]].is_mine = true;
        }

        self.phase = BoardPhase::Mined;
        log::debug!("placed {} mines on {:?} board", self.mine_count, self.size());
        Ok(())
    }

    /// Places mines on exactly the given cells, their distinct count must match the mine count.
    pub fn place_mines_at(&mut self, mine_coords: &[Coord2]) -> Result<()> {
        self.check_empty()?;

        let mut mine_mask: Array2<bool> = Array2::default(self.cells.raw_dim());
        for &coords in mine_coords {
            let coords = self.validate_coords(coords)?;
            mine_mask[coords.to_nd_index()] = true;
        }

        let placed = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        if placed != usize::from(self.mine_count) {
            let (rows, cols) = self.size();
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: placed as CellCount,
            });
        }

        self.cells
            .zip_mut_with(&mine_mask, |cell, &is_mine| cell.is_mine = is_mine);
        self.phase = BoardPhase::Mined;
        Ok(())
    }

    /// Counts the mines around every safe cell, neighbours outside the grid are skipped.
    pub fn compute_adjacency_numbers(&mut self) {
        if self.phase == BoardPhase::Empty {
            log::warn!("numbering a board without mines");
        }

        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.cells[coords.to_nd_index()].is_mine {
                    continue;
                }
                let count = self
                    .cells
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
                    .count();
                self.cells[coords.to_nd_index()].adjacent_mines = count as u8;
            }
        }

        self.phase = BoardPhase::Numbered;
    }

    /// Flips the flag on a covered cell.
    ///
    /// Revealed cells never take a flag, and a new flag is refused once the supply is used up.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let flags_remaining = self.flags_remaining();
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(if !cell.is_covered() {
            MarkOutcome::NoChange
        } else if cell.is_flagged {
            cell.is_flagged = false;
            self.flagged_count -= 1;
            MarkOutcome::Changed
        } else if flags_remaining == 0 {
            log::debug!("no flags left for {:?}", coords);
            MarkOutcome::NoChange
        } else {
            cell.is_flagged = true;
            self.flagged_count += 1;
            MarkOutcome::Changed
        })
    }

    /// Reveals a covered, unflagged cell and flood-fills from it when it has no adjacent mines.
    ///
    /// The flood stops at numbered cells and never uncovers flagged ones.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        debug_assert_eq!(
            self.phase,
            BoardPhase::Numbered,
            "reveal before mines were placed and numbered"
        );

        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }
        cell.is_revealed = true;
        let Cell {
            is_mine,
            adjacent_mines,
            ..
        } = *cell;
        self.revealed_count += 1;

        if is_mine {
            log::debug!("hit mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }
        log::debug!("reveal cell at {:?}, mine count: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_reveal(coords);
        }

        Ok(RevealOutcome::Revealed)
    }

    /// Worklist flood-fill. Cells are marked revealed before being queued, so each is queued once.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.cells.iter_neighbors(visit_coords) {
                let neighbor = &mut self.cells[pos.to_nd_index()];
                if !neighbor.is_hidden() {
                    continue;
                }
                debug_assert!(!neighbor.is_mine, "zero cell next to a mine at {:?}", pos);

                neighbor.is_revealed = true;
                let count = neighbor.adjacent_mines;
                self.revealed_count += 1;
                log::trace!("flood revealed cell at {:?}, mine count: {}", pos, count);

                if count == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    /// Won once every safe cell is revealed, flags play no part.
    pub fn check_win_condition(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    fn check_empty(&self) -> Result<()> {
        if self.phase == BoardPhase::Empty {
            Ok(())
        } else {
            log::warn!("refusing to place mines twice");
            Err(GameError::MinesAlreadyPlaced)
        }
    }
}
