use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells. Every transforming operation returns a new board and leaves `self` untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: Coord2,
    cells: Array2<Cell>,
}

impl Board {
    /// Board with no mines and every cell closed. Both dimensions must be non-zero.
    pub fn empty(rows: Coord, cols: Coord) -> Self {
        let cells = Array2::from_shape_fn((usize::from(rows), usize::from(cols)), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });
        Self {
            size: (rows, cols),
            cells,
        }
    }

    /// Board with mines at exactly `mine_coords` and neighbor counts already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size.0, size.1);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.cells[coords.to_nd_index()].is_mine = true;
        }
        board.recompute_neighbor_counts();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn is_within_bounds(&self, (row, col): Coord2) -> bool {
        row < self.size.0 && col < self.size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_within_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Panics when `coords` is out of bounds, see [`Board::validate_coords`].
    pub fn cell(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(Cell::is_mine)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed && !cell.is_mine)
    }

    pub fn count_flags(&self) -> CellCount {
        self.count_where(Cell::is_flagged)
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).is_flagged)
            .count() as u8
    }

    /// True once every non-mine cell is revealed. Flags play no part.
    pub fn check_win(&self) -> bool {
        self.iter_cells().all(|cell| cell.is_mine || cell.is_revealed)
    }

    /// Flips the flag on a closed cell; revealed cells never change.
    pub fn toggle_flag(&self, coords: Coord2) -> (Self, MarkOutcome) {
        if self.cell(coords).is_revealed {
            return (self.clone(), MarkOutcome::NoChange);
        }

        let mut next = self.clone();
        let cell = next.cell_mut(coords);
        cell.is_flagged = !cell.is_flagged;
        (next, MarkOutcome::Changed)
    }

    /// Reveals every mine, leaving other cells as they are.
    pub fn reveal_all_mines(&self) -> Self {
        let mut next = self.clone();
        for cell in next.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
        next
    }

    /// Flags every mine, leaving other cells as they are.
    pub fn flag_all_mines(&self) -> Self {
        let mut next = self.clone();
        for cell in next.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_flagged = true;
        }
        next
    }

    pub(crate) fn recompute_neighbor_counts(&mut self) {
        let counts = Array2::from_shape_fn(self.cells.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if self.cell(coords).is_mine {
                0
            } else {
                self.iter_neighbors(coords)
                    .filter(|&pos| self.cell(pos).is_mine)
                    .count() as u8
            }
        });

        for (cell, &count) in self.cells.iter_mut().zip(counts.iter()) {
            cell.neighbor_count = count;
        }
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        // at most 255 * 255 cells
        self.iter_cells().filter(|&cell| predicate(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        self.cell(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_every_cell_closed_and_safe() {
        let board = Board::empty(4, 7);

        assert_eq!(board.size(), (4, 7));
        assert_eq!(board.iter_cells().count(), 28);
        for cell in board.iter_cells() {
            assert!(!cell.is_mine());
            assert!(!cell.is_revealed());
            assert!(!cell.is_flagged());
            assert_eq!(cell.neighbor_count(), 0);
        }
    }

    #[test]
    fn empty_board_cells_know_their_position() {
        let board = Board::empty(3, 5);

        assert_eq!(board[(2, 4)].pos(), (2, 4));
        assert_eq!(board[(0, 3)].pos(), (0, 3));
    }

    #[test]
    fn from_mine_coords_computes_neighbor_counts() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board[(1, 1)].neighbor_count(), 2);
        assert_eq!(board[(0, 1)].neighbor_count(), 1);
        assert_eq!(board[(0, 2)].neighbor_count(), 0);
        assert_eq!(board[(0, 0)].neighbor_count(), 0);
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn toggle_flag_flips_closed_cell_and_keeps_original() {
        let board = Board::empty(2, 2);

        let (flagged, outcome) = board.toggle_flag((0, 1));
        assert_eq!(outcome, MarkOutcome::Changed);
        assert!(flagged[(0, 1)].is_flagged());
        assert!(!board[(0, 1)].is_flagged());
        assert_eq!(flagged.count_flags(), 1);

        let (unflagged, outcome) = flagged.toggle_flag((0, 1));
        assert_eq!(outcome, MarkOutcome::Changed);
        assert_eq!(unflagged.count_flags(), 0);
    }

    #[test]
    fn toggle_flag_ignores_revealed_cell() {
        let (board, _) = Board::empty(2, 2).reveal_cascade((0, 0));

        let (next, outcome) = board.toggle_flag((1, 1));

        assert_eq!(outcome, MarkOutcome::NoChange);
        assert!(!outcome.has_update());
        assert_eq!(next, board);
    }

    #[test]
    fn check_win_ignores_flags() {
        let board = Board::from_mine_coords((1, 2), &[(0, 0)]).unwrap();
        assert!(!board.check_win());

        let (board, _) = board.reveal_cascade((0, 1));

        assert!(board.check_win());
        assert_eq!(board.count_flags(), 0);
        assert_eq!(board.revealed_safe_count(), board.safe_cell_count());
    }

    #[test]
    fn check_win_false_while_any_safe_cell_hidden() {
        let board = Board::from_mine_coords((1, 3), &[(0, 0)]).unwrap();
        let (board, _) = board.reveal_cascade((0, 1));

        assert!(!board.check_win());
    }

    #[test]
    fn terminal_transforms_only_touch_mines() {
        let board = Board::from_mine_coords((2, 2), &[(0, 0), (1, 1)]).unwrap();

        let exposed = board.reveal_all_mines();
        assert!(exposed[(0, 0)].is_revealed() && exposed[(1, 1)].is_revealed());
        assert!(!exposed[(0, 1)].is_revealed());

        let flagged = board.flag_all_mines();
        assert_eq!(flagged.count_flags(), 2);
        assert!(!flagged[(1, 0)].is_flagged());
    }

    #[test]
    fn count_flagged_neighbors_counts_adjacent_only() {
        let board = Board::empty(3, 3);
        let (board, _) = board.toggle_flag((0, 0));
        let (board, _) = board.toggle_flag((2, 2));

        assert_eq!(board.count_flagged_neighbors((1, 1)), 2);
        assert_eq!(board.count_flagged_neighbors((0, 1)), 1);
        assert_eq!(board.count_flagged_neighbors((0, 0)), 0);
    }
}
