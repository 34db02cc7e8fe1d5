use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;
pub use random::*;

mod random;

/// Lays mines on a board that has none yet, keeping the first click and its neighbors clear.
pub trait MineGenerator {
    fn generate(self, board: &Board, start: Coord2, mines: CellCount) -> Board;
}

/// Whether `coords` is the clicked cell or one of its neighbors.
pub fn is_in_safe_zone(coords: Coord2, click: Coord2) -> bool {
    coords.0.abs_diff(click.0) <= 1 && coords.1.abs_diff(click.1) <= 1
}

/// Places `mine_count` mines uniformly at random outside the safe zone around `click` and recomputes neighbor counts.
///
/// When fewer cells are eligible than requested, every eligible cell gets a mine.
pub fn place_mines_after_first_click<R: Rng + ?Sized>(
    board: &Board,
    click: Coord2,
    mine_count: CellCount,
    rng: &mut R,
) -> Board {
    let (rows, cols) = board.size();
    let mut eligible: Vec<Coord2> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .filter(|&coords| !is_in_safe_zone(coords, click))
        .collect();

    let requested = usize::from(mine_count);
    if requested > eligible.len() {
        log::warn!(
            "Not enough room outside the safe zone, requested {} mines but only {} fit",
            requested,
            eligible.len()
        );
    }
    let amount = requested.min(eligible.len());

    // partial Fisher-Yates, the first `amount` entries are a uniform sample
    let (chosen, _) = eligible.partial_shuffle(rng, amount);

    let mut next = board.clone();
    for &coords in chosen.iter() {
        next.cell_mut(coords).is_mine = true;
    }
    next.recompute_neighbor_counts();

    log::debug!("placed {} mines around first click {:?}", amount, click);
    next
}
