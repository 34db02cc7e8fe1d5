use minesweeper_core::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Board size, a click inside it, a mine request that may overflow the eligible cells, and a seed.
fn placement_input() -> impl Strategy<Value = (Coord2, Coord2, CellCount, u64)> {
    (1u8..=16, 1u8..=30).prop_flat_map(|(rows, cols)| {
        (
            Just((rows, cols)),
            (0..rows, 0..cols),
            0..=mult(rows, cols),
            any::<u64>(),
        )
    })
}

fn placed(size: Coord2, click: Coord2, mines: CellCount, seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    place_mines_after_first_click(&Board::empty(size.0, size.1), click, mines, &mut rng)
}

fn adjacent_mines(board: &Board, coords: Coord2) -> u8 {
    board
        .iter_neighbors(coords)
        .filter(|&pos| board[pos].is_mine())
        .count() as u8
}

proptest! {
    #[test]
    fn empty_board_is_fully_closed(rows in 1u8..=40, cols in 1u8..=40) {
        let board = Board::empty(rows, cols);

        prop_assert_eq!(board.iter_cells().count(), usize::from(rows) * usize::from(cols));
        for cell in board.iter_cells() {
            prop_assert!(!cell.is_mine() && !cell.is_revealed() && !cell.is_flagged());
        }
    }

    #[test]
    fn placement_respects_count_and_safe_zone((size, click, mines, seed) in placement_input()) {
        let board = placed(size, click, mines, seed);

        let eligible = board
            .iter_cells()
            .filter(|cell| !is_in_safe_zone(cell.pos(), click))
            .count();
        prop_assert_eq!(usize::from(board.mine_count()), usize::from(mines).min(eligible));

        for cell in board.iter_cells() {
            if cell.is_mine() {
                prop_assert!(!is_in_safe_zone(cell.pos(), click));
                prop_assert_eq!(cell.neighbor_count(), 0);
            } else {
                prop_assert_eq!(cell.neighbor_count(), adjacent_mines(&board, cell.pos()));
            }
        }
    }

    #[test]
    fn cascade_never_reveals_mines_it_was_not_aimed_at(
        (size, click, mines, seed) in placement_input(),
        target in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
    ) {
        let board = placed(size, click, mines, seed);
        let (board, outcome) = board.reveal_cascade(click);
        prop_assert!(!outcome.exploded());
        prop_assert!(board.iter_cells().all(|cell| !(cell.is_mine() && cell.is_revealed())));

        let target = (
            target.0.index(usize::from(size.0)) as Coord,
            target.1.index(usize::from(size.1)) as Coord,
        );
        let (next, outcome) = board.reveal_cascade(target);
        for cell in next.iter_cells().filter(|cell| cell.is_mine() && cell.is_revealed()) {
            prop_assert_eq!(cell.pos(), target);
            prop_assert!(outcome.exploded());
        }
    }

    #[test]
    fn win_iff_every_safe_cell_revealed(
        (size, click, mines, seed) in placement_input(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut board = placed(size, click, mines, seed).reveal_cascade(click).0;
        let safe: Vec<Coord2> = board
            .iter_cells()
            .filter(|cell| !cell.is_mine())
            .map(|cell| cell.pos())
            .collect();

        for pick in picks {
            board = board.reveal_cascade(*pick.get(&safe)).0;
            prop_assert_eq!(
                board.check_win(),
                board.revealed_safe_count() == board.safe_cell_count()
            );
        }
    }

    #[test]
    fn revealed_cells_ignore_flag_and_reveal((size, click, mines, seed) in placement_input()) {
        let (board, _) = placed(size, click, mines, seed).reveal_cascade(click);

        let (flagged, outcome) = board.toggle_flag(click);
        prop_assert!(!outcome.has_update());
        prop_assert!(!flagged[click].is_flagged());

        let (again, outcome) = board.reveal_cascade(click);
        prop_assert!(!outcome.exploded());
        prop_assert_eq!(again, board);
    }
}
