use proptest::prelude::*;
use sweeper_core::{
    Board, Cell, CellCount, ClickOutcome, Coord, Coord2, GameConfig, GameSession, GameState,
    NeighborIter, RandomMineGenerator,
};

#[derive(Debug, Clone)]
struct Scenario {
    config: GameConfig,
    seed: u64,
    clicks: Vec<(Coord, Coord, bool)>,
}

fn scenario(flag_clicks: bool) -> impl Strategy<Value = Scenario> {
    (1u8..=12, 1u8..=12).prop_flat_map(move |(rows, cols)| {
        let total = CellCount::from(rows) * CellCount::from(cols);
        let click = (
            0..rows,
            0..cols,
            if flag_clicks {
                any::<bool>().boxed()
            } else {
                Just(false).boxed()
            },
        );
        (
            0..total,
            any::<u64>(),
            prop::collection::vec(click, 0..40),
        )
            .prop_map(move |(mines, seed, clicks)| Scenario {
                config: GameConfig::new_unchecked(rows, cols, mines),
                seed,
                clicks,
            })
    })
}

fn start(scenario: &Scenario) -> GameSession {
    GameSession::with_generator(scenario.config, RandomMineGenerator::new(scenario.seed)).unwrap()
}

fn count_cells(board: &Board, pred: impl Fn(&Cell) -> bool) -> usize {
    board.iter_cells().filter(|(_, cell)| pred(cell)).count()
}

fn check_board_invariants(board: &Board) -> Result<(), TestCaseError> {
    let mines = board.mine_count();

    prop_assert_eq!(count_cells(board, |c| c.is_mine), usize::from(mines));
    prop_assert_eq!(
        usize::from(board.flags_remaining()) + count_cells(board, |c| c.is_flagged),
        usize::from(mines)
    );
    prop_assert_eq!(
        count_cells(board, |c| c.is_revealed),
        usize::from(board.revealed_count())
    );
    prop_assert_eq!(count_cells(board, |c| c.is_revealed && c.is_flagged), 0);
    prop_assert_eq!(
        board.check_win_condition(),
        board.revealed_count() == board.total_cells() - mines
    );

    for (coords, cell) in board.iter_cells().filter(|(_, c)| !c.is_mine) {
        let expected = NeighborIter::new(coords, board.size())
            .filter(|&pos| board.has_mine_at(pos))
            .count();
        prop_assert_eq!(usize::from(cell.adjacent_mines), expected);
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_through_any_play(scenario in scenario(true)) {
        let mut session = start(&scenario);
        check_board_invariants(session.board())?;

        for &(row, col, flag_mode) in &scenario.clicks {
            let was_over = session.is_over();
            let before = session.board().clone();

            let outcome = session.on_cell_click(row, col, flag_mode).unwrap();

            if was_over {
                prop_assert_eq!(outcome, ClickOutcome::NoChange);
                prop_assert_eq!(session.board(), &before);
            }
            check_board_invariants(session.board())?;
        }
    }

    #[test]
    fn won_exactly_when_all_safe_cells_revealed(scenario in scenario(true)) {
        let mut session = start(&scenario);

        for &(row, col, flag_mode) in &scenario.clicks {
            session.on_cell_click(row, col, flag_mode).unwrap();

            let board = session.board();
            let safe_revealed = count_cells(board, |c| c.is_revealed && !c.is_mine);
            let mine_revealed = count_cells(board, |c| c.is_revealed && c.is_mine) > 0;
            let all_safe = safe_revealed == usize::from(board.safe_cell_count());

            prop_assert_eq!(session.state() == GameState::Lost, mine_revealed);
            prop_assert_eq!(session.state() == GameState::Won, all_safe && !mine_revealed);
        }
    }

    #[test]
    fn zero_regions_are_closed_without_flags(scenario in scenario(false)) {
        let mut session = start(&scenario);

        for &(row, col, _) in &scenario.clicks {
            session.on_cell_click(row, col, false).unwrap();
        }

        let board = session.board();
        for (coords, cell) in board.iter_cells() {
            if cell.is_revealed && !cell.is_mine && cell.adjacent_mines == 0 {
                for pos in NeighborIter::new(coords, board.size()) {
                    prop_assert!(board.cell_at(pos).is_revealed, "{:?} next to {:?}", pos, coords);
                }
            }
        }
    }

    #[test]
    fn reveal_order_does_not_change_the_result(scenario in scenario(false)) {
        let mut forward = start(&scenario);
        let mut backward = start(&scenario);
        let targets: Vec<Coord2> = forward
            .board()
            .iter_cells()
            .filter(|(_, cell)| !cell.is_mine)
            .map(|(coords, _)| coords)
            .collect();

        for &(row, col) in &targets {
            forward.on_cell_click(row, col, false).unwrap();
        }
        for &(row, col) in targets.iter().rev() {
            backward.on_cell_click(row, col, false).unwrap();
        }

        prop_assert_eq!(forward.board(), backward.board());
        prop_assert_eq!(forward.state(), GameState::Won);
    }
}
