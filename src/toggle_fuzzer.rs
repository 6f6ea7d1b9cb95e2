// Randomized click storms. After any input sequence, the board has to stay
// internally consistent and round-trip through the save format.

use nonoboard::board::{Board, Button, CellState, ClickOptions, ToggleMode};
use nonoboard::line_check::runs_of;
use nonoboard::save;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_options(rng: &mut StdRng) -> ClickOptions {
    ClickOptions {
        mode: if rng.gen_bool(0.5) {
            ToggleMode::ThreeState
        } else {
            ToggleMode::TwoState
        },
        tentative: rng.gen_bool(0.25),
    }
}

fn random_button(rng: &mut StdRng) -> Button {
    if rng.gen_bool(0.5) {
        Button::Left
    } else {
        Button::Right
    }
}

// An independent runs computation to check `runs_of` against.
fn naive_runs(board: &Board, row: usize) -> Vec<u16> {
    let mut runs = vec![];
    let mut run: u16 = 0;
    for col in 0..board.n_cols() {
        if board.get(row, col).unwrap().state == CellState::Filled {
            run += 1;
        } else {
            if run > 0 {
                runs.push(run);
            }
            run = 0;
        }
    }
    if run > 0 {
        runs.push(run);
    }
    runs
}

#[test]
fn click_storm_invariants() {
    let mut rng = StdRng::seed_from_u64(0x6e6f6e6f);

    for _trial in 0..300 {
        let rows = rng.gen_range(1..=12);
        let cols = rng.gen_range(1..=12);
        let mut board = Board::new(rows, cols).unwrap();

        for _ in 0..rng.gen_range(0..250) {
            let opts = random_options(&mut rng);
            board
                .toggle(
                    rng.gen_range(0..rows),
                    rng.gen_range(0..cols),
                    random_button(&mut rng),
                    &opts,
                )
                .expect("in-bounds toggle can't fail");
        }

        // Tentative-empty is unreachable.
        for cell in board.cells() {
            assert!(!(cell.tentative && cell.state == CellState::Empty));
        }

        // Runs are positive, and fit in the lane with their gaps.
        for row in 0..rows {
            let runs = runs_of(board.row(row));
            assert_eq!(runs, naive_runs(&board, row));
            assert!(runs.iter().all(|len| *len > 0));
            let needed =
                runs.iter().map(|len| *len as usize).sum::<usize>() + runs.len().saturating_sub(1);
            assert!(needed <= cols);
        }

        // Every reachable board round-trips through the save format.
        let restored = save::deserialize(&save::serialize(&board)).unwrap();
        assert_eq!(restored, board);
    }
}

#[test]
fn full_cycles_are_identities() {
    let mut rng = StdRng::seed_from_u64(17);

    for _trial in 0..100 {
        let mut board = Board::new(4, 4).unwrap();

        // Scatter some ink first.
        for _ in 0..rng.gen_range(0..20) {
            let opts = random_options(&mut rng);
            board
                .toggle(
                    rng.gen_range(0..4),
                    rng.gen_range(0..4),
                    random_button(&mut rng),
                    &opts,
                )
                .unwrap();
        }

        let row = rng.gen_range(0..4);
        let col = rng.gen_range(0..4);
        let tentative = board.get(row, col).unwrap().tentative;
        let before = board.clone();

        // A full left-click cycle lands back on the same state (the
        // tentative flag follows the clicks, so compare states).
        let opts = ClickOptions {
            mode: ToggleMode::ThreeState,
            tentative,
        };
        for _ in 0..3 {
            board.toggle(row, col, Button::Left, &opts).unwrap();
        }
        assert_eq!(
            board.get(row, col).unwrap().state,
            before.get(row, col).unwrap().state
        );

        // Two right clicks likewise return Empty/Marked cells to themselves.
        let mut board = before.clone();
        if board.get(row, col).unwrap().state != CellState::Filled {
            for _ in 0..2 {
                board.toggle(row, col, Button::Right, &opts).unwrap();
            }
            assert_eq!(
                board.get(row, col).unwrap().state,
                before.get(row, col).unwrap().state
            );
        }
    }
}
