// The macros are used in tests, but it can't see that.
#![allow(unused_macros)]

use ndarray::ArrayView1;

use crate::board::Cell;
use crate::puzzle::ClueEntry;

/// Run-lengths of maximal consecutive filled cells in one lane, in order.
/// `Marked` and `Empty` both count as gaps; the tentative flag doesn't
/// matter here.
pub fn runs_of(lane: ArrayView1<Cell>) -> Vec<u16> {
    let mut runs = vec![];
    let mut current: u16 = 0;
    for cell in lane {
        if cell.filled() {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

/// Whether a lane's runs match its clue exactly: same count, same lengths,
/// same order. The empty clue matches a lane with no filled cells.
pub fn line_satisfied(lane: ArrayView1<Cell>, clues: &[ClueEntry]) -> bool {
    let runs = runs_of(lane);
    runs.len() == clues.len() && runs.iter().zip(clues).all(|(run, clue)| *run == clue.len)
}

// Builds an Array1<Cell> from a picture: '.' empty, '#' filled, 'x' marked,
// uppercase for the tentative version.
macro_rules! lane {
    ($picture:expr) => {{
        use crate::board::{Cell, CellState};
        let cells: Vec<Cell> = $picture
            .chars()
            .map(|ch| {
                let (state, tentative) = match ch {
                    '.' => (CellState::Empty, false),
                    '#' => (CellState::Filled, false),
                    'F' => (CellState::Filled, true),
                    'x' => (CellState::Marked, false),
                    'X' => (CellState::Marked, true),
                    other => panic!("bad lane char {:?}", other),
                };
                Cell { state, tentative }
            })
            .collect();
        ndarray::Array1::from(cells)
    }};
}

macro_rules! clues {
    ($($raw:expr),*) => {
        vec![ $( crate::puzzle::ClueEntry::from_raw($raw).unwrap() ),* ]
    };
}

#[test]
fn runs_of_examples() {
    assert_eq!(runs_of(lane!("....").view()), Vec::<u16>::new());
    assert_eq!(runs_of(lane!("####").view()), vec![4]);
    assert_eq!(runs_of(lane!("##.#").view()), vec![2, 1]);
    assert_eq!(runs_of(lane!(".#.##.###").view()), vec![1, 2, 3]);

    // Marked cells split runs exactly like empty ones.
    assert_eq!(runs_of(lane!("##x#").view()), vec![2, 1]);
    assert_eq!(runs_of(lane!("xx..xx").view()), Vec::<u16>::new());

    // Tentative fills still count as filled.
    assert_eq!(runs_of(lane!("#F.FF").view()), vec![2, 2]);
}

#[test]
fn satisfied_examples() {
    assert!(line_satisfied(lane!("###..").view(), &clues![3]));
    assert!(line_satisfied(lane!(".###.").view(), &clues![3]));
    assert!(line_satisfied(lane!("#.##.###").view(), &clues![1, 2, 3]));

    // Wrong length, wrong order, extra or missing runs all fail.
    assert!(!line_satisfied(lane!("##...").view(), &clues![3]));
    assert!(!line_satisfied(lane!("##.#.").view(), &clues![1, 2]));
    assert!(!line_satisfied(lane!("###.#").view(), &clues![3]));
    assert!(!line_satisfied(lane!(".....").view(), &clues![3]));
}

#[test]
fn empty_clue_means_blank_lane() {
    assert!(line_satisfied(lane!("....").view(), &[]));
    assert!(line_satisfied(lane!("x.x.").view(), &[]));
    assert!(!line_satisfied(lane!("..#.").view(), &[]));
}

#[test]
fn slash_hints_are_cosmetic() {
    // -3 and 3 demand the same run.
    assert!(line_satisfied(lane!("###.").view(), &clues![-3]));
    assert!(line_satisfied(lane!("#.##").view(), &clues![-1, 2]));
    assert!(!line_satisfied(lane!("##..").view(), &clues![-3]));
}
