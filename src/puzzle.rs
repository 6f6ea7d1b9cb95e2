use std::convert::TryFrom;

use anyhow::{bail, Context};

use crate::board::Board;
use crate::line_check::line_satisfied;

/// One run in a row or column clue: `len` consecutive filled cells.
///
/// `slash_hint` is a display-only overlay (a little slash drawn next to the
/// number); it never affects satisfaction checking.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct ClueEntry {
    pub len: u16,
    pub slash_hint: bool,
}

impl ClueEntry {
    pub fn new(len: u16) -> ClueEntry {
        ClueEntry {
            len,
            slash_hint: false,
        }
    }

    /// Decodes the legacy signed convention: the magnitude is the run length,
    /// and a negative sign means "draw a slash next to this number".
    pub fn from_raw(raw: i32) -> anyhow::Result<ClueEntry> {
        if raw == 0 {
            bail!("clue runs must be nonzero (use an empty line for a blank lane)");
        }
        let len = u16::try_from(raw.unsigned_abs())
            .with_context(|| format!("clue run {} is too long", raw))?;
        Ok(ClueEntry {
            len,
            slash_hint: raw < 0,
        })
    }
}

/// Decodes one raw clue line. A lone `0` is the legacy spelling of
/// "no filled cells in this lane" and becomes the empty clue.
pub fn clue_line(raw: &[i32]) -> anyhow::Result<Vec<ClueEntry>> {
    if raw == [0] {
        return Ok(vec![]);
    }
    raw.iter().map(|&n| ClueEntry::from_raw(n)).collect()
}

/// The minimum lane length that can hold these runs: every adjacent pair of
/// runs needs at least one gap cell between them.
fn min_lane_len(clues: &[ClueEntry]) -> usize {
    if clues.is_empty() {
        return 0;
    }
    clues.iter().map(|c| c.len as usize).sum::<usize>() + (clues.len() - 1)
}

/// Row and column clues for one nonogram. Row clues read left-to-right,
/// column clues top-to-bottom.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Puzzle {
    pub rows: Vec<Vec<ClueEntry>>,
    pub cols: Vec<Vec<ClueEntry>>,
}

impl Puzzle {
    pub fn new(rows: Vec<Vec<ClueEntry>>, cols: Vec<Vec<ClueEntry>>) -> anyhow::Result<Puzzle> {
        if rows.is_empty() || cols.is_empty() {
            bail!(
                "puzzle must have at least one row and one column, got {}x{}",
                rows.len(),
                cols.len()
            );
        }
        for (idx, clues) in rows.iter().enumerate() {
            if min_lane_len(clues) > cols.len() {
                bail!("row {} clues don't fit in {} columns", idx + 1, cols.len());
            }
        }
        for (idx, clues) in cols.iter().enumerate() {
            if min_lane_len(clues) > rows.len() {
                bail!("column {} clues don't fit in {} rows", idx + 1, rows.len());
            }
        }
        Ok(Puzzle { rows, cols })
    }

    /// Builds a puzzle from the legacy signed-integer clue arrays.
    pub fn from_raw(rows: &[Vec<i32>], cols: &[Vec<i32>]) -> anyhow::Result<Puzzle> {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(idx, raw)| clue_line(raw).with_context(|| format!("row {}", idx + 1)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let cols = cols
            .iter()
            .enumerate()
            .map(|(idx, raw)| clue_line(raw).with_context(|| format!("column {}", idx + 1)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Puzzle::new(rows, cols)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.cols.len()
    }

    /// Whether `board` satisfies every row and column clue.
    ///
    /// A board whose dimensions don't match the puzzle is never solved.
    pub fn is_solved_by(&self, board: &Board) -> bool {
        if board.n_rows() != self.n_rows() || board.n_cols() != self.n_cols() {
            return false;
        }
        for (idx, clues) in self.rows.iter().enumerate() {
            if !line_satisfied(board.row(idx), clues) {
                return false;
            }
        }
        for (idx, clues) in self.cols.iter().enumerate() {
            if !line_satisfied(board.col(idx), clues) {
                return false;
            }
        }
        true
    }
}

#[test]
fn raw_clue_decoding() {
    assert_eq!(
        ClueEntry::from_raw(3).unwrap(),
        ClueEntry {
            len: 3,
            slash_hint: false
        }
    );
    // The sign is cosmetic metadata, not part of the run length.
    assert_eq!(
        ClueEntry::from_raw(-5).unwrap(),
        ClueEntry {
            len: 5,
            slash_hint: true
        }
    );
    assert!(ClueEntry::from_raw(0).is_err());

    assert_eq!(clue_line(&[0]).unwrap(), vec![]);
    assert_eq!(
        clue_line(&[1, -2]).unwrap(),
        vec![ClueEntry::new(1), ClueEntry::from_raw(-2).unwrap()]
    );
}

#[test]
fn puzzle_validation() {
    // [2, 2] needs 5 cells; only 4 columns here.
    let too_long = Puzzle::from_raw(
        &[vec![2, 2], vec![0], vec![0], vec![0]],
        &[vec![0], vec![0], vec![0], vec![0]],
    );
    assert!(too_long.is_err());

    assert!(Puzzle::new(vec![], vec![vec![]]).is_err());
    assert!(Puzzle::new(vec![vec![]], vec![]).is_err());

    // The same clues fit in 5 columns.
    assert!(Puzzle::from_raw(
        &[vec![2, 2], vec![0], vec![0], vec![0]],
        &[vec![1], vec![0], vec![0], vec![0], vec![1]],
    )
    .is_ok());
}

#[test]
fn minimal_solve_example() {
    use crate::board::CellState;

    // 1x3 board: row clue [3], each column clue [1].
    let puzzle = Puzzle::from_raw(&[vec![3]], &[vec![1], vec![1], vec![1]]).unwrap();
    let mut board = Board::new(1, 3).unwrap();

    assert!(!puzzle.is_solved_by(&board));

    for col in 0..3 {
        board.set(0, col, CellState::Filled).unwrap();
    }
    assert!(puzzle.is_solved_by(&board));

    // Any single missing cell breaks it.
    for col in 0..3 {
        let mut spoiled = board.clone();
        spoiled.set(0, col, CellState::Empty).unwrap();
        assert!(!puzzle.is_solved_by(&spoiled));
    }

    // A board of the wrong shape is never a solution.
    let wrong_shape = Board::new(3, 1).unwrap();
    assert!(!puzzle.is_solved_by(&wrong_shape));
}

#[test]
fn marked_cells_do_not_satisfy_clues() {
    use crate::board::CellState;

    let puzzle = Puzzle::from_raw(&[vec![1]], &[vec![1], vec![0]]).unwrap();
    let mut board = Board::new(1, 2).unwrap();

    board.set(0, 0, CellState::Marked).unwrap();
    assert!(!puzzle.is_solved_by(&board));

    board.set(0, 0, CellState::Filled).unwrap();
    assert!(puzzle.is_solved_by(&board));

    // A stray fill in the blank column unsolves it.
    board.set(0, 1, CellState::Filled).unwrap();
    assert!(!puzzle.is_solved_by(&board));
}
