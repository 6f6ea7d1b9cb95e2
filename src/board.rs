use derive_more::{Display, Error};
use ndarray::{Array2, ArrayView1};

/// The three semantic states a cell can be in. `Marked` is an explicit
/// "known not filled" hint, distinct from the default `Empty`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Empty,
    Filled,
    Marked,
}

impl Default for CellState {
    fn default() -> CellState {
        CellState::Empty
    }
}

/// One board cell. The `tentative` flag is the "pencil" overlay from the
/// original game: drawn differently, but a tentative fill still counts as
/// filled for clue checking.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub state: CellState,
    pub tentative: bool,
}

impl Cell {
    pub fn filled(&self) -> bool {
        self.state == CellState::Filled
    }
}

/// Which mouse button a click came from. The input collaborator translates
/// raw events into these; the board only sees the intent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    Left,
    Right,
}

/// The left-click cycle. Early versions of the game only flipped
/// empty/filled; `TwoState` reproduces that by skipping the `Marked` step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToggleMode {
    TwoState,
    ThreeState,
}

/// Per-click configuration, owned by the session and passed by reference.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClickOptions {
    pub mode: ToggleMode,
    pub tentative: bool,
}

impl Default for ClickOptions {
    fn default() -> ClickOptions {
        ClickOptions {
            mode: ToggleMode::ThreeState,
            tentative: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display("board dimensions must be positive, got {}x{}", rows, cols)]
    InvalidDimensions { rows: usize, cols: usize },
    #[display("cell ({}, {}) is outside a {}x{} board", row, col, rows, cols)]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// The grid of cells. Dimensions are fixed at construction; all mutation
/// goes through bounds-checked cell operations.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: Array2<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Board, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Board {
            grid: Array2::from_elem((rows, cols), Cell::default()),
        })
    }

    pub fn n_rows(&self) -> usize {
        self.grid.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.grid.ncols()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BoardError> {
        if row >= self.n_rows() || col >= self.n_cols() {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                rows: self.n_rows(),
                cols: self.n_cols(),
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        self.check_bounds(row, col)?;
        Ok(self.grid[(row, col)])
    }

    /// Overwrites the cell state, clearing any tentative flag.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), BoardError> {
        self.set_cell(
            row,
            col,
            Cell {
                state,
                tentative: false,
            },
        )
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), BoardError> {
        self.check_bounds(row, col)?;
        self.grid[(row, col)] = cell;
        Ok(())
    }

    /// Applies one click of the toggle cycle and returns the new state.
    ///
    /// The resulting cell carries `opts.tentative` unless it ended up
    /// `Empty` (there's nothing to pencil in).
    pub fn toggle(
        &mut self,
        row: usize,
        col: usize,
        button: Button,
        opts: &ClickOptions,
    ) -> Result<CellState, BoardError> {
        self.check_bounds(row, col)?;
        let next = next_state(self.grid[(row, col)].state, button, opts.mode);
        self.grid[(row, col)] = Cell {
            state: next,
            tentative: opts.tentative && next != CellState::Empty,
        };
        Ok(next)
    }

    pub fn row(&self, idx: usize) -> ArrayView1<Cell> {
        self.grid.row(idx)
    }

    pub fn col(&self, idx: usize) -> ArrayView1<Cell> {
        self.grid.column(idx)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    pub fn filled_count(&self) -> usize {
        self.grid.iter().filter(|c| c.filled()).count()
    }

    /// Commits every pencil cell: same states, flags cleared.
    pub fn confirm_all(&mut self) {
        for cell in self.grid.iter_mut() {
            cell.tentative = false;
        }
    }

    /// Reverts every pencil cell to `Empty`.
    pub fn discard_tentative(&mut self) {
        for cell in self.grid.iter_mut() {
            if cell.tentative {
                *cell = Cell::default();
            }
        }
    }
}

/// The per-cell state machine. Right-click always pushes toward `Marked`
/// and then clears; left-click runs the fill cycle for the chosen mode.
fn next_state(cur: CellState, button: Button, mode: ToggleMode) -> CellState {
    use CellState::*;
    match button {
        Button::Left => match (cur, mode) {
            (Empty, _) => Filled,
            (Filled, ToggleMode::ThreeState) => Marked,
            (Filled, ToggleMode::TwoState) => Empty,
            (Marked, _) => Empty,
        },
        Button::Right => match cur {
            Empty | Filled => Marked,
            Marked => Empty,
        },
    }
}

#[test]
fn dimensions_must_be_positive() {
    assert_eq!(
        Board::new(0, 5),
        Err(BoardError::InvalidDimensions { rows: 0, cols: 5 })
    );
    assert_eq!(
        Board::new(5, 0),
        Err(BoardError::InvalidDimensions { rows: 5, cols: 0 })
    );
    assert!(Board::new(1, 1).is_ok());
}

#[test]
fn out_of_bounds_is_rejected_and_harmless() {
    let mut board = Board::new(2, 3).unwrap();
    let pristine = board.clone();

    assert!(matches!(
        board.get(2, 0),
        Err(BoardError::OutOfBounds { row: 2, .. })
    ));
    assert!(matches!(
        board.set(0, 3, CellState::Filled),
        Err(BoardError::OutOfBounds { col: 3, .. })
    ));
    assert!(board
        .toggle(5, 5, Button::Left, &ClickOptions::default())
        .is_err());

    assert_eq!(board, pristine);
}

#[test]
fn left_click_cycles() {
    let mut board = Board::new(1, 1).unwrap();
    let three = ClickOptions::default();

    // Three clicks bring a cell back to Empty in the full cycle.
    assert_eq!(board.toggle(0, 0, Button::Left, &three), Ok(CellState::Filled));
    assert_eq!(board.toggle(0, 0, Button::Left, &three), Ok(CellState::Marked));
    assert_eq!(board.toggle(0, 0, Button::Left, &three), Ok(CellState::Empty));

    // Two clicks suffice with the Marked step disabled.
    let two = ClickOptions {
        mode: ToggleMode::TwoState,
        ..ClickOptions::default()
    };
    assert_eq!(board.toggle(0, 0, Button::Left, &two), Ok(CellState::Filled));
    assert_eq!(board.toggle(0, 0, Button::Left, &two), Ok(CellState::Empty));
}

#[test]
fn right_click_forces_marked() {
    let mut board = Board::new(1, 1).unwrap();
    let opts = ClickOptions::default();

    assert_eq!(board.toggle(0, 0, Button::Right, &opts), Ok(CellState::Marked));
    assert_eq!(board.toggle(0, 0, Button::Right, &opts), Ok(CellState::Empty));

    // A filled cell converts straight to Marked; last click wins.
    board.set(0, 0, CellState::Filled).unwrap();
    assert_eq!(board.toggle(0, 0, Button::Right, &opts), Ok(CellState::Marked));
}

#[test]
fn pencil_cells_commit_and_discard() {
    let mut board = Board::new(1, 3).unwrap();
    let pencil = ClickOptions {
        tentative: true,
        ..ClickOptions::default()
    };

    board.toggle(0, 0, Button::Left, &pencil).unwrap();
    board.toggle(0, 1, Button::Right, &pencil).unwrap();
    board.set(0, 2, CellState::Filled).unwrap();

    assert!(board.get(0, 0).unwrap().tentative);
    assert!(board.get(0, 1).unwrap().tentative);
    assert!(!board.get(0, 2).unwrap().tentative);

    let mut committed = board.clone();
    committed.confirm_all();
    assert_eq!(committed.get(0, 0).unwrap().state, CellState::Filled);
    assert_eq!(committed.get(0, 1).unwrap().state, CellState::Marked);
    assert!(committed.cells().all(|c| !c.tentative));

    let mut reverted = board;
    reverted.discard_tentative();
    assert_eq!(reverted.get(0, 0).unwrap(), Cell::default());
    assert_eq!(reverted.get(0, 1).unwrap(), Cell::default());
    assert_eq!(reverted.get(0, 2).unwrap().state, CellState::Filled);
}

#[test]
fn toggling_empty_never_leaves_a_tentative_flag() {
    let mut board = Board::new(1, 1).unwrap();
    let pencil = ClickOptions {
        tentative: true,
        ..ClickOptions::default()
    };

    board.toggle(0, 0, Button::Right, &pencil).unwrap();
    board.toggle(0, 0, Button::Right, &pencil).unwrap();
    assert_eq!(board.get(0, 0).unwrap(), Cell::default());
}
