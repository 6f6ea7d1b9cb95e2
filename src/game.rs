use std::path::Path;

use anyhow::bail;

use crate::board::{Board, BoardError, Button, CellState, ClickOptions, ToggleMode};
use crate::puzzle::Puzzle;
use crate::save;

/// One play session: a puzzle, the board being worked on, and the input
/// configuration. Everything the event loop needs goes through here; there
/// is no shared board anywhere else.
#[derive(Clone, Debug)]
pub struct Game {
    puzzle: Puzzle,
    board: Board,
    mode: ToggleMode,
    pencil: bool,
}

impl Game {
    pub fn new(puzzle: Puzzle) -> Game {
        let board = Board::new(puzzle.n_rows(), puzzle.n_cols())
            .expect("Puzzle construction already validated the dimensions");
        Game {
            puzzle,
            board,
            mode: ToggleMode::ThreeState,
            pencil: false,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_mode(&mut self, mode: ToggleMode) {
        self.mode = mode;
    }

    pub fn pencil(&self) -> bool {
        self.pencil
    }

    pub fn set_pencil(&mut self, pencil: bool) {
        self.pencil = pencil;
    }

    /// Applies one click to a cell and returns its new state.
    pub fn click(
        &mut self,
        row: usize,
        col: usize,
        button: Button,
    ) -> Result<CellState, BoardError> {
        let opts = ClickOptions {
            mode: self.mode,
            tentative: self.pencil,
        };
        let state = self.board.toggle(row, col, button, &opts)?;
        log::debug!("{:?} click at ({}, {}) -> {:?}", button, row, col, state);
        Ok(state)
    }

    /// Commits all pencil cells and leaves pencil mode.
    pub fn commit_pencil(&mut self) {
        self.board.confirm_all();
        self.pencil = false;
    }

    /// Reverts all pencil cells and leaves pencil mode.
    pub fn discard_pencil(&mut self) {
        self.board.discard_tentative();
        self.pencil = false;
    }

    pub fn is_won(&self) -> bool {
        self.puzzle.is_solved_by(&self.board)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        save::save_path(&self.board, path)
    }

    /// Replaces the board with a saved snapshot. On any failure (unreadable
    /// file, bad format, wrong dimensions) the current board is untouched.
    pub fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        let loaded = save::load_path(path)?;
        if loaded.n_rows() != self.puzzle.n_rows() || loaded.n_cols() != self.puzzle.n_cols() {
            bail!(
                "save file is {}x{}, but this puzzle is {}x{}",
                loaded.n_rows(),
                loaded.n_cols(),
                self.puzzle.n_rows(),
                self.puzzle.n_cols()
            );
        }
        self.board = loaded;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 5x5 heart; row 1's second run carries a slash hint in the raw data.
    fn heart() -> Puzzle {
        Puzzle::from_raw(
            &[
                vec![1, -1],
                vec![5],
                vec![5],
                vec![3],
                vec![1],
            ],
            &[vec![2], vec![4], vec![4], vec![4], vec![2]],
        )
        .unwrap()
    }

    const HEART_CELLS: [[u8; 5]; 5] = [
        [0, 1, 0, 1, 0],
        [1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1],
        [0, 1, 1, 1, 0],
        [0, 0, 1, 0, 0],
    ];

    fn fill_heart(game: &mut Game) {
        for (r, row) in HEART_CELLS.iter().enumerate() {
            for (c, filled) in row.iter().enumerate() {
                if *filled == 1 {
                    game.click(r, c, Button::Left).unwrap();
                }
            }
        }
    }

    #[test]
    fn solving_the_heart() {
        let mut game = Game::new(heart());
        assert!(!game.is_won());

        fill_heart(&mut game);
        assert!(game.is_won());

        // Any extra fill, or any cleared cell, unsolves it.
        let mut extra = game.clone();
        extra.click(0, 0, Button::Left).unwrap();
        assert!(!extra.is_won());

        let mut missing = game.clone();
        // Three more left clicks walk (2, 2) back around to Empty.
        for _ in 0..3 {
            missing.click(2, 2, Button::Left).unwrap();
        }
        assert!(!missing.is_won());
    }

    #[test]
    fn marked_cells_are_decor_for_winning() {
        let mut game = Game::new(heart());
        fill_heart(&mut game);

        // Marking the unfilled corners is a hint, not a mistake.
        game.click(0, 0, Button::Right).unwrap();
        game.click(4, 4, Button::Right).unwrap();
        assert!(game.is_won());
    }

    #[test]
    fn pencil_round_trip() {
        let mut game = Game::new(heart());
        game.set_pencil(true);
        game.click(1, 1, Button::Left).unwrap();
        game.click(1, 2, Button::Left).unwrap();

        let mut kept = game.clone();
        kept.commit_pencil();
        assert!(!kept.pencil());
        assert_eq!(kept.board().filled_count(), 2);
        assert!(kept.board().cells().all(|c| !c.tentative));

        game.discard_pencil();
        assert_eq!(game.board().filled_count(), 0);
    }

    #[test]
    fn save_and_load_a_session() {
        let path =
            std::env::temp_dir().join(format!("nonoboard-game-test-{}", std::process::id()));

        let mut game = Game::new(heart());
        fill_heart(&mut game);
        game.save(&path).unwrap();

        let mut resumed = Game::new(heart());
        assert!(!resumed.is_won());
        resumed.load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(resumed.is_won());
    }

    #[test]
    fn failed_load_leaves_the_board_alone() {
        let mut game = Game::new(heart());
        game.click(0, 1, Button::Left).unwrap();
        let before = game.board().clone();

        assert!(game.load(Path::new("/no/such/save.nono")).is_err());
        assert_eq!(game.board(), &before);

        // A valid save of the wrong shape is also refused.
        let path =
            std::env::temp_dir().join(format!("nonoboard-shape-test-{}", std::process::id()));
        save::save_path(&Board::new(2, 2).unwrap(), &path).unwrap();
        let err = game.load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(err.to_string().contains("2x2"));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn two_state_mode_skips_marked() {
        let mut game = Game::new(heart());
        game.set_mode(ToggleMode::TwoState);
        assert_eq!(game.click(0, 0, Button::Left), Ok(CellState::Filled));
        assert_eq!(game.click(0, 0, Button::Left), Ok(CellState::Empty));
    }
}
