use crate::board::Board;

/// Where the grid sits in pixel space: a top-left origin plus a square cell
/// size. The zoom buttons just step `cell_size`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoardLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_size: f32,
}

pub const MIN_CELL_SIZE: f32 = 4.0;
pub const MAX_CELL_SIZE: f32 = 80.0;
pub const ZOOM_STEP: f32 = 4.0;

impl BoardLayout {
    pub fn new(origin_x: f32, origin_y: f32, cell_size: f32) -> BoardLayout {
        BoardLayout {
            origin_x,
            origin_y,
            cell_size: cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE),
        }
    }

    /// Maps a pixel position to the cell under it, or `None` if the click
    /// landed outside the grid.
    pub fn hit_test(&self, board: &Board, x: f32, y: f32) -> Option<(usize, usize)> {
        if x < self.origin_x || y < self.origin_y {
            return None;
        }
        let col = ((x - self.origin_x) / self.cell_size) as usize;
        let row = ((y - self.origin_y) / self.cell_size) as usize;
        if row >= board.n_rows() || col >= board.n_cols() {
            return None;
        }
        Some((row, col))
    }

    pub fn zoom_in(&mut self) {
        self.cell_size = (self.cell_size + ZOOM_STEP).min(MAX_CELL_SIZE);
    }

    pub fn zoom_out(&mut self) {
        self.cell_size = (self.cell_size - ZOOM_STEP).max(MIN_CELL_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_maps_pixels_to_cells() {
        let board = Board::new(3, 4).unwrap();
        let layout = BoardLayout::new(200.0, 100.0, 20.0);

        assert_eq!(layout.hit_test(&board, 200.0, 100.0), Some((0, 0)));
        assert_eq!(layout.hit_test(&board, 219.9, 119.9), Some((0, 0)));
        assert_eq!(layout.hit_test(&board, 220.0, 100.0), Some((0, 1)));
        assert_eq!(layout.hit_test(&board, 275.0, 155.0), Some((2, 3)));
    }

    #[test]
    fn clicks_outside_the_grid_miss() {
        let board = Board::new(3, 4).unwrap();
        let layout = BoardLayout::new(200.0, 100.0, 20.0);

        assert_eq!(layout.hit_test(&board, 199.9, 100.0), None);
        assert_eq!(layout.hit_test(&board, 200.0, 99.9), None);
        // One pixel past the last column / row.
        assert_eq!(layout.hit_test(&board, 280.0, 100.0), None);
        assert_eq!(layout.hit_test(&board, 200.0, 160.0), None);
    }

    #[test]
    fn zoom_steps_and_clamps() {
        let mut layout = BoardLayout::new(0.0, 0.0, 20.0);
        layout.zoom_in();
        assert_eq!(layout.cell_size, 24.0);
        layout.zoom_out();
        layout.zoom_out();
        assert_eq!(layout.cell_size, 16.0);

        for _ in 0..100 {
            layout.zoom_in();
        }
        assert_eq!(layout.cell_size, MAX_CELL_SIZE);
        for _ in 0..100 {
            layout.zoom_out();
        }
        assert_eq!(layout.cell_size, MIN_CELL_SIZE);

        // Construction clamps too.
        assert_eq!(BoardLayout::new(0.0, 0.0, 1000.0).cell_size, MAX_CELL_SIZE);
    }

    #[test]
    fn hit_test_respects_zoom() {
        let board = Board::new(2, 2).unwrap();
        let mut layout = BoardLayout::new(0.0, 0.0, 20.0);
        assert_eq!(layout.hit_test(&board, 30.0, 10.0), Some((0, 1)));

        layout.zoom_in(); // 24px cells now
        assert_eq!(layout.hit_test(&board, 30.0, 10.0), Some((0, 1)));
        assert_eq!(layout.hit_test(&board, 23.0, 10.0), Some((0, 0)));
    }
}
