pub mod board;
pub mod game;
pub mod layout;
pub mod line_check;
pub mod puzzle;
pub mod save;
