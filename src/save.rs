//! Save-file format for boards in progress.
//!
//! The original game pickled its whole widget list; this is a stable layout
//! instead: magic, a version byte, dimensions, then one byte per cell in
//! row-major order. Loading is a validating parse, never a blind cast.

use std::convert::TryInto;
use std::path::Path;

use anyhow::{bail, Context};

use crate::board::{Board, Cell, CellState};

pub const MAGIC: &[u8; 4] = b"NONO";
pub const VERSION: u8 = 1;

const TENTATIVE_BIT: u8 = 4;

fn encode_cell(cell: Cell) -> u8 {
    let state = match cell.state {
        CellState::Empty => 0,
        CellState::Filled => 1,
        CellState::Marked => 2,
    };
    if cell.tentative {
        state | TENTATIVE_BIT
    } else {
        state
    }
}

fn decode_cell(byte: u8) -> anyhow::Result<Cell> {
    let state = match byte & !TENTATIVE_BIT {
        0 => CellState::Empty,
        1 => CellState::Filled,
        2 => CellState::Marked,
        _ => bail!("unknown cell byte {:#04x}", byte),
    };
    let tentative = byte & TENTATIVE_BIT != 0;
    if tentative && state == CellState::Empty {
        bail!("cell byte {:#04x} marks an empty cell as tentative", byte);
    }
    Ok(Cell { state, tentative })
}

pub fn serialize(board: &Board) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 1 + 8 + board.n_rows() * board.n_cols());
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&(board.n_rows() as u32).to_le_bytes());
    out.extend_from_slice(&(board.n_cols() as u32).to_le_bytes());
    for row in 0..board.n_rows() {
        for cell in board.row(row) {
            out.push(encode_cell(*cell));
        }
    }
    out
}

pub fn deserialize(bytes: &[u8]) -> anyhow::Result<Board> {
    if bytes.len() < 13 {
        bail!("save data truncated: {} bytes", bytes.len());
    }
    if &bytes[0..4] != MAGIC {
        bail!("not a nonoboard save file (bad magic)");
    }
    if bytes[4] != VERSION {
        bail!("unsupported save version {}", bytes[4]);
    }
    let rows = u32::from_le_bytes(bytes[5..9].try_into().unwrap()) as usize;
    let cols = u32::from_le_bytes(bytes[9..13].try_into().unwrap()) as usize;

    let cell_bytes = &bytes[13..];
    let expected = rows
        .checked_mul(cols)
        .context("save header dimensions overflow")?;
    if cell_bytes.len() != expected {
        bail!(
            "save data has {} cells, header says {}x{}",
            cell_bytes.len(),
            rows,
            cols
        );
    }

    let mut board = Board::new(rows, cols)
        .with_context(|| format!("save header has bad dimensions {}x{}", rows, cols))?;
    for (idx, byte) in cell_bytes.iter().enumerate() {
        let cell = decode_cell(*byte).with_context(|| format!("cell {}", idx))?;
        board
            .set_cell(idx / cols, idx % cols, cell)
            .expect("index is in range by construction");
    }
    Ok(board)
}

pub fn save_path(board: &Board, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, serialize(board))
        .with_context(|| format!("writing save file {}", path.display()))?;
    log::info!(
        "saved {}x{} board to {}",
        board.n_rows(),
        board.n_cols(),
        path.display()
    );
    Ok(())
}

pub fn load_path(path: &Path) -> anyhow::Result<Board> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading save file {}", path.display()))?;
    deserialize(&bytes).with_context(|| format!("parsing save file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Button, ClickOptions};

    fn scribbled_board() -> Board {
        let mut board = Board::new(3, 4).unwrap();
        board.set(0, 0, CellState::Filled).unwrap();
        board.set(1, 2, CellState::Marked).unwrap();
        board.set(2, 3, CellState::Filled).unwrap();
        let pencil = ClickOptions {
            tentative: true,
            ..ClickOptions::default()
        };
        board.toggle(1, 0, Button::Left, &pencil).unwrap();
        board.toggle(2, 1, Button::Right, &pencil).unwrap();
        board
    }

    #[test]
    fn round_trip_preserves_every_cell() {
        let board = scribbled_board();
        let restored = deserialize(&serialize(&board)).unwrap();
        assert_eq!(restored, board);

        let blank = Board::new(1, 1).unwrap();
        assert_eq!(deserialize(&serialize(&blank)).unwrap(), blank);
    }

    #[test]
    fn header_layout_is_stable() {
        let board = Board::new(2, 3).unwrap();
        let bytes = serialize(&board);
        assert_eq!(&bytes[0..4], b"NONO");
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..9], &2u32.to_le_bytes());
        assert_eq!(&bytes[9..13], &3u32.to_le_bytes());
        assert_eq!(bytes.len(), 13 + 6);
        assert!(bytes[13..].iter().all(|b| *b == 0));
    }

    #[test]
    fn rejects_malformed_data() {
        let good = serialize(&scribbled_board());

        assert!(deserialize(&[]).is_err());
        assert!(deserialize(&good[..good.len() - 1]).is_err());

        let mut bad_magic = good.clone();
        bad_magic[0] = b'X';
        assert!(deserialize(&bad_magic).is_err());

        let mut bad_version = good.clone();
        bad_version[4] = 9;
        assert!(deserialize(&bad_version).is_err());

        let mut bad_cell = good.clone();
        bad_cell[13] = 0x7f;
        assert!(deserialize(&bad_cell).is_err());

        // Tentative-empty isn't a reachable state, so it isn't a loadable one.
        let mut tentative_empty = good.clone();
        tentative_empty[13] = TENTATIVE_BIT;
        assert!(deserialize(&tentative_empty).is_err());

        let mut zero_rows = good;
        zero_rows[5..9].copy_from_slice(&0u32.to_le_bytes());
        assert!(deserialize(&zero_rows).is_err());
    }

    #[test]
    fn file_round_trip() {
        let board = scribbled_board();
        let path = std::env::temp_dir().join(format!("nonoboard-save-test-{}", std::process::id()));

        save_path(&board, &path).unwrap();
        let restored = load_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(restored, board);
    }

    #[test]
    fn load_failure_reports_the_path() {
        let err = load_path(Path::new("/definitely/not/here.nono")).unwrap_err();
        assert!(err.to_string().contains("not/here.nono"));
    }
}
