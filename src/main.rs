use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use itertools::Itertools;

use nonoboard::board::{Button, CellState, ToggleMode};
use nonoboard::game::Game;
use nonoboard::puzzle::{ClueEntry, Puzzle};

#[derive(Parser)]
#[command(
    name = "nonoboard",
    about = "Play a nonogram from the terminal, one toggle at a time"
)]
struct Args {
    /// Resume from a save file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the resulting board to a save file
    #[arg(long, short = 'o')]
    save: Option<PathBuf>,

    /// Left-click a cell (repeatable)
    #[arg(long, value_name = "ROW,COL")]
    fill: Vec<String>,

    /// Right-click a cell (repeatable)
    #[arg(long, value_name = "ROW,COL")]
    mark: Vec<String>,

    /// Classic two-state toggling: left click only flips empty/filled
    #[arg(long)]
    two_state: bool,
}

/// The compiled-in puzzle, in the legacy signed clue encoding (a negative
/// count means "print a slash next to this number").
fn sample_puzzle() -> anyhow::Result<Puzzle> {
    Puzzle::from_raw(
        &[
            vec![1, -1],
            vec![5],
            vec![5],
            vec![3],
            vec![1],
        ],
        &[vec![2], vec![4], vec![-4], vec![4], vec![2]],
    )
}

fn parse_coord(spec: &str) -> anyhow::Result<(usize, usize)> {
    let (row, col) = spec
        .split_once(',')
        .with_context(|| format!("expected ROW,COL, got {:?}", spec))?;
    Ok((
        row.trim().parse().with_context(|| format!("bad row in {:?}", spec))?,
        col.trim().parse().with_context(|| format!("bad column in {:?}", spec))?,
    ))
}

fn clue_text(clue: &ClueEntry) -> String {
    if clue.slash_hint {
        format!("{}/", clue.len)
    } else {
        clue.len.to_string()
    }
}

fn clue_line_text(clues: &[ClueEntry]) -> String {
    if clues.is_empty() {
        "0".to_string()
    } else {
        clues.iter().map(clue_text).join(" ")
    }
}

fn cell_glyph(cell: nonoboard::board::Cell) -> colored::ColoredString {
    match (cell.state, cell.tentative) {
        (CellState::Empty, _) => "·".dimmed(),
        (CellState::Filled, false) => "█".normal(),
        (CellState::Filled, true) => "█".yellow(),
        (CellState::Marked, false) => "×".bright_black(),
        (CellState::Marked, true) => "×".yellow(),
    }
}

fn render(game: &Game) -> String {
    use std::fmt::Write;

    let puzzle = game.puzzle();
    let board = game.board();

    let left: Vec<String> = puzzle.rows.iter().map(|r| clue_line_text(r)).collect();
    let left_width = left.iter().map(|s| s.len()).max().unwrap_or(0);

    let mut out = String::new();

    // Column clues, bottom-aligned above their columns.
    let depth = puzzle.cols.iter().map(|c| c.len().max(1)).max().unwrap_or(1);
    for line in 0..depth {
        write!(out, "{:left_width$}", "").unwrap();
        for clues in &puzzle.cols {
            let shown = if clues.is_empty() { 1 } else { clues.len() };
            let pad = depth - shown;
            if line < pad {
                write!(out, "{:>4}", "").unwrap();
            } else if clues.is_empty() {
                write!(out, "{:>4}", "0").unwrap();
            } else {
                write!(out, "{:>4}", clue_text(&clues[line - pad])).unwrap();
            }
        }
        out.push('\n');
    }

    for (idx, clue_text) in left.iter().enumerate() {
        write!(out, "{:>left_width$}", clue_text).unwrap();
        for cell in board.row(idx) {
            write!(out, "   {}", cell_glyph(*cell)).unwrap();
        }
        out.push('\n');
    }

    out
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::new(sample_puzzle()?);
    if args.two_state {
        game.set_mode(ToggleMode::TwoState);
    }

    if let Some(path) = &args.load {
        game.load(path)?;
    }

    for spec in &args.fill {
        let (row, col) = parse_coord(spec)?;
        game.click(row, col, Button::Left)
            .with_context(|| format!("--fill {}", spec))?;
    }
    for spec in &args.mark {
        let (row, col) = parse_coord(spec)?;
        game.click(row, col, Button::Right)
            .with_context(|| format!("--mark {}", spec))?;
    }

    print!("{}", render(&game));

    if game.is_won() {
        println!("{}", "Solved!".green().bold());
    } else {
        println!("{} cells filled", game.board().filled_count());
    }

    if let Some(path) = &args.save {
        game.save(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn coordinate_parsing() {
        assert_eq!(parse_coord("2,3").unwrap(), (2, 3));
        assert_eq!(parse_coord(" 0 , 12 ").unwrap(), (0, 12));
        assert!(parse_coord("2").is_err());
        assert!(parse_coord("a,b").is_err());
    }

    #[test]
    fn render_layout() {
        colored::control::set_override(false);

        let puzzle =
            Puzzle::from_raw(&[vec![2], vec![0]], &[vec![1], vec![-1]]).unwrap();
        let mut game = Game::new(puzzle);
        game.click(0, 0, Button::Left).unwrap();
        game.click(1, 1, Button::Right).unwrap();

        assert_eq!(
            render(&game),
            indoc! {"
                    1  1/
                2   █   ·
                0   ·   ×
            "}
        );
    }
}
