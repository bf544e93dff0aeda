#![cfg(feature = "std")]

use std::fmt::Write;
use std::string::String;

use crate::core::{Cell, CellSet, BOARD_SIZE, CELL_COUNT};

/// Render a snapshot as a framed grid with column letters and row numbers.
/// Cells in `highlight` that are empty are drawn as `*`.
pub fn render_board(cells: &[Cell; CELL_COUNT], highlight: CellSet) -> String {
    let mut out = String::new();
    out.push_str("    ╔═══════════════════╗\n");
    out.push_str("    ║  ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push_str(" ║\n");
    out.push_str("    ╠═══════════════════╣\n");
    for row in cells.chunks(BOARD_SIZE) {
        let _ = write!(out, "    ║ {:>2}", row[0].row() + 1);
        for cell in row {
            let ch = match cell.mark {
                Some(mark) => mark.symbol(),
                None if highlight.contains(cell.position) => "*",
                None => ".",
            };
            let _ = write!(out, " {}", ch);
        }
        out.push_str(" ║\n");
    }
    out.push_str("    ╚═══════════════════╝");
    out
}

/// Print a snapshot to stdout.
pub fn print_board(cells: &[Cell; CELL_COUNT], highlight: CellSet) {
    std::println!("{}", render_board(cells, highlight));
}
