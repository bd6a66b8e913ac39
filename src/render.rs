#[cfg(feature = "colored")]
use colored::{Color as TermColor, ColoredString, Colorize};

use crate::board::{Board, Color, Target, BOARD_X, BOARD_Y, TARGET_X, TARGET_Y};
use crate::moves::{cell_name, MoveInfo};

#[cfg(not(feature = "colored"))]
type ColoredString = String;

fn cell_symbol(cell: Color) -> ColoredString {
    let symbol = cell.to_char().to_string();
    colorize(symbol, cell)
}

#[cfg(feature = "colored")]
fn colorize(symbol: String, cell: Color) -> ColoredString {
    let term_color = match cell {
        Color::Red => Some(TermColor::Red),
        Color::Green => Some(TermColor::Green),
        Color::Blue => Some(TermColor::Blue),
        Color::White => Some(TermColor::White),
        Color::Orange => Some(TermColor::BrightRed),
        Color::Yellow => Some(TermColor::Yellow),
        Color::Empty | Color::Unknown => None,
    };
    match term_color {
        Some(term_color) => symbol.as_str().color(term_color),
        None => ColoredString::from(symbol.as_str()),
    }
}

#[cfg(not(feature = "colored"))]
fn colorize(symbol: String, _cell: Color) -> ColoredString {
    symbol
}

fn concat(rows: impl Iterator<Item = Vec<ColoredString>>) -> String {
    rows.map(|row| {
        row.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    })
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn render_board(board: &Board) -> String {
    concat((0..BOARD_Y).map(|y| {
        (0..BOARD_X)
            .map(|x| cell_symbol(board.get(y * BOARD_X + x)))
            .collect()
    }))
}

pub fn render_target(target: &Target) -> String {
    concat((0..TARGET_Y).map(|y| {
        (0..TARGET_X)
            .map(|x| cell_symbol(target.get(y * TARGET_X + x)))
            .collect()
    }))
}

/// One line per step: number, moved tile, from-cell, to-cell, direction.
pub fn render_move_list(moves: &[MoveInfo]) -> String {
    moves
        .iter()
        .enumerate()
        .map(|(index, info)| {
            format!(
                "{:3}. {}  {} --> {}  ({})",
                index + 1,
                cell_symbol(info.color),
                cell_name(info.from),
                cell_name(info.to),
                info.dir
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{render_board, render_move_list, render_target};
    use crate::board::{Board, Color, Target, TARGET_SIZE};
    use crate::moves::{Direction, MoveInfo};

    #[test]
    fn renders_a_board_as_a_grid() {
        let mut board = Board::filled(Color::Red);
        board.set(0, Color::Empty);
        let rendered = render_board(&board);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "E R R R R");
        assert_eq!(lines[4], "R R R R R");
    }

    #[test]
    fn renders_a_target() {
        let target = Target::from_cells([Color::Unknown; TARGET_SIZE]);
        assert_eq!(render_target(&target), "* * *\n* * *\n* * *");
    }

    #[test]
    fn renders_move_steps() {
        let moves = [MoveInfo {
            from: 7,
            to: 12,
            color: Color::Blue,
            dir: Direction::Down,
        }];
        let line = render_move_list(&moves);
        assert!(line.contains("1."));
        assert!(line.contains("B3 --> C3"));
        assert!(line.contains("Down"));
        assert!(line.contains('B'));
    }
}
