use std::fmt;
use std::fs;
use std::io;

use crate::board::{
    Board, Color, Target, BOARD_SIZE, BOARD_X, BOARD_Y, SINGLE_COLOR_MAX, TARGET_SIZE, TARGET_X,
    TARGET_Y,
};

/// Which of the two input boards a validation error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardKind {
    Target,
    Player,
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardKind::Target => f.write_str("target"),
            BoardKind::Player => f.write_str("player"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Io(String),
    /// A character outside the recognized color set.
    UnknownColor {
        board: BoardKind,
        line: usize,
        found: char,
    },
    /// Wildcard cells are only meaningful on the target side.
    UnknownNotAllowed { line: usize },
    LineTooShort { line: usize, expected: usize },
    MissingLines { expected: usize, found: usize },
    /// More than four tiles of one color.
    ColorOverflow {
        board: BoardKind,
        color: Color,
        count: usize,
    },
    /// The player board needs exactly one hole, the target at most one.
    EmptyCellCount { board: BoardKind, count: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Io(err) => write!(f, "cannot read the puzzle: {}", err),
            ParseError::UnknownColor { board, line, found } => write!(
                f,
                "unknown {} board color {:?} on line {}",
                board, found, line
            ),
            ParseError::UnknownNotAllowed { line } => {
                write!(f, "wildcard cells are not allowed on the player board (line {})", line)
            }
            ParseError::LineTooShort { line, expected } => {
                write!(f, "line {} is shorter than {} cells", line, expected)
            }
            ParseError::MissingLines { expected, found } => {
                write!(f, "expected {} input lines, found {}", expected, found)
            }
            ParseError::ColorOverflow { board, color, count } => write!(
                f,
                "{} board has {} {} tiles, at most {} allowed",
                board,
                count,
                color.name(),
                SINGLE_COLOR_MAX
            ),
            ParseError::EmptyCellCount { board, count } => write!(
                f,
                "{} board has {} empty cells",
                board, count
            ),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::Io(format!("{}", err))
    }
}

/// A validated puzzle: the 3x3 pattern to reach and the 5x5 starting board.
#[derive(Debug, Copy, Clone)]
pub struct Puzzle {
    pub target: Target,
    pub player: Board,
}

impl Puzzle {
    pub fn read_local(file_name: &str) -> Result<Self, ParseError> {
        let content = fs::read_to_string(file_name)?;
        Self::from_content(&content)
    }

    /// Parse the canonical text layout: three target lines, a blank
    /// separator, five player lines. Lines past the player block are
    /// ignored, which leaves room for trailing comments.
    pub fn from_content(content: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = content.lines().collect();
        let expected = TARGET_Y + 1 + BOARD_Y;
        if lines.len() < expected {
            return Err(ParseError::MissingLines {
                expected,
                found: lines.len(),
            });
        }

        let mut target_cells = [Color::Unknown; TARGET_SIZE];
        for y in 0..TARGET_Y {
            let row = parse_row(lines[y], y + 1, TARGET_X, BoardKind::Target)?;
            target_cells[y * TARGET_X..(y + 1) * TARGET_X].copy_from_slice(&row[..TARGET_X]);
        }

        let mut player_cells = [Color::Unknown; BOARD_SIZE];
        for y in 0..BOARD_Y {
            let line_no = TARGET_Y + 1 + y;
            let row = parse_row(lines[line_no], line_no + 1, BOARD_X, BoardKind::Player)?;
            player_cells[y * BOARD_X..(y + 1) * BOARD_X].copy_from_slice(&row);
        }

        let puzzle = Self {
            target: Target::from_cells(target_cells),
            player: Board::from_cells(player_cells),
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    fn validate(&self) -> Result<(), ParseError> {
        let target_counts = self.target.count_colors();
        let player_counts = self.player.count_colors();

        if target_counts[Color::Empty as usize] > 1 {
            return Err(ParseError::EmptyCellCount {
                board: BoardKind::Target,
                count: target_counts[Color::Empty as usize],
            });
        }
        if player_counts[Color::Empty as usize] != 1 {
            return Err(ParseError::EmptyCellCount {
                board: BoardKind::Player,
                count: player_counts[Color::Empty as usize],
            });
        }

        for color in (0..8u8).map(Color::from_bits).filter(|color| color.is_real()) {
            if target_counts[color as usize] > SINGLE_COLOR_MAX {
                return Err(ParseError::ColorOverflow {
                    board: BoardKind::Target,
                    color,
                    count: target_counts[color as usize],
                });
            }
            if player_counts[color as usize] > SINGLE_COLOR_MAX {
                return Err(ParseError::ColorOverflow {
                    board: BoardKind::Player,
                    color,
                    count: player_counts[color as usize],
                });
            }
        }
        Ok(())
    }
}

fn parse_row(
    line: &str,
    line_no: usize,
    width: usize,
    board: BoardKind,
) -> Result<[Color; BOARD_X], ParseError> {
    let mut row = [Color::Unknown; BOARD_X];
    let mut chars = line.chars();
    for cell in row.iter_mut().take(width) {
        let found = chars.next().ok_or(ParseError::LineTooShort {
            line: line_no,
            expected: width,
        })?;
        let color = Color::from_char(found).ok_or(ParseError::UnknownColor {
            board,
            line: line_no,
            found,
        })?;
        if board == BoardKind::Player && color == Color::Unknown {
            return Err(ParseError::UnknownNotAllowed { line: line_no });
        }
        *cell = color;
    }
    Ok(row)
}
