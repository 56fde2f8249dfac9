//! Parsing of the burrow diagram.
//!
//! ```text
//! #############
//! #...........#
//! ###B#C#B#D###
//!   #A#D#C#A#
//!   #########
//! ```
//!
//! The first two rows are the top wall and the hallway, then one row per room
//! level, then the bottom wall. Room depth is the number of room rows.

use std::str::FromStr;

use crate::burrow::{Amphipod, Burrow, Room, Slot, DOORWAYS, HALLWAY_LEN, ROOM_COUNT};

/// Column of the first hallway cell, just inside the left wall
const HALLWAY_COLUMN: usize = 1;

/// Errors raised for diagrams that do not have the fixed burrow shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("diagram needs at least 4 rows (walls, hallway and one room row), found {found}")]
    TooFewRows { found: usize },

    #[error("line {line}: expected {expected}")]
    MalformedRow { line: usize, expected: &'static str },

    #[error("line {line}, column {column}: '{found}' is not an amphipod or '.'")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("line 2, column {column}: amphipods may not stand outside a room doorway")]
    DoorwayOccupied { column: usize },

    #[error("found {found} of amphipod {amphipod}, expected {expected} (one per room slot)")]
    TokenCount {
        amphipod: char,
        found: usize,
        expected: usize,
    },
}

/// Parse a burrow diagram.
///
/// Trailing whitespace on each line and trailing blank lines are ignored.
pub fn parse_diagram(input: &str) -> Result<Burrow, ParseError> {
    let mut lines: Vec<Vec<char>> = input
        .lines()
        .map(|line| line.trim_end().chars().collect())
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    if lines.len() < 4 {
        return Err(ParseError::TooFewRows { found: lines.len() });
    }

    let depth = lines.len() - 3;
    expect_wall(&lines[0], 1, 0, HALLWAY_LEN + 2)?;
    let hallway = parse_hallway(&lines[1])?;

    let mut rooms: [Vec<Slot>; ROOM_COUNT] = Default::default();
    for (level, row) in lines[2..2 + depth].iter().enumerate() {
        let line = level + 3;
        for (room_index, cell) in parse_room_row(row, line, level == 0)?.into_iter().enumerate() {
            rooms[room_index].push(cell);
        }
    }
    expect_wall(&lines[lines.len() - 1], lines.len(), 2, HALLWAY_LEN - 2)?;

    let burrow = Burrow::new(hallway, rooms.map(Room::new));
    let counts = burrow.token_counts();
    for amphipod in Amphipod::ALL {
        let found = counts[amphipod.index()];
        if found != depth {
            return Err(ParseError::TokenCount {
                amphipod: amphipod.to_char(),
                found,
                expected: depth,
            });
        }
    }
    Ok(burrow)
}

impl FromStr for Burrow {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_diagram(s)
    }
}

/// A row of `len` wall characters starting at `indent`
fn expect_wall(row: &[char], line: usize, indent: usize, len: usize) -> Result<(), ParseError> {
    let shaped = row.len() == indent + len
        && row[..indent].iter().all(|&c| c == ' ')
        && row[indent..].iter().all(|&c| c == '#');
    if shaped {
        Ok(())
    } else {
        Err(ParseError::MalformedRow {
            line,
            expected: "a solid wall row",
        })
    }
}

fn parse_hallway(row: &[char]) -> Result<[Slot; HALLWAY_LEN], ParseError> {
    let end = HALLWAY_COLUMN + HALLWAY_LEN;
    if row.len() != end + 1 || row[0] != '#' || row[end] != '#' {
        return Err(ParseError::MalformedRow {
            line: 2,
            expected: "a hallway row of 11 cells between walls",
        });
    }
    let mut hallway = [None; HALLWAY_LEN];
    for (position, slot) in hallway.iter_mut().enumerate() {
        let column = HALLWAY_COLUMN + position;
        *slot = parse_cell(row[column], 2, column)?;
        if slot.is_some() && DOORWAYS.contains(&position) {
            return Err(ParseError::DoorwayOccupied { column: column + 1 });
        }
    }
    Ok(hallway)
}

/// Room cells sit one column right of their doorway's hallway cell, since the
/// hallway starts at column 1. The top level is `###A#B#C#D###`, deeper levels
/// are `  #A#B#C#D#`.
fn parse_room_row(row: &[char], line: usize, top: bool) -> Result<[Slot; ROOM_COUNT], ParseError> {
    let (edge, width, expected) = if top {
        ('#', HALLWAY_LEN + 2, "a top room row like '###A#B#C#D###'")
    } else {
        (' ', HALLWAY_LEN, "a room row like '  #A#B#C#D#'")
    };
    let last_wall = DOORWAYS[ROOM_COUNT - 1] + HALLWAY_COLUMN + 1;
    let shaped = row.len() == width
        && row[..DOORWAYS[0]].iter().all(|&c| c == edge)
        && row[last_wall + 1..].iter().all(|&c| c == '#')
        && (DOORWAYS[0]..=last_wall)
            .step_by(2)
            .all(|column| row[column] == '#');
    if !shaped {
        return Err(ParseError::MalformedRow { line, expected });
    }
    let mut cells = [None; ROOM_COUNT];
    for (room_index, cell) in cells.iter_mut().enumerate() {
        let column = DOORWAYS[room_index] + HALLWAY_COLUMN;
        *cell = parse_cell(row[column], line, column)?;
    }
    Ok(cells)
}

fn parse_cell(c: char, line: usize, column: usize) -> Result<Slot, ParseError> {
    if c == '.' {
        return Ok(None);
    }
    Amphipod::from_char(c)
        .map(Some)
        .ok_or(ParseError::InvalidCell {
            line,
            column: column + 1,
            found: c,
        })
}
