//! This module defines the `Tape`, an unbounded bidirectional sequence of cells with a cursor.
//!
//! Cells live in an arena and link to their neighbours by index. New cells are only
//! materialized when the cursor steps past either end, so the tape never needs pre-sizing.

use std::fmt;
use std::iter;

use crate::types::{Direction, Symbol};

/// A single tape cell. `value` is `None` until the cell is written.
#[derive(Debug, Clone, Default)]
struct Cell {
    value: Option<Symbol>,
    left: Option<usize>,
    right: Option<usize>,
}

/// A lazily grown, bidirectional tape.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<Cell>,
    cursor: usize,
    leftmost: usize,
    rightmost: usize,
    position: isize,
}

impl Tape {
    /// Creates a tape holding `input`, one symbol per character, with the cursor on the
    /// leftmost cell. An empty input yields a single blank cell.
    pub fn new(input: &str) -> Self {
        let mut tape = Self {
            cells: vec![Cell::default()],
            cursor: 0,
            leftmost: 0,
            rightmost: 0,
            position: 0,
        };

        let mut chars = input.chars();
        if let Some(first) = chars.next() {
            tape.write(first.to_string());
        }
        for c in chars {
            tape.move_right();
            tape.write(c.to_string());
        }

        tape.cursor = tape.leftmost;
        tape.position = 0;
        tape
    }

    /// Returns the symbol under the cursor, or `None` for a blank cell.
    pub fn read(&self) -> Option<&str> {
        self.cells[self.cursor].value.as_deref()
    }

    /// Writes `symbol` to the cell under the cursor without moving.
    pub fn write(&mut self, symbol: impl Into<Symbol>) {
        self.cells[self.cursor].value = Some(symbol.into());
    }

    pub fn move_left(&mut self) {
        if self.cursor == self.leftmost {
            self.leftmost = self.grow_left();
        }
        self.cursor = self.cells[self.cursor]
            .left
            .unwrap_or_else(|| unreachable!("cell {} has no left link", self.cursor));
        self.position -= 1;
    }

    pub fn move_right(&mut self) {
        if self.cursor == self.rightmost {
            self.rightmost = self.grow_right();
        }
        self.cursor = self.cells[self.cursor]
            .right
            .unwrap_or_else(|| unreachable!("cell {} has no right link", self.cursor));
        self.position += 1;
    }

    /// Moves the cursor one cell in `direction`.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
        }
    }

    /// Concatenates every written cell from left to right. Blank cells contribute nothing.
    pub fn contents(&self) -> String {
        self.iter().flatten().collect()
    }

    /// Iterates over the materialized cells from left to right.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        iter::successors(Some(self.leftmost), move |&i| self.cells[i].right)
            .map(move |i| self.cells[i].value.as_deref())
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cursor offset from the first loaded cell; negative values lie to its left.
    pub fn position(&self) -> isize {
        self.position
    }

    fn grow_left(&mut self) -> usize {
        let end = self.leftmost;
        assert!(
            self.cells[end].left.is_none(),
            "can not grow left: cell {end} already has a left neighbour"
        );

        let new = self.cells.len();
        self.cells.push(Cell {
            right: Some(end),
            ..Cell::default()
        });
        self.cells[end].left = Some(new);
        new
    }

    fn grow_right(&mut self) -> usize {
        let end = self.rightmost;
        assert!(
            self.cells[end].right.is_none(),
            "can not grow right: cell {end} already has a right neighbour"
        );

        let new = self.cells.len();
        self.cells.push(Cell {
            left: Some(end),
            ..Cell::default()
        });
        self.cells[end].right = Some(new);
        new
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.contents())
    }
}
