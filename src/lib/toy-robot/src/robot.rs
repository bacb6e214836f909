/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Robot state and the rules for placing, moving and turning it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CommandError;
use crate::grid::Bounds;

/// The direction the robot faces. Turning right walks NORTH, EAST, SOUTH, WEST and wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Heading {
    /// Towards increasing y.
    North,
    /// Towards increasing x.
    East,
    /// Towards decreasing y.
    South,
    /// Towards decreasing x.
    West,
}

impl Heading {
    /// All headings in clockwise order, starting from NORTH.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Heading after a quarter turn anti-clockwise.
    pub fn left(self) -> Heading {
        Heading::ALL[(self.index() + Heading::ALL.len() - 1) % Heading::ALL.len()]
    }

    /// Heading after a quarter turn clockwise.
    pub fn right(self) -> Heading {
        Heading::ALL[(self.index() + 1) % Heading::ALL.len()]
    }

    /// Unit step `(dx, dy)` for one move in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heading::North => write!(f, "NORTH"),
            Heading::East => write!(f, "EAST"),
            Heading::South => write!(f, "SOUTH"),
            Heading::West => write!(f, "WEST"),
        }
    }
}

// case-sensitive, exactly the names Display produces.
impl std::str::FromStr for Heading {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORTH" => Ok(Heading::North),
            "EAST" => Ok(Heading::East),
            "SOUTH" => Ok(Heading::South),
            "WEST" => Ok(Heading::West),
            _ => Err(CommandError::UnknownHeading(s.to_string())),
        }
    }
}

/// A cell on the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing east.
    pub x: i32,
    /// Row, growing north.
    pub y: i32,
}

impl Position {
    /// The neighbouring cell in direction `heading`, or None if the coordinate would overflow.
    pub fn step(self, heading: Heading) -> Option<Position> {
        let (dx, dy) = heading.delta();
        Some(Position {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

/// What REPORT prints: `"x, y, HEADING"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Report {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Facing.
    pub heading: Heading,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.heading)
    }
}

/// The robot, bound to the table it was created on.
///
/// Until a PLACE lands on a valid cell the robot is unplaced and ignores MOVE, LEFT and RIGHT.
/// Once placed it stays placed for the rest of the session.
#[derive(Debug, Clone)]
pub struct Robot<'g, B: Bounds + ?Sized> {
    table: &'g B,
    position: Position,
    heading: Heading,
    placed: bool,
}

impl<'g, B: Bounds + ?Sized> Robot<'g, B> {
    /// Create an unplaced robot on `table`.
    pub fn new(table: &'g B) -> Self {
        Self {
            table,
            position: Position::default(),
            heading: Heading::North,
            placed: false,
        }
    }

    /// Whether a valid PLACE has happened yet.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Last committed cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Last committed heading.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Put the robot at `(x, y)` facing `heading`.
    ///
    /// Off-table placements change nothing, including a previous valid placement: a robot
    /// that is already on the table stays there and keeps obeying MOVE, LEFT and RIGHT.
    pub fn place(&mut self, x: i32, y: i32, heading: Heading) {
        if !self.table.is_valid(x, y) {
            debug!(x, y, %heading, "ignoring placement off the table");
            return;
        }
        self.position = Position { x, y };
        self.heading = heading;
        self.placed = true;
    }

    /// Move one square forward, unless that would leave the table.
    pub fn advance(&mut self) {
        if !self.placed {
            return;
        }
        match self.position.step(self.heading) {
            Some(next) if self.table.is_valid(next.x, next.y) => self.position = next,
            _ => debug!(
                position = ?self.position,
                heading = %self.heading,
                "ignoring move off the table"
            ),
        }
    }

    /// Rotate anti-clockwise.
    pub fn turn_left(&mut self) {
        if self.placed {
            self.heading = self.heading.left();
        }
    }

    /// Rotate clockwise.
    pub fn turn_right(&mut self) {
        if self.placed {
            self.heading = self.heading.right();
        }
    }

    /// Current state. An unplaced robot reports its initial `0, 0, NORTH`.
    pub fn report(&self) -> Report {
        Report {
            x: self.position.x,
            y: self.position.y,
            heading: self.heading,
        }
    }
}
