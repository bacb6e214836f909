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

//! The square table the robot moves on.

use crate::error::GridError;

/// Anything that can answer whether a cell is on the table.
///
/// The robot only ever asks this question, so tests can hand it a double that records the
/// cells it was asked about.
pub trait Bounds {
    /// Returns true if `(x, y)` is a cell the robot may occupy.
    fn is_valid(&self, x: i32, y: i32) -> bool;
}

/// A square `dimension` x `dimension` table. Valid coordinates are in `[0, dimension)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    dimension: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Grid { dimension: 5 }
    }
}

impl Grid {
    /// Create a new table with `dimension` squares per side.
    pub fn new(dimension: i32) -> Result<Self, GridError> {
        if dimension <= 0 {
            return Err(GridError::NonPositiveDimension(dimension));
        }
        Ok(Self { dimension })
    }

    /// Number of squares per side.
    pub fn dimension(&self) -> i32 {
        self.dimension
    }
}

impl Bounds for Grid {
    fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.dimension && y < self.dimension
    }
}
