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

//! Errors raised while building a table or running a session.
//!
//! Invalid placements and moves off the table are not errors: the robot silently ignores them.

/// Table construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A table needs at least one square per side.
    #[error("grid dimension must be positive, got {0}")]
    NonPositiveDimension(i32),
}

/// A command line that could not be turned into an instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Command name is not one of PLACE, MOVE, LEFT, RIGHT or REPORT.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// PLACE takes exactly three arguments.
    #[error("PLACE expects 3 arguments (X,Y,F), got {0}")]
    PlaceArity(usize),

    /// PLACE coordinate is not an integer.
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    /// Heading token is not NORTH, EAST, SOUTH or WEST.
    #[error("unknown heading: {0:?}")]
    UnknownHeading(String),
}

impl CommandError {
    /// True for the errors caused by bad PLACE arguments, as opposed to an unknown command.
    pub fn is_malformed_place(&self) -> bool {
        !matches!(self, CommandError::UnknownCommand(_))
    }
}

/// Error that ends a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A command could not be dispatched.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Reading commands or writing reports failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A report could not be encoded.
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
