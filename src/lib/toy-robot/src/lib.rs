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

#![warn(missing_docs)]

//! Toy robot simulator.
//!
//! A single robot on a square table, driven by a line-oriented command stream:
//!
//! ```text
//! PLACE X,Y,F
//! MOVE
//! LEFT
//! RIGHT
//! REPORT
//! ```
//!
//! Commands before the first valid `PLACE` are ignored, as is any `MOVE` that would take the
//! robot off the table. The [`Controller`] reads lines from a [`LineSource`], turns them into
//! [`Instruction`]s and applies them to a [`Robot`], writing reports to any [`std::io::Write`].

pub mod command;
pub mod controller;
pub mod error;
pub mod grid;
pub mod robot;

pub use command::{Command, CommandParser, Instruction, LineSource, ReaderSource, ScriptedSource};
pub use controller::{
    Controller, MalformedPlacePolicy, ReportFormat, SessionConfig, SessionSummary,
};
pub use error::{CommandError, GridError, SessionError};
pub use grid::{Bounds, Grid};
pub use robot::{Heading, Position, Report, Robot};
