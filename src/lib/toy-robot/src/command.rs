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

//! Turning text lines into commands, and commands into instructions.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::CommandError;
use crate::robot::Heading;

/// Where command lines come from. `Ok(None)` means there is nothing more to read.
pub trait LineSource {
    /// Block until the next line is available.
    fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

/// Lines read from a console, file or any other buffered reader.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// A fixed list of lines, handed out in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl LineSource for ScriptedSource {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

impl FromIterator<String> for ScriptedSource {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for ScriptedSource {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl From<Vec<&str>> for ScriptedSource {
    fn from(lines: Vec<&str>) -> Self {
        lines.into_iter().collect()
    }
}

/// One parsed line: a case-sensitive name plus optional comma-separated arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    /// Everything before the first space.
    pub name: String,
    /// Everything after the first space, split on commas. None when the line had no space.
    pub arguments: Option<Vec<String>>,
}

impl Command {
    /// A command with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }

    /// A command with arguments.
    pub fn with_arguments(name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Some(arguments),
        }
    }
}

/// Parse a single raw line. Returns None for a blank line, which ends a session.
///
/// Whitespace inside the argument list is dropped before splitting on commas, so
/// `"PLACE 1, 2 ,NORTH"` gives `["1", "2", "NORTH"]`. Empty arguments from repeated or trailing
/// commas are kept.
pub fn parse_line(raw: &str) -> Option<Command> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }
    let command = match line.split_once(' ') {
        None => Command::new(line),
        Some((name, rest)) => {
            let packed: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
            let arguments = packed.split(',').map(str::to_string).collect();
            Command::with_arguments(name, arguments)
        }
    };
    Some(command)
}

/// Reads lines from a [`LineSource`] and parses each one into a [`Command`].
pub struct CommandParser<S> {
    source: S,
}

impl<S: LineSource> CommandParser<S> {
    /// Parse lines from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The next command, or None once the source is exhausted or yields a blank line.
    pub fn next_command(&mut self) -> std::io::Result<Option<Command>> {
        Ok(self.source.next_line()?.as_deref().and_then(parse_line))
    }
}

/// A validated command, ready to apply to a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `PLACE X,Y,F`
    Place {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Facing.
        heading: Heading,
    },
    /// `MOVE`
    Move,
    /// `LEFT`
    Left,
    /// `RIGHT`
    Right,
    /// `REPORT`
    Report,
}

fn parse_coordinate(token: &str) -> Result<i32, CommandError> {
    token
        .parse::<i32>()
        .map_err(|_| CommandError::InvalidCoordinate(token.to_string()))
}

impl TryFrom<&Command> for Instruction {
    type Error = CommandError;

    // Arguments given to anything other than PLACE are ignored.
    fn try_from(command: &Command) -> Result<Self, Self::Error> {
        match command.name.as_str() {
            "PLACE" => {
                let arguments = command.arguments.as_deref().unwrap_or_default();
                match arguments {
                    [x, y, heading] => Ok(Instruction::Place {
                        x: parse_coordinate(x)?,
                        y: parse_coordinate(y)?,
                        heading: heading.parse()?,
                    }),
                    _ => Err(CommandError::PlaceArity(arguments.len())),
                }
            }
            "MOVE" => Ok(Instruction::Move),
            "LEFT" => Ok(Instruction::Left),
            "RIGHT" => Ok(Instruction::Right),
            "REPORT" => Ok(Instruction::Report),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}
