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

//! The session loop: read a command, apply it, repeat until the input runs out.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::command::{CommandParser, Instruction, LineSource};
use crate::error::SessionError;
use crate::grid::Bounds;
use crate::robot::Robot;

/// What to do with a PLACE whose arguments cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MalformedPlacePolicy {
    /// End the session with the parse error.
    #[default]
    Abort,
    /// Log it and carry on with the next line.
    Skip,
}

/// How REPORT lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportFormat {
    /// `0, 1, NORTH`
    #[default]
    Text,
    /// `{"x":0,"y":1,"heading":"NORTH"}`
    Json,
}

/// Per-session knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Behaviour on malformed PLACE arguments.
    pub malformed_place: MalformedPlacePolicy,
    /// Output format for REPORT.
    pub report_format: ReportFormat,
}

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Commands read and dispatched, including skipped ones.
    pub commands: usize,
    /// Report lines written.
    pub reports: usize,
}

/// Drives a [`Robot`] from a stream of commands, writing reports to `output`.
pub struct Controller<'g, B: Bounds + ?Sized, S, W> {
    robot: Robot<'g, B>,
    parser: CommandParser<S>,
    output: W,
    config: SessionConfig,
    summary: SessionSummary,
}

impl<'g, B, S, W> Controller<'g, B, S, W>
where
    B: Bounds + ?Sized,
    S: LineSource,
    W: Write,
{
    /// Create a controller for one session.
    pub fn new(
        robot: Robot<'g, B>,
        parser: CommandParser<S>,
        output: W,
        config: SessionConfig,
    ) -> Self {
        Self {
            robot,
            parser,
            output,
            config,
            summary: SessionSummary::default(),
        }
    }

    /// Run until the input ends. An unknown command, a malformed PLACE under
    /// [`MalformedPlacePolicy::Abort`], or an I/O failure ends the session early with an error.
    pub fn run(&mut self) -> Result<SessionSummary, SessionError> {
        while let Some(command) = self.parser.next_command()? {
            self.summary.commands += 1;
            let instruction = match Instruction::try_from(&command) {
                Ok(instruction) => instruction,
                Err(err)
                    if err.is_malformed_place()
                        && self.config.malformed_place == MalformedPlacePolicy::Skip =>
                {
                    warn!(?command, %err, "skipping malformed PLACE");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            self.step(instruction)?;
        }
        self.output.flush()?;
        info!(
            commands = self.summary.commands,
            reports = self.summary.reports,
            placed = self.robot.is_placed(),
            "session finished"
        );
        Ok(self.summary)
    }

    /// Apply a single instruction.
    pub fn step(&mut self, instruction: Instruction) -> Result<(), SessionError> {
        debug!(?instruction, "dispatch");
        match instruction {
            Instruction::Place { x, y, heading } => self.robot.place(x, y, heading),
            Instruction::Move => self.robot.advance(),
            Instruction::Left => self.robot.turn_left(),
            Instruction::Right => self.robot.turn_right(),
            Instruction::Report => self.emit_report()?,
        }
        Ok(())
    }

    // An unplaced robot has nothing meaningful to say, so REPORT stays silent.
    fn emit_report(&mut self) -> Result<(), SessionError> {
        if !self.robot.is_placed() {
            debug!("ignoring REPORT before placement");
            return Ok(());
        }
        let report = self.robot.report();
        match self.config.report_format {
            ReportFormat::Text => writeln!(self.output, "{}", report)?,
            ReportFormat::Json => {
                serde_json::to_writer(&mut self.output, &report)?;
                writeln!(self.output)?;
            }
        }
        self.summary.reports += 1;
        Ok(())
    }

    /// The robot being driven.
    pub fn robot(&self) -> &Robot<'g, B> {
        &self.robot
    }

    /// Counters so far. Still meaningful after [`run`](Self::run) returned an error.
    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Consume the controller and return the report sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ScriptedSource;
    use crate::error::CommandError;
    use crate::grid::Grid;
    use crate::robot::{Heading, Report};

    /// Hands out `lines`, then fails every read.
    struct BrokenSource {
        lines: ScriptedSource,
    }

    impl LineSource for BrokenSource {
        fn next_line(&mut self) -> std::io::Result<Option<String>> {
            match self.lines.next_line()? {
                Some(line) => Ok(Some(line)),
                None => Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "console went away",
                )),
            }
        }
    }

    /// Sink that rejects every write.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn run_session(
        grid: &Grid,
        lines: &[&str],
        config: SessionConfig,
    ) -> (Result<SessionSummary, SessionError>, Report, String) {
        let parser = CommandParser::new(lines.iter().copied().collect::<ScriptedSource>());
        let mut controller = Controller::new(Robot::new(grid), parser, Vec::new(), config);
        let result = controller.run();
        let report = controller.robot().report();
        let output = String::from_utf8(controller.into_output()).expect("output is utf-8");
        (result, report, output)
    }

    #[test]
    fn test_place_move_report() {
        let grid = Grid::new(5).unwrap();
        let (result, _, output) = run_session(
            &grid,
            &["PLACE 0,0,NORTH", "MOVE", "REPORT", ""],
            SessionConfig::default(),
        );
        assert_eq!(result.unwrap(), SessionSummary { commands: 3, reports: 1 });
        assert_eq!(output, "0, 1, NORTH\n");
    }

    #[test]
    fn test_move_off_edge_is_ignored() {
        let grid = Grid::new(5).unwrap();
        let (result, _, output) = run_session(
            &grid,
            &["PLACE 4,4,NORTH", "MOVE", "REPORT", ""],
            SessionConfig::default(),
        );
        assert!(result.is_ok());
        assert_eq!(output, "4, 4, NORTH\n");
    }

    #[test]
    fn test_commands_before_placement_are_ignored() {
        let grid = Grid::new(5).unwrap();
        let (result, report, output) =
            run_session(&grid, &["MOVE", "REPORT", ""], SessionConfig::default());
        assert_eq!(result.unwrap(), SessionSummary { commands: 2, reports: 0 });
        assert_eq!(output, "");
        assert_eq!(
            report,
            Report {
                x: 0,
                y: 0,
                heading: Heading::North
            }
        );
    }

    #[test]
    fn test_left_then_report() {
        let grid = Grid::default();
        let (_, _, output) = run_session(
            &grid,
            &["PLACE 0,0,NORTH", "LEFT", "REPORT"],
            SessionConfig::default(),
        );
        assert_eq!(output, "0, 0, WEST\n");
    }

    #[test]
    fn test_longer_walk() {
        let grid = Grid::default();
        let (_, _, output) = run_session(
            &grid,
            &[
                "PLACE 1,2,EAST",
                "MOVE",
                "MOVE",
                "LEFT",
                "MOVE",
                "REPORT",
                "PLACE 9,9,SOUTH",
                "REPORT",
            ],
            SessionConfig::default(),
        );
        assert_eq!(output, "3, 3, NORTH\n3, 3, NORTH\n");
    }

    #[test]
    fn test_blank_line_stops_session() {
        let grid = Grid::default();
        let (result, _, output) = run_session(
            &grid,
            &["PLACE 0,0,NORTH", "", "REPORT"],
            SessionConfig::default(),
        );
        assert_eq!(result.unwrap().commands, 1);
        assert_eq!(output, "");
    }

    #[test]
    fn test_unknown_command_ends_session() {
        let grid = Grid::default();
        let (result, _, output) = run_session(
            &grid,
            &["PLACE 0,0,NORTH", "REPORT", "JUMP", "REPORT"],
            SessionConfig::default(),
        );
        match result {
            Err(SessionError::Command(CommandError::UnknownCommand(name))) => {
                assert_eq!(name, "JUMP")
            }
            other => panic!("expected unknown command, got {:?}", other),
        }
        assert_eq!(output, "0, 0, NORTH\n");
    }

    #[test]
    fn test_malformed_place_aborts_by_default() {
        let grid = Grid::default();
        let (result, _, _) = run_session(
            &grid,
            &["PLACE 0,zero,NORTH", "REPORT"],
            SessionConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SessionError::Command(CommandError::InvalidCoordinate(_)))
        ));
    }

    #[test]
    fn test_malformed_place_can_be_skipped() {
        let grid = Grid::default();
        let config = SessionConfig {
            malformed_place: MalformedPlacePolicy::Skip,
            ..SessionConfig::default()
        };
        let (result, _, output) = run_session(
            &grid,
            &["PLACE 1,1,UP", "PLACE 1,1", "PLACE 2,3,SOUTH", "REPORT"],
            config,
        );
        assert_eq!(result.unwrap(), SessionSummary { commands: 4, reports: 1 });
        assert_eq!(output, "2, 3, SOUTH\n");
    }

    #[test]
    fn test_skip_policy_still_aborts_on_unknown_command() {
        let grid = Grid::default();
        let config = SessionConfig {
            malformed_place: MalformedPlacePolicy::Skip,
            ..SessionConfig::default()
        };
        let (result, _, _) = run_session(&grid, &["FLY"], config);
        assert!(matches!(
            result,
            Err(SessionError::Command(CommandError::UnknownCommand(_)))
        ));
    }

    #[test]
    fn test_json_reports() {
        let grid = Grid::default();
        let config = SessionConfig {
            report_format: ReportFormat::Json,
            ..SessionConfig::default()
        };
        let (_, _, output) = run_session(&grid, &["PLACE 3,1,WEST", "REPORT"], config);
        assert_eq!(output, "{\"x\":3,\"y\":1,\"heading\":\"WEST\"}\n");
    }

    #[test]
    fn test_step_applies_instruction() {
        let grid = Grid::default();
        let parser = CommandParser::new(ScriptedSource::default());
        let mut controller =
            Controller::new(Robot::new(&grid), parser, Vec::new(), SessionConfig::default());
        controller
            .step(Instruction::Place {
                x: 2,
                y: 2,
                heading: Heading::South,
            })
            .unwrap();
        controller.step(Instruction::Right).unwrap();
        controller.step(Instruction::Move).unwrap();
        controller.step(Instruction::Report).unwrap();
        assert_eq!(controller.into_output(), b"1, 2, WEST\n".to_vec());
    }

    #[test]
    fn test_rejected_place_after_valid_place_keeps_robot_moving() {
        let grid = Grid::default();
        let (result, report, output) = run_session(
            &grid,
            &["PLACE 1,1,NORTH", "PLACE 9,9,NORTH", "MOVE", "REPORT"],
            SessionConfig::default(),
        );
        assert_eq!(result.unwrap(), SessionSummary { commands: 4, reports: 1 });
        assert_eq!(output, "1, 2, NORTH\n");
        assert_eq!(
            report,
            Report {
                x: 1,
                y: 2,
                heading: Heading::North
            }
        );
    }

    #[test]
    fn test_read_failure_ends_session() {
        let grid = Grid::default();
        let source = BrokenSource {
            lines: ScriptedSource::from(vec!["PLACE 0,0,NORTH", "MOVE"]),
        };
        let mut controller = Controller::new(
            Robot::new(&grid),
            CommandParser::new(source),
            Vec::new(),
            SessionConfig::default(),
        );
        let result = controller.run();
        assert!(matches!(result, Err(SessionError::Io(_))), "{:?}", result);
        assert_eq!(controller.summary(), SessionSummary { commands: 2, reports: 0 });
        assert!(controller.into_output().is_empty());
    }

    #[test]
    fn test_write_failure_ends_session() {
        let grid = Grid::default();
        let source = ScriptedSource::from(vec!["PLACE 0,0,NORTH", "REPORT", "MOVE"]);
        let mut controller = Controller::new(
            Robot::new(&grid),
            CommandParser::new(source),
            BrokenSink,
            SessionConfig::default(),
        );
        let result = controller.run();
        assert!(matches!(result, Err(SessionError::Io(_))), "{:?}", result);
        assert_eq!(controller.summary(), SessionSummary { commands: 2, reports: 0 });
        assert_eq!(controller.robot().position().y, 0);
    }
}
