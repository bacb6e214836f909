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

//! Toy robot simulator: reads commands from stdin or a file and prints reports to stdout.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use toy_robot::{
    CommandParser, Controller, Grid, LineSource, MalformedPlacePolicy, ReaderSource, ReportFormat,
    Robot, SessionConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Drive a robot around a square table.
#[derive(Parser, Debug)]
#[command(name = "toy-robot-sim")]
#[command(version)]
#[command(about = "Simulate a toy robot on a square table", long_about = None)]
struct Cli {
    /// Squares per side of the table.
    #[arg(long, default_value_t = 5)]
    dimension: i32,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output format for REPORT.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Skip PLACE commands with bad arguments instead of stopping.
    #[arg(long)]
    skip_malformed_place: bool,

    /// Log filter, e.g. "debug" or "toy_robot=debug". Overrides RUST_LOG; defaults to "warn".
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            malformed_place: if self.skip_malformed_place {
                MalformedPlacePolicy::Skip
            } else {
                MalformedPlacePolicy::Abort
            },
            report_format: match self.format {
                Format::Text => ReportFormat::Text,
                Format::Json => ReportFormat::Json,
            },
        }
    }
}

const DEFAULT_LOG_FILTER: &str = "warn";

// --log-level, then RUST_LOG, then the default.
fn log_filter(flag: Option<&str>) -> EnvFilter {
    match flag {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    }
}

// Logs go to stderr; stdout carries reports only.
fn init_logging(flag: Option<&str>) {
    let filter = log_filter(flag);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run<S: LineSource>(grid: &Grid, source: S, config: SessionConfig) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let output = BufWriter::new(stdout.lock());
    let parser = CommandParser::new(source);
    let mut controller = Controller::new(Robot::new(grid), parser, output, config);
    let summary = controller.run().context("session ended with an error")?;
    tracing::debug!(?summary, "done");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let grid = Grid::new(cli.dimension).context("invalid --dimension")?;
    let config = cli.session_config();
    tracing::info!(dimension = grid.dimension(), ?config, "starting session");

    match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            run(&grid, ReaderSource::new(BufReader::new(file)), config)
        }
        None => {
            let stdin = std::io::stdin();
            run(&grid, ReaderSource::new(stdin.lock()), config)
        }
    }
}
