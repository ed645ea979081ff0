// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

// Thin bootstrap; loading and aggregation live in the `tourism` crate.
mod cli;
mod explore;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, OutputFormat, RenderArgs, SourceArgs};
use std::io::Write;
use tourism::{
    ChartMode, ErrorReporter, ExplorerError, FacilitySelection, LevelFilter, TourismExplorer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let explorer = open(&cli.source).unwrap_or_else(|e| fail(&e));
    match cli.cmd.unwrap_or_else(|| Command::Render(default_render_args())) {
        Command::Render(args) => {
            if let Err(e) = run_render(&explorer, &args) {
                fail(&e);
            }
        }
        Command::Explore => {
            let stdin = std::io::stdin();
            explore::run(&explorer, stdin.lock(), std::io::stdout().lock())?;
        }
    }
    Ok(())
}

fn fail(error: &ExplorerError) -> ! {
    eprintln!("{}", ErrorReporter::new().report(error));
    std::process::exit(1);
}

fn open(source: &SourceArgs) -> tourism::Result<TourismExplorer> {
    let config = source.load_config()?;
    TourismExplorer::open(config)
}

fn default_render_args() -> RenderArgs {
    RenderArgs {
        chart1_level: LevelFilter::All,
        chart2_level: LevelFilter::All,
        types: FacilitySelection::all(),
        no_types: false,
        mode: ChartMode::Stacked,
        format: OutputFormat::Text,
        output: None,
    }
}

fn run_render(explorer: &TourismExplorer, args: &RenderArgs) -> tourism::Result<()> {
    let view = explorer.render(&args.selection());
    let body = match args.format {
        OutputFormat::Text => render::text(&view),
        OutputFormat::Json => render::json(&view)?,
        OutputFormat::Html => render::html(&view)?,
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, body)?;
            info!(path = %path.display(), format = ?args.format, "Dashboard written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
