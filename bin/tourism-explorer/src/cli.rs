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

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tourism::{ChartMode, ExplorerConfig, FacilitySelection, LevelFilter, SelectionState};

#[derive(Parser, Debug)]
#[command(
    name = "tourism-explorer",
    version,
    about = "Lebanon tourism infrastructure explorer: facility counts by governorate and district"
)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(
        long = "debug",
        global = true,
        default_value_t = false,
        help = "Enable debug-level logging (overrides RUST_LOG)."
    )]
    pub debug: bool,
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the dashboard once and exit.
    Render(RenderArgs),
    /// Read selection commands from stdin and re-render after each one.
    Explore,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(
        long = "config",
        global = true,
        help = "YAML configuration with the data path and column names"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long = "data",
        global = true,
        help = "CSV file to load (overrides data_path from the configuration)"
    )]
    pub data: Option<PathBuf>,
}
impl SourceArgs {
    pub fn load_config(&self) -> tourism::Result<ExplorerConfig> {
        let config = match &self.config {
            Some(path) => ExplorerConfig::from_yaml_file(path)?,
            None => ExplorerConfig::default(),
        };
        Ok(match &self.data {
            Some(data) => config.with_data_path(data),
            None => config,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(long = "chart1-level", default_value = "all", help = "all, governorates or districts")]
    pub chart1_level: LevelFilter,
    #[arg(long = "chart2-level", default_value = "all", help = "all, governorates or districts")]
    pub chart2_level: LevelFilter,
    #[arg(
        long = "types",
        default_value = "hotels,cafes,guest-houses,restaurants",
        help = "Comma-separated facility types for the breakdown chart"
    )]
    pub types: FacilitySelection,
    #[arg(
        long = "no-types",
        default_value_t = false,
        conflicts_with = "types",
        help = "Deselect every facility type"
    )]
    pub no_types: bool,
    #[arg(long = "mode", default_value = "stacked", help = "stacked or grouped")]
    pub mode: ChartMode,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long = "output", help = "Write to this file instead of stdout")]
    pub output: Option<PathBuf>,
}
impl RenderArgs {
    pub fn selection(&self) -> SelectionState {
        let types = if self.no_types {
            FacilitySelection::none()
        } else {
            self.types.clone()
        };
        SelectionState::default()
            .with_chart1_level(self.chart1_level)
            .with_chart2_level(self.chart2_level)
            .with_facility_types(types)
            .with_chart_mode(self.mode)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}
