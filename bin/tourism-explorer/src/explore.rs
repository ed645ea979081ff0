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

//! Interactive session: each stdin command updates the selection and the
//! dashboard is rendered again from the same loaded table.

use crate::render;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tourism::{
    ChartMode, ErrorReporter, ExplorerError, FacilityType, LevelFilter, SelectionError,
    SelectionState, TourismExplorer,
};
use tracing::debug;

const HELP: &str = "\
Commands:
  level1 <all|governorates|districts>   level filter for chart 1
  level2 <all|governorates|districts>   level filter for chart 2
  toggle <hotels|cafes|guest-houses|restaurants>
  mode <stacked|grouped>
  reset                                 restore the default selection
  show                                  render the dashboard again
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Chart1Level(LevelFilter),
    Chart2Level(LevelFilter),
    Toggle(FacilityType),
    Mode(ChartMode),
    Reset,
    Show,
    Help,
    Quit,
}
impl FromStr for SessionCommand {
    type Err = String;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.collect::<Vec<_>>().join(" ");
        let parsed: Result<Self, SelectionError> = match verb.as_str() {
            "level1" => arg.parse().map(SessionCommand::Chart1Level),
            "level2" => arg.parse().map(SessionCommand::Chart2Level),
            "toggle" => arg.parse().map(SessionCommand::Toggle),
            "mode" => arg.parse().map(SessionCommand::Mode),
            "reset" => Ok(SessionCommand::Reset),
            "show" | "" => Ok(SessionCommand::Show),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => return Err(format!("Unknown command '{other}'. Type 'help' for the list.")),
        };
        parsed.map_err(|e| ErrorReporter::plain().report(&ExplorerError::from(e)))
    }
}

/// Applies a command to the selection. Returns `false` when the session
/// should end.
pub fn apply(selection: &mut SelectionState, command: &SessionCommand) -> bool {
    match command {
        SessionCommand::Chart1Level(level) => selection.chart1_level = *level,
        SessionCommand::Chart2Level(level) => selection.chart2_level = *level,
        SessionCommand::Toggle(facility) => selection.toggle_facility(*facility),
        SessionCommand::Mode(mode) => selection.chart_mode = *mode,
        SessionCommand::Reset => selection.reset(),
        SessionCommand::Show | SessionCommand::Help => {}
        SessionCommand::Quit => return false,
    }
    true
}

pub fn run<R: BufRead, W: Write>(
    explorer: &TourismExplorer,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    let mut selection = SelectionState::default();
    writeln!(output, "{}", render::text(&explorer.render(&selection)))?;
    writeln!(output, "{HELP}")?;
    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        debug!(?command, "Applying selection command");
        if !apply(&mut selection, &command) {
            break;
        }
        if command == SessionCommand::Help {
            writeln!(output, "{HELP}")?;
            continue;
        }
        writeln!(output, "{}", render::text(&explorer.render(&selection)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourism::{FacilityCounts, FacilityRecord, FacilitySelection, FacilityTable, Level};

    fn explorer() -> TourismExplorer {
        TourismExplorer::from_table(FacilityTable::from_records(vec![
            FacilityRecord::new("Beirut", Level::Governorate, FacilityCounts::new(10, 5, 0, 3)),
            FacilityRecord::new("Tyre", Level::District, FacilityCounts::new(1, 1, 1, 1)),
        ]))
    }

    #[test]
    fn commands_parse() {
        assert_eq!(
            "level2 districts".parse::<SessionCommand>(),
            Ok(SessionCommand::Chart2Level(LevelFilter::District))
        );
        assert_eq!(
            "toggle guest houses".parse::<SessionCommand>(),
            Ok(SessionCommand::Toggle(FacilityType::GuestHouses))
        );
        assert_eq!("MODE grouped".parse::<SessionCommand>(), Ok(SessionCommand::Mode(ChartMode::Grouped)));
        assert!("level1 region".parse::<SessionCommand>().is_err());
        assert!("dance".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn toggling_every_type_off_shows_prompt() {
        let mut selection = SelectionState::default();
        for facility in FacilityType::ALL {
            assert!(apply(&mut selection, &SessionCommand::Toggle(facility)));
        }
        assert_eq!(selection.facility_types, FacilitySelection::none());
        assert!(!apply(&mut selection, &SessionCommand::Quit));
    }

    #[test]
    fn session_rerenders_after_each_command() {
        let input = "toggle hotels\ntoggle cafes\ntoggle guest-houses\ntoggle restaurants\nquit\nshow\n";
        let mut output = Vec::new();
        run(&explorer(), input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        // Initial render plus one per toggle; nothing after quit.
        assert_eq!(text.matches("Visualization 1:").count(), 5);
        assert_eq!(
            text.matches("Select at least one facility type to display Chart 2.").count(),
            1
        );
    }
}
