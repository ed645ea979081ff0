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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Data loading error: {0}")]
    Load(#[from] LoadError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open data file '{path}': {source}")]
    SourceFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse CSV data from '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: polars::error::PolarsError,
    },
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },
    #[error("Row {row} has no value in location column '{column}'")]
    MissingLocation { row: usize, column: String },
    #[error("Failed to read column '{column}': {source}")]
    ColumnRead {
        column: String,
        #[source]
        source: polars::error::PolarsError,
    },
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML configuration: {source}")]
    YamlParseError {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Empty column name not allowed: {field}")]
    EmptyColumnName { field: String },
    #[error("Column '{column}' is mapped to more than one facility type")]
    DuplicateColumn { column: String },
    #[error("Governorate keyword must not be empty")]
    EmptyKeyword,
}
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown administrative level '{value}' (expected all, governorates or districts)")]
    UnknownLevel { value: String },
    #[error("Unknown facility type '{value}' (expected hotels, cafes, guest-houses or restaurants)")]
    UnknownFacilityType { value: String },
    #[error("Unknown chart mode '{value}' (expected stacked or grouped)")]
    UnknownChartMode { value: String },
}
pub type Result<T> = std::result::Result<T, ExplorerError>;
pub type LoadResult<T> = std::result::Result<T, LoadError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
impl ExplorerError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExplorerError::Selection(_))
    }
    pub fn category(&self) -> &'static str {
        match self {
            ExplorerError::Load(_) => "Data",
            ExplorerError::Config(_) => "Configuration",
            ExplorerError::Selection(_) => "Selection",
            ExplorerError::Io(_) => "I/O",
            ExplorerError::Serialisation(_) => "Serialisation",
        }
    }
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExplorerError::Selection(_) => ErrorSeverity::Warning,
            ExplorerError::Load(LoadError::SourceFile { .. })
            | ExplorerError::Load(LoadError::MissingLocation { .. }) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ExplorerError::Load(LoadError::SourceFile { .. }) => vec![
                "Check the --data path or the data_path configuration entry".to_string(),
                "Make sure the file is readable by the current user".to_string(),
            ],
            ExplorerError::Load(LoadError::ColumnNotFound { .. }) => vec![
                "Compare the CSV header with the columns section of the configuration".to_string(),
                "Header whitespace is ignored, spelling and case are not".to_string(),
            ],
            ExplorerError::Load(LoadError::MissingLocation { .. }) => {
                vec!["Every row needs a location path, fill or remove the empty rows".to_string()]
            }
            ExplorerError::Config(ConfigError::YamlParseError { .. }) => {
                vec!["Validate the configuration file as YAML".to_string()]
            }
            ExplorerError::Selection(_) => vec!["Type 'help' to list valid values".to_string()],
            _ => vec!["Check the error message for specific guidance".to_string()],
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::Load(LoadError::SourceFile { path, .. }) => {
                format!("The dashboard could not start: data file '{path}' is not readable.")
            }
            ExplorerError::Load(_) => {
                format!("The dashboard could not start: {self}")
            }
            _ => self.to_string(),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}
impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "INFO",
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
    pub fn color_code(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "\x1b[36m",
            ErrorSeverity::Warning => "\x1b[33m",
            ErrorSeverity::Error => "\x1b[31m",
            ErrorSeverity::Critical => "\x1b[35m",
        }
    }
}
pub struct ErrorReporter {
    pub show_suggestions: bool,
    pub colored_output: bool,
}
impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            show_suggestions: true,
            colored_output: true,
        }
    }
    pub fn plain() -> Self {
        Self {
            show_suggestions: true,
            colored_output: false,
        }
    }
    pub fn report(&self, error: &ExplorerError) -> String {
        let severity = error.severity();
        let mut output = String::new();
        if self.colored_output {
            output.push_str(severity.color_code());
        }
        output.push_str(&format!(
            "[{}] {}: {}\n",
            severity.as_str(),
            error.category(),
            error.user_message()
        ));
        if self.colored_output {
            output.push_str("\x1b[0m");
        }
        if self.show_suggestions {
            let suggestions = error.suggestions();
            if !suggestions.is_empty() {
                output.push_str("\nSuggestions:\n");
                for suggestion in suggestions {
                    output.push_str(&format!("  • {suggestion}\n"));
                }
            }
        }
        output
    }
}
impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
