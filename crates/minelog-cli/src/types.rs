use clap::ValueEnum;
use minelog_engine::ExportFormat;
use minelog_types::{RangeSelector, RecordKind, Theme};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum RecordType {
    Production,
    Energy,
    Chemical,
}

impl From<RecordType> for RecordKind {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Production => RecordKind::Production,
            RecordType::Energy => RecordKind::EnergyUsage,
            RecordType::Chemical => RecordKind::ChemicalUsage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    Today,
    Week,
    Month,
    #[value(name = "last7days", alias = "7days")]
    Last7Days,
    #[value(name = "last30days", alias = "30days")]
    Last30Days,
    Custom,
}

impl From<RangeArg> for RangeSelector {
    fn from(value: RangeArg) -> Self {
        match value {
            RangeArg::Today => RangeSelector::Today,
            RangeArg::Week => RangeSelector::Week,
            RangeArg::Month => RangeSelector::Month,
            RangeArg::Last7Days => RangeSelector::Last7Days,
            RangeArg::Last30Days => RangeSelector::Last30Days,
            RangeArg::Custom => RangeSelector::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ExportAs {
    Csv,
    Pdf,
}

impl From<ExportAs> for ExportFormat {
    fn from(value: ExportAs) -> Self {
        match value {
            ExportAs::Csv => ExportFormat::Csv,
            ExportAs::Pdf => ExportFormat::Pdf,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}
