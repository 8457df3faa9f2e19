use crate::types::{ExportAs, LogLevel, OutputFormat, RangeArg, RecordType, ThemeArg};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use minelog_types::PageSize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minelog")]
#[command(about = "Record, browse and export mine production, energy and chemical usage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace directory (defaults to $MINELOG_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the workspace: config, database and schema")]
    Init,

    #[command(about = "Show one page of filtered, sorted records")]
    List {
        kind: RecordType,

        #[command(flatten)]
        view: ViewArgs,

        /// Field to sort by (defaults to date, newest first)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// 1-based page number
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<PageSize>,
    },

    #[command(about = "Export every record matching the range and search")]
    Export {
        kind: RecordType,

        #[arg(id = "export_as", long = "as", value_name = "FORMAT")]
        format: ExportAs,

        #[command(flatten)]
        view: ViewArgs,

        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[arg(long)]
        theme: Option<ThemeArg>,

        /// strftime pattern for date cells (overrides config)
        #[arg(long)]
        date_format: Option<String>,
    },

    #[command(about = "Daily production records, keyed by date")]
    Production {
        #[command(subcommand)]
        command: ProductionCommand,
    },

    #[command(about = "Energy usage records")]
    Energy {
        #[command(subcommand)]
        command: EnergyCommand,
    },

    #[command(about = "Chemical usage records and the chemical catalog")]
    Chemical {
        #[command(subcommand)]
        command: ChemicalCommand,
    },

    #[command(about = "Company branding used on exported documents")]
    Branding {
        #[command(subcommand)]
        command: BrandingCommand,
    },
}

/// Range and search selection shared by `list` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Preset range; `custom` needs --from and --to
    #[arg(long)]
    pub range: Option<RangeArg>,

    /// Start date (yyyy-mm-dd); implies a custom range
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// End date (yyyy-mm-dd); implies a custom range
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Case-insensitive text matched against searchable fields
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ProductionFields {
    #[arg(long)]
    pub crushed: f64,

    #[arg(long)]
    pub hoisted: f64,

    /// Gold recovery rate, percent
    #[arg(long)]
    pub recovery: f64,

    /// Operational efficiency, percent
    #[arg(long)]
    pub efficiency: f64,

    /// Gold smelted, grams
    #[arg(long)]
    pub smelted: f64,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductionCommand {
    #[command(about = "Record a new production day")]
    Add {
        #[arg(long)]
        date: NaiveDate,

        #[command(flatten)]
        fields: ProductionFields,
    },

    #[command(about = "Replace the figures of an existing day")]
    Update {
        #[arg(long)]
        date: NaiveDate,

        #[command(flatten)]
        fields: ProductionFields,
    },

    #[command(about = "Delete a production day")]
    Delete {
        #[arg(long)]
        date: NaiveDate,
    },
}

#[derive(Subcommand)]
pub enum EnergyCommand {
    #[command(about = "Record energy usage")]
    Add {
        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        kwh: f64,

        #[arg(long)]
        electricity_cost: f64,

        #[arg(long)]
        diesel: f64,

        #[arg(long)]
        diesel_cost: f64,

        #[arg(long)]
        notes: Option<String>,
    },

    #[command(about = "Change fields of an energy usage record")]
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        kwh: Option<f64>,

        #[arg(long)]
        electricity_cost: Option<f64>,

        #[arg(long)]
        diesel: Option<f64>,

        #[arg(long)]
        diesel_cost: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    #[command(about = "Delete an energy usage record")]
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ChemicalCommand {
    #[command(about = "Record chemical usage; the amount is drawn from stock")]
    Add {
        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        chemical_id: i64,

        #[arg(long)]
        amount: f64,

        #[arg(long)]
        process: String,

        #[arg(long)]
        notes: Option<String>,
    },

    #[command(about = "Change fields of a chemical usage record")]
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        chemical_id: Option<i64>,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        process: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    #[command(about = "Delete a chemical usage record; its amount returns to stock")]
    Delete {
        #[arg(long)]
        id: i64,
    },

    #[command(about = "Manage the chemical catalog")]
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    #[command(about = "List catalog chemicals with stock levels")]
    List,

    #[command(about = "Add a chemical to the catalog")]
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        unit: String,

        #[arg(long)]
        unit_price: f64,

        #[arg(long, default_value = "0")]
        stock: f64,

        #[arg(long, default_value = "0")]
        minimum: f64,
    },
}

#[derive(Subcommand)]
pub enum BrandingCommand {
    #[command(about = "Show stored branding and the values exports will use")]
    Show,

    #[command(about = "Set branding fields; unspecified fields are kept")]
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tagline: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        website: Option<String>,

        /// Image file used as the logo on light-theme exports
        #[arg(long)]
        light_logo: Option<PathBuf>,

        /// Image file used as the logo on dark-theme exports
        #[arg(long)]
        dark_logo: Option<PathBuf>,
    },

    #[command(about = "Remove stored branding; exports fall back to defaults")]
    Clear,
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    PageSize::try_from(n).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_page_size_accepts_only_offered_sizes() {
        assert_eq!(parse_page_size("25"), Ok(PageSize::TwentyFive));
        assert!(parse_page_size("20").is_err());
        assert!(parse_page_size("ten").is_err());
    }

    #[test]
    fn test_range_aliases() {
        let cli = Cli::try_parse_from(["minelog", "list", "energy", "--range", "7days"]).unwrap();
        match cli.command {
            Some(Commands::List { view, .. }) => assert_eq!(view.range, Some(RangeArg::Last7Days)),
            _ => panic!("expected list command"),
        }
    }
}
