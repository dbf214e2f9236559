use std::path::PathBuf;

use clap::Parser;

use crate::view::TableFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pkglens",
    about = "Inspect package.json / package-lock.json dependencies and check for updates",
    version
)]
pub struct Cli {
    /// package.json or package-lock.json to analyze
    pub file: PathBuf,

    /// Fetch latest version info for every package from the registry
    #[arg(long)]
    pub fetch: bool,

    /// Fetch latest version info for one package only (repeatable)
    #[arg(long, value_name = "NAME")]
    pub refresh: Vec<String>,

    /// Which view to show
    #[arg(long, default_value = "table", value_name = "VIEW")]
    pub view: ViewMode,

    /// Restrict the table to one dependency type
    #[arg(long, default_value = "all", value_name = "FILTER")]
    pub filter: FilterArg,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Config file [default: ./.pkglens/config.toml, fallback ~/.config/pkglens/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Registry base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub registry: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewMode {
    Table,
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterArg {
    All,
    Prod,
    Dev,
}

impl From<FilterArg> for TableFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => TableFilter::All,
            FilterArg::Prod => TableFilter::Production,
            FilterArg::Dev => TableFilter::Development,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pkglens", "package.json"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("package.json"));
        assert!(!cli.fetch);
        assert!(cli.refresh.is_empty());
        assert_eq!(cli.view, ViewMode::Table);
        assert_eq!(TableFilter::from(cli.filter), TableFilter::All);
        assert_eq!(cli.report, ReportFormat::Terminal);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "pkglens",
            "package-lock.json",
            "--fetch",
            "--refresh",
            "react",
            "--refresh",
            "jest",
            "--view",
            "tree",
            "--filter",
            "dev",
            "--report",
            "json",
            "--registry",
            "http://localhost:4873",
            "-vv",
        ])
        .unwrap();
        assert!(cli.fetch);
        assert_eq!(cli.refresh, vec!["react", "jest"]);
        assert_eq!(cli.view, ViewMode::Tree);
        assert_eq!(TableFilter::from(cli.filter), TableFilter::Development);
        assert_eq!(cli.report, ReportFormat::Json);
        assert_eq!(cli.registry.as_deref(), Some("http://localhost:4873"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["pkglens"]).is_err());
    }

    #[test]
    fn test_invalid_view() {
        assert!(Cli::try_parse_from(["pkglens", "package.json", "--view", "graph3d"]).is_err());
    }
}
