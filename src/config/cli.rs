use crate::config::toml_config::SpooferConfig;
use crate::domain::collection::OutputFormat;
use crate::domain::query::CollectionQuery;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "spoofer")]
#[command(about = "Query the Spoofer API and save spoofing test results")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    #[arg(long, global = true, help = "Directory output files are written to")]
    pub output_path: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch one page of sessions and write it to a file
    Collection {
        /// Output file name, without extension
        file_name: String,

        #[arg(long, help = "Write CSV instead of JSON")]
        csv: bool,

        #[arg(long, allow_negative_numbers = true)]
        items_per_page: Option<i64>,

        #[arg(long)]
        asn: Option<u32>,

        #[arg(long)]
        before: Option<String>,

        #[arg(long)]
        after: Option<String>,

        #[arg(long)]
        strictly_before: Option<String>,

        #[arg(long)]
        strictly_after: Option<String>,

        #[arg(long, help = "Do not limit results to sessions from today onwards")]
        all_dates: bool,
    },
    /// Print the spoofing results of one session as JSON
    Session {
        id: i64,

        #[arg(long, default_value = "0", help = "4 or 6 for one address family, 0 for both")]
        ip_version: u8,
    },
}

impl CliConfig {
    /// Configuration file (or defaults) overlaid with command-line flags.
    pub fn resolve_config(&self) -> Result<SpooferConfig> {
        let mut config = match &self.config {
            Some(path) => SpooferConfig::from_file(path)?,
            None => SpooferConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(path) = &self.output_path {
            config.output.path = path.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Command {
    /// Builds the collection query, resolving the "today" lower bound
    /// against `today` when no `--after` is given.
    pub fn collection_query(
        &self,
        config: &SpooferConfig,
        today: NaiveDate,
    ) -> Option<(CollectionQuery, OutputFormat)> {
        let Command::Collection {
            csv,
            items_per_page,
            asn,
            before,
            after,
            strictly_before,
            strictly_after,
            all_dates,
            ..
        } = self
        else {
            return None;
        };

        let items_per_page = items_per_page.unwrap_or(config.collection.items_per_page);
        let mut query = if config.collection.recent_only && !all_dates {
            CollectionQuery::recent(items_per_page, today)
        } else {
            CollectionQuery::new(items_per_page)
        };

        query.asn = *asn;
        query.date_before = before.clone();
        query.date_strict_before = strictly_before.clone();
        query.date_strict_after = strictly_after.clone();
        if after.is_some() {
            query.date_after = after.clone();
        }

        let format = if *csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Json
        };
        Some((query, format))
    }
}
