use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "nhs-insights")]
#[command(about = "NHS open-data pharmacy counts and workforce projection charts")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log CPU and memory use per stage")]
    pub monitor: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the number of pharmacies in England for one list release
    PharmacyCount {
        #[arg(long)]
        endpoint: Option<String>,

        /// Dataset release, e.g. CONSOL_PHARMACY_LIST_202223Q4
        #[arg(long)]
        resource_id: Option<String>,

        #[arg(long)]
        timeout_seconds: Option<u64>,
    },
    /// Chart workforce projections per profession
    Chart {
        /// CSV with profession,scenario,year,total_registrants columns
        #[arg(long)]
        input: Option<String>,

        #[arg(long)]
        start_year: Option<i32>,

        #[arg(long)]
        duration: Option<u32>,

        #[arg(long)]
        output_dir: Option<String>,
    },
}

impl CliConfig {
    /// Loads `--config` (or the defaults) and applies the subcommand's flags on top.
    pub fn load_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        match &self.command {
            Command::PharmacyCount {
                endpoint,
                resource_id,
                timeout_seconds,
            } => {
                if let Some(endpoint) = endpoint {
                    config.source.endpoint = endpoint.clone();
                }
                if let Some(resource_id) = resource_id {
                    config.source.resource_id = resource_id.clone();
                }
                if timeout_seconds.is_some() {
                    config.source.timeout_seconds = *timeout_seconds;
                }
            }
            Command::Chart {
                input,
                start_year,
                duration,
                output_dir,
            } => {
                if let Some(input) = input {
                    config.projection.input = input.clone();
                }
                if let Some(start_year) = start_year {
                    config.projection.start_year = *start_year;
                }
                if let Some(duration) = duration {
                    config.projection.duration = *duration;
                }
                if output_dir.is_some() {
                    config.projection.output_dir = output_dir.clone();
                }
            }
        }
    }
}
