use super::toml_config::{resolve_output_dir, TomlConfig};
use crate::core::location::output_file_name_for;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate, STATEMENT_EXTENSIONS};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "statement-normalizer")]
#[command(about = "Normalize bank and credit-card statement exports into one CSV schema")]
pub struct CliConfig {
    /// Statement export to normalize
    pub input: Option<String>,

    /// Directory for the output file (defaults to the input's directory)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Output file name (defaults to the input name with Input replaced by Output)
    #[arg(long)]
    pub output_name: Option<String>,

    /// Public URL prefix the output is served from
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log every accepted transaction
    #[arg(long)]
    pub debug: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// TOML settings file; command-line flags take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliConfig {
    /// Fill unset flags from a TOML file.
    pub fn merge_toml(&mut self, file: TomlConfig) {
        if self.input.is_none() {
            self.input = file.input.path;
        }
        if self.output_dir.is_none() {
            self.output_dir = file.output.dir;
        }
        if self.output_name.is_none() {
            self.output_name = file.output.file_name;
        }
        if self.base_url.is_none() {
            self.base_url = file.output.base_url;
        }
        self.debug |= file.run.debug.unwrap_or(false);
        self.verbose |= file.run.verbose.unwrap_or(false);
    }

    pub fn output_dir(&self) -> String {
        resolve_output_dir(self.output_dir.as_deref(), self.input_path())
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }

    fn output_file_name(&self) -> String {
        self.output_name
            .clone()
            .unwrap_or_else(|| output_file_name_for(self.input_path()))
    }

    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn debug(&self) -> bool {
        self.debug
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = validation::validate_required_field("input", &self.input)?;
        validation::validate_path("input", input)?;
        validation::validate_file_extension("input", input, STATEMENT_EXTENSIONS)?;

        if let Some(dir) = &self.output_dir {
            validation::validate_path("output_dir", dir)?;
        }
        if let Some(name) = &self.output_name {
            validation::validate_file_name("output_name", name)?;
        }
        if let Some(url) = &self.base_url {
            validation::validate_url("base_url", url)?;
        }
        Ok(())
    }
}
