use crate::core::location::output_file_name_for;
use crate::core::ConfigProvider;
use crate::utils::error::{NormalizeError, Result};
use crate::utils::validation::{self, Validate, STATEMENT_EXTENSIONS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

/// Settings file for unattended runs.
///
/// ```toml
/// [input]
/// path = "uploads/HDFC-Input-Case1.csv"
///
/// [output]
/// dir = "outputs"
/// base_url = "https://${PUBLIC_HOST}/"
///
/// [run]
/// debug = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: Option<String>,
    pub file_name: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub debug: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NormalizeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NormalizeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        let input = validation::validate_required_field("input.path", &self.input.path)?;
        validation::validate_path("input.path", input)?;
        validation::validate_file_extension("input.path", input, STATEMENT_EXTENSIONS)?;

        if let Some(dir) = &self.output.dir {
            validation::validate_path("output.dir", dir)?;
        }
        if let Some(name) = &self.output.file_name {
            validation::validate_file_name("output.file_name", name)?;
        }
        if let Some(url) = &self.output.base_url {
            validation::validate_url("output.base_url", url)?;
        }

        Ok(())
    }

    /// Directory the artifact is written to: `output.dir`, else the input's directory.
    pub fn output_dir(&self) -> String {
        resolve_output_dir(self.output.dir.as_deref(), self.input_path())
    }

    pub fn debug_enabled(&self) -> bool {
        self.run.debug.unwrap_or(false)
    }
}

/// Explicit directory, else the input file's directory, else the working directory.
pub fn resolve_output_dir(explicit: Option<&str>, input_path: &str) -> String {
    if let Some(dir) = explicit {
        return dir.to_string();
    }
    Path::new(input_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string())
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.input.path.as_deref().unwrap_or("")
    }

    fn output_file_name(&self) -> String {
        self.output
            .file_name
            .clone()
            .unwrap_or_else(|| output_file_name_for(self.input_path()))
    }

    fn base_url(&self) -> Option<&str> {
        self.output.base_url.as_deref()
    }

    fn debug(&self) -> bool {
        self.debug_enabled()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
