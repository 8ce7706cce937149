//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! constants from a YAML file.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::payroll::PayrollConfig;

/// Loads payroll configuration from YAML.
///
/// # File Format
///
/// ```text
/// bonus: "50.00"
/// loan_deduction: "20.00"
/// contribution_rate: "0.0945"
/// high_salary_threshold: "1000.00"
/// ```
///
/// Omitted keys take their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration file at `path`.
    ///
    /// # Returns
    ///
    /// Returns the configuration on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let config = ConfigLoader::load("./config/payroll.yaml")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<PayrollConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Loads the file at `path`, or returns the defaults when it does not exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<PayrollConfig> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "Configuration file not found, using defaults");
            return Ok(PayrollConfig::default());
        }
        Self::load(path)
    }

    fn parse(content: &str, path: &str) -> EngineResult<PayrollConfig> {
        let config: PayrollConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        info!(
            path,
            bonus = %config.bonus,
            loan_deduction = %config.loan_deduction,
            contribution_rate = %config.contribution_rate,
            "Loaded payroll configuration"
        );
        Ok(config)
    }
}
