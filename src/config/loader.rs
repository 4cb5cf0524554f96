//! Configuration loading functionality.
//!
//! This module provides the [`RulesetLoader`] type for loading a payroll
//! ruleset from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    DeductionsConfig, GeneralConfig, PayGradesConfig, Ruleset, SupplementRules, TaxClassesConfig,
};

/// Loads a payroll ruleset from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/ig_metall_hessen/
/// ├── ruleset.yaml      # Metadata, working time, breaks, standard schedule
/// ├── pay_grades.yaml   # Entgeltgruppen and monthly salaries
/// ├── tax_classes.yaml  # Steuerklassen with allowance and rate
/// ├── supplements.yaml  # Supplement rates, hour windows, overtime tiers, holidays
/// └── deductions.yaml   # Social insurance rates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::RulesetLoader;
///
/// let loader = RulesetLoader::load("./config/ig_metall_hessen").unwrap();
/// println!("Loaded ruleset: {}", loader.ruleset().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct RulesetLoader {
    ruleset: Ruleset,
}

impl RulesetLoader {
    /// Loads and validates the ruleset in the specified directory.
    ///
    /// Returns an error if any file is missing, contains invalid YAML or
    /// misses a required field, or if the assembled ruleset is inconsistent.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::RulesetLoader;
    ///
    /// let loader = RulesetLoader::load("./config/ig_metall_hessen")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let general = Self::load_yaml::<GeneralConfig>(&path.join("ruleset.yaml"))?;
        let pay_grades = Self::load_yaml::<PayGradesConfig>(&path.join("pay_grades.yaml"))?;
        let tax_classes = Self::load_yaml::<TaxClassesConfig>(&path.join("tax_classes.yaml"))?;
        let supplements = Self::load_yaml::<SupplementRules>(&path.join("supplements.yaml"))?;
        let deductions = Self::load_yaml::<DeductionsConfig>(&path.join("deductions.yaml"))?;

        let ruleset = Ruleset::new(
            general,
            pay_grades.pay_grades,
            tax_classes.tax_classes,
            supplements,
            deductions.social_insurance,
        )?;

        Ok(Self { ruleset })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded ruleset.
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Consumes the loader, returning the ruleset.
    pub fn into_ruleset(self) -> Ruleset {
        self.ruleset
    }
}
