//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides the payroll ruleset (pay grades, tax classes,
//! working time, breaks, supplement rules and social insurance rates), the
//! loader that reads it from YAML files, and the server settings read from
//! the environment.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::RulesetLoader;
//!
//! let loader = RulesetLoader::load("./config/ig_metall_hessen").unwrap();
//! println!("Loaded ruleset: {}", loader.ruleset().metadata().name);
//! ```

mod loader;
mod server;
mod types;

pub use loader::RulesetLoader;
pub use server::ServerConfig;
pub use types::{
    BreakRule, DeductionsConfig, GeneralConfig, HourWindow, OvertimeTier, PayGrade,
    PayGradesConfig, Ruleset, RulesetMetadata, SocialInsuranceRates, StandardSchedule,
    SupplementRates, SupplementRules, TaxClass, TaxClassCode, TaxClassesConfig, WorkingTime,
};

pub(crate) use types::parse_month_day;
