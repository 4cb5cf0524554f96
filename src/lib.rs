//! Payroll Engine for the IG Metall Hessen collective agreement
//!
//! This crate computes a monthly payroll from per-day working times: hour
//! expansion with breaks and overnight shifts, monthly overtime, night,
//! weekend and holiday supplements under the highest-percentage rule, and
//! tax class and social insurance deductions.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
