//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod day_entry;
mod hour_slot;
mod money;
mod pay_month;
mod payroll_result;
mod supplement;

pub use day_entry::{DayEntries, DayEntry, EntryField, TimeSheet, standard_entries};
pub use hour_slot::HourSlot;
pub use money::{format_eur, round_cents};
pub use pay_month::PayMonth;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionBreakdown, PayrollResult, SlotPayLine,
};
pub use supplement::{SupplementBreakdown, SupplementCategory, SupplementSet};
