//! Monthly payroll engine.
//!
//! This crate registers employees, generates one payroll per calendar month
//! (salary plus a fixed bonus, minus a mandatory contribution and a fixed
//! loan deduction), persists each period as a JSON snapshot and derives
//! statistics, department metrics and reports from stored periods.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;
