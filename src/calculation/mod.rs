//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions that turn employee records into
//! line items and periods, and periods into reports: period statistics,
//! department metrics, salary segmentation, top-earner ranking and the
//! plain-text report.

mod department_metrics;
mod line_items;
mod report;
mod salary_distribution;
mod statistics;

pub use department_metrics::department_metrics;
pub use line_items::{build_line_item, build_period};
pub use report::render_report;
pub use salary_distribution::{filter_by_min_salary, salary_distribution, top_earners};
pub use statistics::period_statistics;
