//! Configuration loading for the payroll engine.
//!
//! The fixed payroll constants (bonus, loan deduction, contribution rate and
//! the high-salary threshold) are loaded from a YAML file and passed
//! explicitly into every calculation.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Bonus: {}", config.bonus);
//! ```

mod loader;
mod payroll;

pub use loader::ConfigLoader;
pub use payroll::PayrollConfig;
