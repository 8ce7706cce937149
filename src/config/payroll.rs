//! Payroll constants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The fixed figures applied to every line item in a payroll run.
///
/// Each field falls back to its default when omitted from the YAML file.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// assert_eq!(config.bonus, Decimal::new(50, 0));
/// assert_eq!(config.contribution_rate, Decimal::new(945, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Flat bonus added to every employee's income.
    pub bonus: Decimal,
    /// Flat loan repayment deducted from every employee.
    pub loan_deduction: Decimal,
    /// Mandatory contribution rate applied to base salary.
    pub contribution_rate: Decimal,
    /// Salaries strictly above this value count as high salaries.
    pub high_salary_threshold: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            bonus: Decimal::new(50, 0),
            loan_deduction: Decimal::new(20, 0),
            contribution_rate: Decimal::new(945, 4),
            high_salary_threshold: Decimal::new(1000, 0),
        }
    }
}

impl PayrollConfig {
    /// Checks that every value is in range.
    ///
    /// Bonus, loan and threshold must be non-negative; the contribution rate
    /// must lie in `[0, 1)`.
    pub fn validate(&self) -> EngineResult<()> {
        let non_negative = [
            ("bonus", self.bonus),
            ("loan_deduction", self.loan_deduction),
            ("high_salary_threshold", self.high_salary_threshold),
        ];
        for (field, value) in non_negative {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }

        if self.contribution_rate < Decimal::ZERO || self.contribution_rate >= Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: "contribution_rate".to_string(),
                message: format!("must be in [0, 1), got {}", self.contribution_rate),
            });
        }

        Ok(())
    }
}
