//! Payroll line item model.
//!
//! A [`PayrollLineItem`] holds one employee's figures for one period. Only
//! the inputs are kept in memory; income, deductions and net pay are derived
//! from them on every access.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;

use super::Employee;

/// Rounds the mandatory contribution on `salary` to cents.
///
/// Midpoints round away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::mandatory_contribution;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from_str("0.0945").unwrap();
/// assert_eq!(mandatory_contribution(Decimal::new(800, 0), rate), Decimal::from_str("75.60").unwrap());
/// assert_eq!(mandatory_contribution(Decimal::new(10, 0), rate), Decimal::from_str("0.95").unwrap());
/// ```
pub fn mandatory_contribution(salary: Decimal, rate: Decimal) -> Decimal {
    (salary * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One employee's payroll figures for one period.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{Employee, PayrollLineItem};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee::new("1234567890", "Ana Lopez", Decimal::new(800, 0), "Ventas", "Asesora")?;
/// let item = PayrollLineItem::new(1, &employee, &PayrollConfig::default());
///
/// assert_eq!(item.total_income(), Decimal::new(850, 0));
/// assert_eq!(item.contribution(), Decimal::from_str("75.60").unwrap());
/// assert_eq!(item.net_pay(), Decimal::from_str("754.40").unwrap());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord", into = "LineItemRecord")]
pub struct PayrollLineItem {
    id: u32,
    employee: Employee,
    salary: Decimal,
    bonus: Decimal,
    contribution: Decimal,
    loan_deduction: Decimal,
}

impl PayrollLineItem {
    /// Builds the line item for `employee` using the configured allowances.
    pub fn new(id: u32, employee: &Employee, config: &PayrollConfig) -> Self {
        Self::from_parts(
            id,
            employee.clone(),
            config.bonus,
            config.loan_deduction,
            config.contribution_rate,
        )
    }

    /// Builds a line item from explicit bonus, loan and contribution rate.
    pub fn from_parts(
        id: u32,
        employee: Employee,
        bonus: Decimal,
        loan_deduction: Decimal,
        contribution_rate: Decimal,
    ) -> Self {
        let salary = employee.salary;
        Self {
            id,
            employee,
            salary,
            bonus,
            contribution: mandatory_contribution(salary, contribution_rate),
            loan_deduction,
        }
    }

    /// The 1-based position of this item within its period.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The employee copy embedded at generation time.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Base salary at generation time.
    pub fn salary(&self) -> Decimal {
        self.salary
    }

    /// Flat bonus.
    pub fn bonus(&self) -> Decimal {
        self.bonus
    }

    /// Mandatory contribution, already rounded to cents.
    pub fn contribution(&self) -> Decimal {
        self.contribution
    }

    /// Flat loan deduction.
    pub fn loan_deduction(&self) -> Decimal {
        self.loan_deduction
    }

    /// Salary plus bonus.
    pub fn total_income(&self) -> Decimal {
        self.salary + self.bonus
    }

    /// Contribution plus loan deduction.
    pub fn total_deductions(&self) -> Decimal {
        self.contribution + self.loan_deduction
    }

    /// Total income minus total deductions.
    pub fn net_pay(&self) -> Decimal {
        self.total_income() - self.total_deductions()
    }
}

/// The persisted form of a line item.
///
/// Carries the derived figures so a snapshot reads on its own; they are
/// checked against the inputs when the snapshot is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LineItemRecord {
    id: u32,
    employee: Employee,
    salary: Decimal,
    bonus: Decimal,
    total_income: Decimal,
    contribution: Decimal,
    loan_deduction: Decimal,
    total_deductions: Decimal,
    net_pay: Decimal,
}

impl From<PayrollLineItem> for LineItemRecord {
    fn from(item: PayrollLineItem) -> Self {
        Self {
            total_income: item.total_income(),
            total_deductions: item.total_deductions(),
            net_pay: item.net_pay(),
            id: item.id,
            employee: item.employee,
            salary: item.salary,
            bonus: item.bonus,
            contribution: item.contribution,
            loan_deduction: item.loan_deduction,
        }
    }
}

impl TryFrom<LineItemRecord> for PayrollLineItem {
    type Error = String;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        if record.salary != record.employee.salary {
            return Err(format!(
                "line item {}: stored salary {} does not match employee salary {}",
                record.id, record.salary, record.employee.salary
            ));
        }

        let item = PayrollLineItem {
            id: record.id,
            employee: record.employee,
            salary: record.salary,
            bonus: record.bonus,
            contribution: record.contribution,
            loan_deduction: record.loan_deduction,
        };

        let checks = [
            ("total_income", record.total_income, item.total_income()),
            ("total_deductions", record.total_deductions, item.total_deductions()),
            ("net_pay", record.net_pay, item.net_pay()),
        ];
        for (field, stored, derived) in checks {
            if stored != derived {
                return Err(format!(
                    "line item {}: stored {} {} does not match derived {}",
                    record.id, field, stored, derived
                ));
            }
        }

        Ok(item)
    }
}
