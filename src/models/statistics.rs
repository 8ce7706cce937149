//! Report models produced by the statistics engine.
//!
//! None of these types are persisted; they are recomputed from a period's
//! line items whenever a report is requested.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollLineItem;

/// The line item that achieved an extremal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremalEntry {
    /// Sequence id of the line item.
    pub line_item_id: u32,
    /// Employee identifier.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Employee department.
    pub department: String,
    /// The value that was compared (net pay or salary).
    pub amount: Decimal,
}

impl ExtremalEntry {
    /// Captures `item` with the compared `amount`.
    pub fn from_item(item: &PayrollLineItem, amount: Decimal) -> Self {
        let employee = item.employee();
        Self {
            line_item_id: item.id(),
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            department: employee.department.clone(),
            amount,
        }
    }
}

/// Period-wide statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatistics {
    /// Number of line items.
    pub total_employees: usize,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Sum of total income.
    pub total_income: Decimal,
    /// Sum of base salaries.
    pub total_salary: Decimal,
    /// Sum of bonuses.
    pub total_bonus: Decimal,
    /// Sum of mandatory contributions.
    pub total_contribution: Decimal,
    /// Mean base salary, zero when there are no employees.
    pub average_salary: Decimal,
    /// Mean net pay, zero when there are no employees.
    pub average_net: Decimal,
    /// Employees whose salary is strictly above the threshold.
    pub high_salary_count: usize,
    /// Employees whose salary is at or below the threshold.
    pub low_salary_count: usize,
    /// First employee with the highest net pay.
    pub highest_net: Option<ExtremalEntry>,
    /// First employee with the lowest net pay.
    pub lowest_net: Option<ExtremalEntry>,
    /// First employee with the highest base salary.
    pub highest_salary: Option<ExtremalEntry>,
    /// Employee names in line-item order.
    pub employee_names: Vec<String>,
}

impl PeriodStatistics {
    /// The report for a period with no line items.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when the report covers no employees.
    pub fn is_empty(&self) -> bool {
        self.total_employees == 0
    }
}

/// Metrics for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentMetrics {
    /// Department name.
    pub department: String,
    /// Number of line items in the department.
    pub employee_count: usize,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Mean net pay.
    pub average_net: Decimal,
    /// First employee with the highest net pay in the department.
    pub highest_net: Option<ExtremalEntry>,
    /// Sequence ids of the member line items, in period order.
    pub line_item_ids: Vec<u32>,
}

/// Department metrics in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentBreakdown {
    departments: Vec<DepartmentMetrics>,
}

impl DepartmentBreakdown {
    /// Wraps metrics that are already in first-seen order.
    pub fn new(departments: Vec<DepartmentMetrics>) -> Self {
        Self { departments }
    }

    /// Looks up a department by name.
    pub fn get(&self, department: &str) -> Option<&DepartmentMetrics> {
        self.departments.iter().find(|m| m.department == department)
    }

    /// Department names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        self.departments.iter().map(|m| m.department.as_str()).collect()
    }

    /// Iterates the metrics in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, DepartmentMetrics> {
        self.departments.iter()
    }

    /// Number of departments.
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    /// Returns true when there are no departments.
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

impl<'a> IntoIterator for &'a DepartmentBreakdown {
    type Item = &'a DepartmentMetrics;
    type IntoIter = std::slice::Iter<'a, DepartmentMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.departments.iter()
    }
}

/// Employee counts per salary band.
///
/// Band upper bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryDistribution {
    /// Salary up to 500.
    #[serde(rename = "0-500")]
    pub up_to_500: usize,
    /// Salary above 500 up to 1000.
    #[serde(rename = "501-1000")]
    pub up_to_1000: usize,
    /// Salary above 1000 up to 1500.
    #[serde(rename = "1001-1500")]
    pub up_to_1500: usize,
    /// Salary above 1500 up to 2000.
    #[serde(rename = "1501-2000")]
    pub up_to_2000: usize,
    /// Salary above 2000.
    #[serde(rename = "2000+")]
    pub above_2000: usize,
}

impl SalaryDistribution {
    /// Total employees across all bands.
    pub fn total(&self) -> usize {
        self.up_to_500 + self.up_to_1000 + self.up_to_1500 + self.up_to_2000 + self.above_2000
    }
}

/// The figure used to rank employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    /// Rank by net pay.
    #[default]
    Net,
    /// Rank by base salary.
    Salary,
}

impl RankBy {
    /// Reads the ranked figure from a line item.
    pub fn value(self, item: &PayrollLineItem) -> Decimal {
        match self {
            RankBy::Net => item.net_pay(),
            RankBy::Salary => item.salary(),
        }
    }
}
