//! Request types for the payroll API.
//!
//! Employee bodies reuse [`NewEmployee`](crate::models::NewEmployee) and
//! [`EmployeePatch`](crate::models::EmployeePatch) directly; this module holds
//! the query-string parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, RankBy};

/// Default number of rows returned by `/periods/:period_key/top`.
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Query parameters for `GET /employees`.
///
/// All filters are optional and combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// Exact department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Minimum monthly salary, inclusive.
    #[serde(default)]
    pub min_salary: Option<Decimal>,
}

impl EmployeeQuery {
    /// Returns whether `employee` passes every filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        let department_ok = self
            .department
            .as_deref()
            .is_none_or(|department| employee.department == department);
        let salary_ok = self
            .min_salary
            .is_none_or(|minimum| employee.salary >= minimum);
        department_ok && salary_ok
    }
}

/// Query parameters for `GET /periods/:period_key/line_items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItemQuery {
    /// Minimum salary, inclusive. Absent returns every line item.
    #[serde(default)]
    pub min_salary: Option<Decimal>,
}

/// Query parameters for `GET /periods/:period_key/top`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopQuery {
    /// Number of rows to return.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Ranking measure, `net` or `salary`.
    #[serde(default)]
    pub by: RankBy,
}

impl TopQuery {
    /// The requested limit, or [`DEFAULT_TOP_LIMIT`].
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_TOP_LIMIT)
    }
}
