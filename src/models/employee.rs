//! Employee model, validation and partial updates.
//!
//! This module defines the [`Employee`] record, the single validation
//! function applied before any record is constructed or replaced, and the
//! [`EmployeePatch`] used for partial updates.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of digits in an employee identifier.
pub const EMPLOYEE_ID_LENGTH: usize = 10;

/// Minimum length of name, department and role after trimming.
const MIN_TEXT_LENGTH: usize = 2;

/// Largest accepted monthly salary.
///
/// Keeps every line item and period total well inside `Decimal` range.
pub const MAX_SALARY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Salaries are whole cents.
const SALARY_SCALE: u32 = 2;

/// An employee on the payroll.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("1234567890", "Ana Lopez", Decimal::new(800, 0), "Ventas", "Asesora")?;
/// assert_eq!(employee.name, "Ana Lopez");
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Fixed-length numeric identifier, unique within the employee store.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Monthly base salary.
    pub salary: Decimal,
    /// Department the employee belongs to.
    pub department: String,
    /// Job title.
    pub role: String,
}

/// The unvalidated fields of a new employee, as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Identifier, must be exactly ten digits.
    pub id: String,
    /// Full name, letters and spaces only.
    pub name: String,
    /// Monthly base salary, positive, whole cents, at most [`MAX_SALARY`].
    pub salary: Decimal,
    /// Department name.
    pub department: String,
    /// Job title.
    pub role: String,
}

impl Employee {
    /// Validates the fields and builds an employee.
    ///
    /// Name, department and role are trimmed before being stored.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        salary: Decimal,
        department: impl Into<String>,
        role: impl Into<String>,
    ) -> EngineResult<Self> {
        Self::try_from(NewEmployee {
            id: id.into(),
            name: name.into(),
            salary,
            department: department.into(),
            role: role.into(),
        })
    }
}

impl TryFrom<NewEmployee> for Employee {
    type Error = EngineError;

    fn try_from(input: NewEmployee) -> EngineResult<Self> {
        validate_employee(&input)?;
        Ok(Self {
            id: input.id,
            name: input.name.trim().to_string(),
            salary: input.salary,
            department: input.department.trim().to_string(),
            role: input.role.trim().to_string(),
        })
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - ${:.2} - {}",
            self.name, self.id, self.salary, self.role
        )
    }
}

/// Checks every employee field, reporting the first failure.
///
/// Fields are checked in the order identifier, salary, name, department,
/// role.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{validate_employee, NewEmployee};
/// use rust_decimal::Decimal;
///
/// let input = NewEmployee {
///     id: "12345".to_string(),
///     name: "Ana Lopez".to_string(),
///     salary: Decimal::new(800, 0),
///     department: "Ventas".to_string(),
///     role: "Asesora".to_string(),
/// };
/// assert!(validate_employee(&input).is_err());
/// ```
pub fn validate_employee(input: &NewEmployee) -> EngineResult<()> {
    validate_id(&input.id)?;
    validate_salary(input.salary)?;
    validate_name(&input.name)?;
    validate_text("department", &input.department)?;
    validate_text("role", &input.role)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate_id(id: &str) -> EngineResult<()> {
    if id.trim().is_empty() {
        return Err(invalid("id", "must not be empty"));
    }
    if id.len() != EMPLOYEE_ID_LENGTH || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(
            "id",
            format!("must be exactly {} digits", EMPLOYEE_ID_LENGTH),
        ));
    }
    Ok(())
}

fn validate_salary(salary: Decimal) -> EngineResult<()> {
    if salary <= Decimal::ZERO {
        return Err(invalid("salary", "must be positive"));
    }
    if salary > MAX_SALARY {
        return Err(invalid("salary", format!("must not exceed {}", MAX_SALARY)));
    }
    if salary.normalize().scale() > SALARY_SCALE {
        return Err(invalid(
            "salary",
            format!("must have at most {} decimal places", SALARY_SCALE),
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> EngineResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid("name", "must not be empty"));
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(invalid("name", "may only contain letters and spaces"));
    }
    if trimmed.chars().count() < MIN_TEXT_LENGTH {
        return Err(invalid(
            "name",
            format!("must be at least {} characters", MIN_TEXT_LENGTH),
        ));
    }
    Ok(())
}

fn validate_text(field: &str, value: &str) -> EngineResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if trimmed.chars().count() < MIN_TEXT_LENGTH {
        return Err(invalid(
            field,
            format!("must be at least {} characters", MIN_TEXT_LENGTH),
        ));
    }
    Ok(())
}

/// A partial update to an employee.
///
/// Only the listed fields may change; the identifier is fixed for the life
/// of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement salary.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Replacement department.
    #[serde(default)]
    pub department: Option<String>,
    /// Replacement role.
    #[serde(default)]
    pub role: Option<String>,
}

impl EmployeePatch {
    /// Returns true when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.salary.is_none() && self.department.is_none() && self.role.is_none()
    }

    /// Applies the patch to a copy of `employee` and validates the result.
    ///
    /// The original record is left untouched when validation fails.
    pub fn apply(&self, employee: &Employee) -> EngineResult<Employee> {
        let mut updated = NewEmployee {
            id: employee.id.clone(),
            name: employee.name.clone(),
            salary: employee.salary,
            department: employee.department.clone(),
            role: employee.role.clone(),
        };
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(salary) = self.salary {
            updated.salary = salary;
        }
        if let Some(department) = &self.department {
            updated.department = department.clone();
        }
        if let Some(role) = &self.role {
            updated.role = role.clone();
        }
        Employee::try_from(updated)
    }
}
