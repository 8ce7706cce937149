//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod line_item;
mod payroll_period;
mod period_key;
mod statistics;

pub use employee::{
    EMPLOYEE_ID_LENGTH, Employee, EmployeePatch, MAX_SALARY, NewEmployee, validate_employee,
};
pub use line_item::{PayrollLineItem, mandatory_contribution};
pub use payroll_period::{PayrollPeriod, PeriodTotals};
pub use period_key::PeriodKey;
pub use statistics::{
    DepartmentBreakdown, DepartmentMetrics, ExtremalEntry, PeriodStatistics, RankBy,
    SalaryDistribution,
};
