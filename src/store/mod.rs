//! Persistence for employees and payroll periods.
//!
//! The payroll service talks to storage only through the [`EmployeeStore`]
//! and [`PeriodStore`] traits. Two implementations are provided: JSON files
//! on disk and in-memory collections.

mod json;
mod memory;

pub use json::{JsonEmployeeStore, JsonPeriodStore};
pub use memory::{InMemoryEmployeeStore, InMemoryPeriodStore};

use crate::error::EngineResult;
use crate::models::{Employee, PayrollPeriod, PeriodKey};

/// Keyed storage of employee records.
pub trait EmployeeStore {
    /// Inserts `employee`, replacing any record with the same id in place.
    fn save(&mut self, employee: &Employee) -> EngineResult<()>;

    /// Looks up an employee by id.
    fn get(&self, id: &str) -> EngineResult<Option<Employee>>;

    /// Returns every employee in insertion order.
    fn list_all(&self) -> EngineResult<Vec<Employee>>;

    /// Removes the employee with `id`, returning whether one existed.
    fn delete(&mut self, id: &str) -> EngineResult<bool>;
}

/// Snapshot storage of generated payroll periods.
pub trait PeriodStore {
    /// Writes `period`, overwriting any snapshot with the same key.
    fn save(&mut self, period: &PayrollPeriod) -> EngineResult<()>;

    /// Loads the full period, line items included.
    fn get(&self, period_key: &PeriodKey) -> EngineResult<Option<PayrollPeriod>>;

    /// Returns every stored key in chronological order.
    fn list_keys(&self) -> EngineResult<Vec<PeriodKey>>;

    /// Returns whether a snapshot exists for `period_key`.
    fn contains(&self, period_key: &PeriodKey) -> EngineResult<bool> {
        Ok(self.list_keys()?.contains(period_key))
    }
}

impl<T: EmployeeStore + ?Sized> EmployeeStore for Box<T> {
    fn save(&mut self, employee: &Employee) -> EngineResult<()> {
        (**self).save(employee)
    }

    fn get(&self, id: &str) -> EngineResult<Option<Employee>> {
        (**self).get(id)
    }

    fn list_all(&self) -> EngineResult<Vec<Employee>> {
        (**self).list_all()
    }

    fn delete(&mut self, id: &str) -> EngineResult<bool> {
        (**self).delete(id)
    }
}

impl<T: PeriodStore + ?Sized> PeriodStore for Box<T> {
    fn save(&mut self, period: &PayrollPeriod) -> EngineResult<()> {
        (**self).save(period)
    }

    fn get(&self, period_key: &PeriodKey) -> EngineResult<Option<PayrollPeriod>> {
        (**self).get(period_key)
    }

    fn list_keys(&self) -> EngineResult<Vec<PeriodKey>> {
        (**self).list_keys()
    }

    fn contains(&self, period_key: &PeriodKey) -> EngineResult<bool> {
        (**self).contains(period_key)
    }
}
