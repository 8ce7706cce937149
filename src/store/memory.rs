//! In-memory stores, used by tests and embedded callers.

use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{Employee, PayrollPeriod, PeriodKey};

use super::{EmployeeStore, PeriodStore};

/// Employees held in a vector, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeStore {
    employees: Vec<Employee>,
}

impl InMemoryEmployeeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `employees`.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self { employees }
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn save(&mut self, employee: &Employee) -> EngineResult<()> {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => self.employees.push(employee.clone()),
        }
        Ok(())
    }

    fn get(&self, id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.iter().find(|e| e.id == id).cloned())
    }

    fn list_all(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    fn delete(&mut self, id: &str) -> EngineResult<bool> {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        Ok(self.employees.len() != before)
    }
}

/// Periods keyed by [`PeriodKey`], iterated in chronological order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPeriodStore {
    periods: BTreeMap<PeriodKey, PayrollPeriod>,
}

impl InMemoryPeriodStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PeriodStore for InMemoryPeriodStore {
    fn save(&mut self, period: &PayrollPeriod) -> EngineResult<()> {
        self.periods
            .insert(period.period_key().clone(), period.clone());
        Ok(())
    }

    fn get(&self, period_key: &PeriodKey) -> EngineResult<Option<PayrollPeriod>> {
        Ok(self.periods.get(period_key).cloned())
    }

    fn list_keys(&self) -> EngineResult<Vec<PeriodKey>> {
        Ok(self.periods.keys().cloned().collect())
    }

    fn contains(&self, period_key: &PeriodKey) -> EngineResult<bool> {
        Ok(self.periods.contains_key(period_key))
    }
}
