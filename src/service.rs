//! Payroll service orchestration.
//!
//! [`PayrollService`] ties the employee and period stores to the calculation
//! functions. It owns the single copy of [`PayrollConfig`] and passes it
//! explicitly into every computation.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::calculation::{self, build_period, department_metrics, period_statistics};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DepartmentBreakdown, Employee, EmployeePatch, NewEmployee, PayrollLineItem, PayrollPeriod,
    PeriodKey, PeriodStatistics, RankBy, SalaryDistribution,
};
use crate::store::{EmployeeStore, PeriodStore};

/// Result of a period generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// A new period was built and persisted.
    Generated(PayrollPeriod),
    /// The employee store was empty; nothing was persisted.
    NoEmployees,
}

/// Employee management, period generation and period queries.
///
/// Queries for a period that was never generated return `Ok(None)`.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{NewEmployee, PeriodKey};
/// use payroll_engine::service::{GenerationOutcome, PayrollService};
/// use payroll_engine::store::{InMemoryEmployeeStore, InMemoryPeriodStore};
/// use rust_decimal::Decimal;
///
/// let mut service = PayrollService::new(
///     InMemoryEmployeeStore::new(),
///     InMemoryPeriodStore::new(),
///     PayrollConfig::default(),
/// );
/// service.create_employee(NewEmployee {
///     id: "1234567890".to_string(),
///     name: "Ana Lopez".to_string(),
///     salary: Decimal::new(800, 0),
///     department: "Ventas".to_string(),
///     role: "Asesora".to_string(),
/// })?;
///
/// let key: PeriodKey = "202501".parse()?;
/// let outcome = service.generate_period(&key)?;
/// assert!(matches!(outcome, GenerationOutcome::Generated(_)));
/// assert_eq!(service.list_periods()?, vec![key]);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct PayrollService<E, P> {
    employees: E,
    periods: P,
    config: PayrollConfig,
}

impl<E: EmployeeStore, P: PeriodStore> PayrollService<E, P> {
    /// Creates a service over the given stores.
    pub fn new(employees: E, periods: P, config: PayrollConfig) -> Self {
        Self {
            employees,
            periods,
            config,
        }
    }

    /// The figures every line item is built with.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Employees
    // ------------------------------------------------------------------

    /// Validates and stores a new employee.
    ///
    /// Fails with [`EngineError::EmployeeAlreadyExists`] if the id is taken.
    pub fn create_employee(&mut self, input: NewEmployee) -> EngineResult<Employee> {
        let employee = Employee::try_from(input)?;
        if self.employees.get(&employee.id)?.is_some() {
            return Err(EngineError::EmployeeAlreadyExists {
                id: employee.id.clone(),
            });
        }
        self.employees.save(&employee)?;
        info!(employee_id = %employee.id, department = %employee.department, "Created employee");
        Ok(employee)
    }

    /// Looks up an employee by id.
    pub fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
        self.employees.get(id)
    }

    /// Every employee in store order.
    pub fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.employees.list_all()
    }

    /// Applies `patch` to the employee with `id`.
    ///
    /// Returns `Ok(None)` for an unknown id. The patched record is validated
    /// before the store is touched.
    pub fn update_employee(
        &mut self,
        id: &str,
        patch: &EmployeePatch,
    ) -> EngineResult<Option<Employee>> {
        let Some(current) = self.employees.get(id)? else {
            return Ok(None);
        };
        let updated = patch.apply(&current)?;
        self.employees.save(&updated)?;
        info!(employee_id = %id, "Updated employee");
        Ok(Some(updated))
    }

    /// Removes an employee, returning whether one was removed.
    pub fn delete_employee(&mut self, id: &str) -> EngineResult<bool> {
        let removed = self.employees.delete(id)?;
        if removed {
            info!(employee_id = %id, "Deleted employee");
        }
        Ok(removed)
    }

    /// Employees matching `predicate`, in store order.
    pub fn find_employees<F>(&self, predicate: F) -> EngineResult<Vec<Employee>>
    where
        F: Fn(&Employee) -> bool,
    {
        Ok(self
            .employees
            .list_all()?
            .into_iter()
            .filter(|employee| predicate(employee))
            .collect())
    }

    // ------------------------------------------------------------------
    // Periods
    // ------------------------------------------------------------------

    /// Builds and persists the payroll for `period_key`.
    ///
    /// Every stored employee gets one line item, numbered from 1 in store
    /// order. The period id is one more than the number of stored periods.
    /// Generating a key twice fails with [`EngineError::PeriodAlreadyExists`].
    pub fn generate_period(&mut self, period_key: &PeriodKey) -> EngineResult<GenerationOutcome> {
        if self.periods.contains(period_key)? {
            return Err(EngineError::PeriodAlreadyExists {
                period_key: period_key.to_string(),
            });
        }

        let employees = self.employees.list_all()?;
        if employees.is_empty() {
            info!(period_key = %period_key, "No employees registered, nothing generated");
            return Ok(GenerationOutcome::NoEmployees);
        }

        let period_id = u32::try_from(self.periods.list_keys()?.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        let period = build_period(period_id, period_key.clone(), &employees, &self.config);
        self.periods.save(&period)?;

        info!(
            period_key = %period_key,
            period_id,
            employees = period.employee_count(),
            net_total = %period.totals().net_total,
            "Generated payroll period"
        );
        Ok(GenerationOutcome::Generated(period))
    }

    /// Loads a stored period.
    pub fn get_period(&self, period_key: &PeriodKey) -> EngineResult<Option<PayrollPeriod>> {
        self.periods.get(period_key)
    }

    /// Every stored period key in chronological order.
    pub fn list_periods(&self) -> EngineResult<Vec<PeriodKey>> {
        self.periods.list_keys()
    }

    /// Period-wide statistics.
    pub fn get_statistics(&self, period_key: &PeriodKey) -> EngineResult<Option<PeriodStatistics>> {
        let threshold = self.config.high_salary_threshold;
        self.with_period(period_key, |period| {
            period_statistics(period.line_items(), threshold)
        })
    }

    /// Per-department metrics in first-seen order.
    pub fn get_department_metrics(
        &self,
        period_key: &PeriodKey,
    ) -> EngineResult<Option<DepartmentBreakdown>> {
        self.with_period(period_key, |period| department_metrics(period.line_items()))
    }

    /// Salary band counts.
    pub fn salary_distribution(
        &self,
        period_key: &PeriodKey,
    ) -> EngineResult<Option<SalaryDistribution>> {
        self.with_period(period_key, |period| {
            calculation::salary_distribution(period.line_items())
        })
    }

    /// Line items in period order, optionally only those with a salary of
    /// at least `min_salary`.
    pub fn line_items(
        &self,
        period_key: &PeriodKey,
        min_salary: Option<Decimal>,
    ) -> EngineResult<Option<Vec<PayrollLineItem>>> {
        self.with_period(period_key, |period| match min_salary {
            Some(minimum) => calculation::filter_by_min_salary(period.line_items(), minimum)
                .into_iter()
                .cloned()
                .collect(),
            None => period.line_items().to_vec(),
        })
    }

    /// The `limit` highest-ranked line items.
    pub fn top_earners(
        &self,
        period_key: &PeriodKey,
        limit: usize,
        by: RankBy,
    ) -> EngineResult<Option<Vec<PayrollLineItem>>> {
        self.with_period(period_key, |period| {
            calculation::top_earners(period.line_items(), limit, by)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// The plain-text report.
    pub fn render_report(&self, period_key: &PeriodKey) -> EngineResult<Option<String>> {
        let threshold = self.config.high_salary_threshold;
        self.with_period(period_key, |period| {
            let stats = period_statistics(period.line_items(), threshold);
            calculation::render_report(period.period_key(), &stats, threshold)
        })
    }

    /// Sum of net totals across every stored period.
    pub fn total_net_all_periods(&self) -> EngineResult<Decimal> {
        let mut total = Decimal::ZERO;
        for key in self.periods.list_keys()? {
            if let Some(period) = self.periods.get(&key)? {
                total += period.totals().net_total;
            }
        }
        Ok(total)
    }

    fn with_period<T, F>(&self, period_key: &PeriodKey, f: F) -> EngineResult<Option<T>>
    where
        F: FnOnce(&PayrollPeriod) -> T,
    {
        match self.periods.get(period_key)? {
            Some(period) => Ok(Some(f(&period))),
            None => {
                debug!(period_key = %period_key, "Period not found");
                Ok(None)
            }
        }
    }
}
