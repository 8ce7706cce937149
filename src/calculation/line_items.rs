//! Line item generation for a payroll run.
//!
//! This module turns the employee list into an ordered period, assigning
//! sequence ids by enumeration order.

use tracing::debug;

use crate::config::PayrollConfig;
use crate::models::{Employee, PayrollLineItem, PayrollPeriod, PeriodKey};

/// Builds the line item for the employee at 1-based position `sequence_id`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::build_line_item;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let luis = Employee::new("0987654321", "Luis Ruiz", Decimal::new(1200, 0), "IT", "Dev")?;
/// let item = build_line_item(2, &luis, &PayrollConfig::default());
/// assert_eq!(item.net_pay(), Decimal::from_str("1116.60").unwrap());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn build_line_item(sequence_id: u32, employee: &Employee, config: &PayrollConfig) -> PayrollLineItem {
    let item = PayrollLineItem::new(sequence_id, employee, config);
    debug!(
        sequence_id,
        employee_id = %employee.id,
        contribution = %item.contribution(),
        net_pay = %item.net_pay(),
        "Built line item"
    );
    item
}

/// Builds a period from `employees`, one line item each, in the given order.
///
/// Sequence ids start at 1. An empty slice yields an empty period; the
/// service layer refuses to persist such a period.
pub fn build_period(
    period_id: u32,
    period_key: PeriodKey,
    employees: &[Employee],
    config: &PayrollConfig,
) -> PayrollPeriod {
    let mut period = PayrollPeriod::new(period_id, period_key);
    for (sequence_id, employee) in (1u32..).zip(employees) {
        period.append_line_item(build_line_item(sequence_id, employee, config));
    }
    period
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scenario_employees() -> Vec<Employee> {
        vec![
            Employee::new("1234567890", "Ana Lopez", dec("800"), "Ventas", "Asesora").unwrap(),
            Employee::new("0987654321", "Luis Ruiz", dec("1200"), "IT", "Dev").unwrap(),
        ]
    }

    #[test]
    fn test_build_period_scenario() {
        let period = build_period(
            1,
            PeriodKey::parse("202501").unwrap(),
            &scenario_employees(),
            &PayrollConfig::default(),
        );

        let items = period.line_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].employee().name, "Ana Lopez");
        assert_eq!(items[0].net_pay(), dec("754.40"));
        assert_eq!(items[1].employee().name, "Luis Ruiz");
        assert_eq!(items[1].net_pay(), dec("1116.60"));
        assert_eq!(period.totals().net_total, dec("1871.00"));
    }

    #[test]
    fn test_sequence_ids_follow_enumeration_order() {
        let period = build_period(
            7,
            PeriodKey::parse("202502").unwrap(),
            &scenario_employees(),
            &PayrollConfig::default(),
        );
        let ids: Vec<u32> = period.line_items().iter().map(PayrollLineItem::id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(period.id(), 7);
    }

    #[test]
    fn test_empty_employee_list_builds_empty_period() {
        let period = build_period(
            1,
            PeriodKey::parse("202501").unwrap(),
            &[],
            &PayrollConfig::default(),
        );
        assert!(period.is_empty());
        assert_eq!(period.totals().net_total, Decimal::ZERO);
    }

    #[test]
    fn test_configured_allowances_are_applied() {
        let config = PayrollConfig {
            bonus: dec("0"),
            loan_deduction: dec("0"),
            ..PayrollConfig::default()
        };
        let item = build_line_item(1, &scenario_employees()[0], &config);
        assert_eq!(item.net_pay(), dec("724.40"));
    }
}
