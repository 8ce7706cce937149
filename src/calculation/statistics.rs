//! Period-level statistics.
//!
//! Pure functions over an ordered slice of line items. Each total is
//! accumulated in its own pass, and extremal selection is a stable linear
//! scan where the earliest item wins a tie.

use rust_decimal::Decimal;

use crate::models::{ExtremalEntry, PayrollLineItem, PeriodStatistics};

/// Divides `total` by `count`, returning zero for an empty set.
pub(crate) fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Returns the first item with the greatest `key`.
///
/// `Iterator::max_by_key` keeps the last maximum, so the scan is explicit.
pub(crate) fn first_max_by<F>(items: &[PayrollLineItem], key: F) -> Option<&PayrollLineItem>
where
    F: Fn(&PayrollLineItem) -> Decimal,
{
    let mut best: Option<(&PayrollLineItem, Decimal)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

/// Returns the first item with the smallest `key`.
pub(crate) fn first_min_by<F>(items: &[PayrollLineItem], key: F) -> Option<&PayrollLineItem>
where
    F: Fn(&PayrollLineItem) -> Decimal,
{
    let mut best: Option<(&PayrollLineItem, Decimal)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

/// Computes the period-wide report for `items`.
///
/// Salaries strictly above `high_salary_threshold` count as high; the rest
/// count as low. An empty slice yields [`PeriodStatistics::empty`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{build_period, period_statistics};
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PayrollConfig::default();
/// let employees = vec![
///     Employee::new("1234567890", "Ana Lopez", Decimal::new(800, 0), "Ventas", "Asesora")?,
///     Employee::new("0987654321", "Luis Ruiz", Decimal::new(1200, 0), "IT", "Dev")?,
/// ];
/// let period = build_period(1, "202501".parse()?, &employees, &config);
///
/// let stats = period_statistics(period.line_items(), config.high_salary_threshold);
/// assert_eq!(stats.total_net, Decimal::from_str("1871.00").unwrap());
/// assert_eq!(stats.high_salary_count, 1);
/// assert_eq!(stats.highest_net.unwrap().name, "Luis Ruiz");
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn period_statistics(
    items: &[PayrollLineItem],
    high_salary_threshold: Decimal,
) -> PeriodStatistics {
    if items.is_empty() {
        return PeriodStatistics::empty();
    }

    let count = items.len();
    let total_net: Decimal = items.iter().map(PayrollLineItem::net_pay).sum();
    let total_income: Decimal = items.iter().map(PayrollLineItem::total_income).sum();
    let total_salary: Decimal = items.iter().map(PayrollLineItem::salary).sum();
    let total_bonus: Decimal = items.iter().map(PayrollLineItem::bonus).sum();
    let total_contribution: Decimal = items.iter().map(PayrollLineItem::contribution).sum();

    let high_salary_count = items
        .iter()
        .filter(|item| item.salary() > high_salary_threshold)
        .count();
    let low_salary_count = items
        .iter()
        .filter(|item| item.salary() <= high_salary_threshold)
        .count();

    let highest_net = first_max_by(items, PayrollLineItem::net_pay)
        .map(|item| ExtremalEntry::from_item(item, item.net_pay()));
    let lowest_net = first_min_by(items, PayrollLineItem::net_pay)
        .map(|item| ExtremalEntry::from_item(item, item.net_pay()));
    let highest_salary = first_max_by(items, PayrollLineItem::salary)
        .map(|item| ExtremalEntry::from_item(item, item.salary()));

    PeriodStatistics {
        total_employees: count,
        total_net,
        total_income,
        total_salary,
        total_bonus,
        total_contribution,
        average_salary: average(total_salary, count),
        average_net: average(total_net, count),
        high_salary_count,
        low_salary_count,
        highest_net,
        lowest_net,
        highest_salary,
        employee_names: items.iter().map(|item| item.employee().name.clone()).collect(),
    }
}
