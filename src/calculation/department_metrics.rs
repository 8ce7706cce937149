//! Per-department metrics.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{DepartmentBreakdown, DepartmentMetrics, ExtremalEntry, PayrollLineItem};

use super::statistics::{average, first_max_by};

/// Groups `items` by department and computes metrics for each bucket.
///
/// Departments appear in the order they are first seen. Every item lands in
/// exactly one bucket. An empty slice yields an empty breakdown.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{build_period, department_metrics};
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employees = vec![
///     Employee::new("1234567890", "Ana Lopez", Decimal::new(800, 0), "Ventas", "Asesora")?,
///     Employee::new("0987654321", "Luis Ruiz", Decimal::new(1200, 0), "IT", "Dev")?,
/// ];
/// let period = build_period(1, "202501".parse()?, &employees, &PayrollConfig::default());
///
/// let breakdown = department_metrics(period.line_items());
/// assert_eq!(breakdown.names(), vec!["Ventas", "IT"]);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn department_metrics(items: &[PayrollLineItem]) -> DepartmentBreakdown {
    let mut order: Vec<(&str, Vec<PayrollLineItem>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let department = item.employee().department.as_str();
        let slot = *index.entry(department).or_insert_with(|| {
            order.push((department, Vec::new()));
            order.len() - 1
        });
        order[slot].1.push(item.clone());
    }

    let departments = order
        .into_iter()
        .map(|(department, members)| metrics_for(department, &members))
        .collect();

    DepartmentBreakdown::new(departments)
}

fn metrics_for(department: &str, members: &[PayrollLineItem]) -> DepartmentMetrics {
    let total_net: Decimal = members.iter().map(PayrollLineItem::net_pay).sum();
    DepartmentMetrics {
        department: department.to_string(),
        employee_count: members.len(),
        total_net,
        average_net: average(total_net, members.len()),
        highest_net: first_max_by(members, PayrollLineItem::net_pay)
            .map(|item| ExtremalEntry::from_item(item, item.net_pay())),
        line_item_ids: members.iter().map(PayrollLineItem::id).collect(),
    }
}
