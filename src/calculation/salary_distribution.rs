//! Salary segmentation helpers.

use rust_decimal::Decimal;

use crate::models::{PayrollLineItem, RankBy, SalaryDistribution};

/// Counts line items per salary band.
///
/// Bands are 0-500, 501-1000, 1001-1500, 1501-2000 and 2000+, each upper
/// bound inclusive.
pub fn salary_distribution(items: &[PayrollLineItem]) -> SalaryDistribution {
    let band_500 = Decimal::new(500, 0);
    let band_1000 = Decimal::new(1000, 0);
    let band_1500 = Decimal::new(1500, 0);
    let band_2000 = Decimal::new(2000, 0);

    let mut distribution = SalaryDistribution::default();
    for item in items {
        let salary = item.salary();
        if salary <= band_500 {
            distribution.up_to_500 += 1;
        } else if salary <= band_1000 {
            distribution.up_to_1000 += 1;
        } else if salary <= band_1500 {
            distribution.up_to_1500 += 1;
        } else if salary <= band_2000 {
            distribution.up_to_2000 += 1;
        } else {
            distribution.above_2000 += 1;
        }
    }
    distribution
}

/// Returns the items whose salary is at least `minimum`, in period order.
pub fn filter_by_min_salary(items: &[PayrollLineItem], minimum: Decimal) -> Vec<&PayrollLineItem> {
    items.iter().filter(|item| item.salary() >= minimum).collect()
}

/// Returns up to `limit` items ranked by `by`, highest first.
///
/// The sort is stable, so equal values keep their period order.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{build_period, top_earners};
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{Employee, RankBy};
/// use rust_decimal::Decimal;
///
/// let employees = vec![
///     Employee::new("1234567890", "Ana Lopez", Decimal::new(800, 0), "Ventas", "Asesora")?,
///     Employee::new("0987654321", "Luis Ruiz", Decimal::new(1200, 0), "IT", "Dev")?,
/// ];
/// let period = build_period(1, "202501".parse()?, &employees, &PayrollConfig::default());
///
/// let top = top_earners(period.line_items(), 1, RankBy::Salary);
/// assert_eq!(top[0].employee().name, "Luis Ruiz");
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn top_earners(items: &[PayrollLineItem], limit: usize, by: RankBy) -> Vec<&PayrollLineItem> {
    let mut ranked: Vec<&PayrollLineItem> = items.iter().collect();
    ranked.sort_by(|a, b| by.value(b).cmp(&by.value(a)));
    ranked.truncate(limit);
    ranked
}
