//! Plain-text payroll report.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ExtremalEntry, PeriodKey, PeriodStatistics};

const RULE_WIDTH: usize = 50;

/// Renders the full report for one period.
///
/// Amounts are rounded half away from zero to two decimals; missing
/// highlights show as `N/A`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::render_report;
/// use payroll_engine::models::{PeriodKey, PeriodStatistics};
/// use rust_decimal::Decimal;
///
/// let key: PeriodKey = "202501".parse()?;
/// let report = render_report(&key, &PeriodStatistics::empty(), Decimal::new(1000, 0));
/// assert!(report.contains("PAYROLL REPORT - 202501"));
/// assert!(report.contains("Highest net: N/A"));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn render_report(
    period_key: &PeriodKey,
    stats: &PeriodStatistics,
    high_salary_threshold: Decimal,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, period_key, stats, high_salary_threshold);
    out
}

fn write_report(
    out: &mut String,
    period_key: &PeriodKey,
    stats: &PeriodStatistics,
    threshold: Decimal,
) -> std::fmt::Result {
    writeln!(out, "PAYROLL REPORT - {}", period_key)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)?;
    writeln!(out, "EMPLOYEES")?;
    writeln!(out, "  Total: {}", stats.total_employees)?;
    writeln!(out, "  Net payroll: ${:.2}", money(stats.total_net))?;
    writeln!(out, "  Average salary: ${:.2}", money(stats.average_salary))?;
    writeln!(out, "  Average net: ${:.2}", money(stats.average_net))?;
    writeln!(out)?;
    writeln!(out, "INCOME AND DEDUCTIONS")?;
    writeln!(out, "  Total income: ${:.2}", money(stats.total_income))?;
    writeln!(out, "  Total bonuses: ${:.2}", money(stats.total_bonus))?;
    writeln!(out, "  Total contributions: ${:.2}", money(stats.total_contribution))?;
    writeln!(out)?;
    writeln!(out, "HIGHLIGHTS")?;
    writeln!(out, "  Highest net: {}", highlight(stats.highest_net.as_ref()))?;
    writeln!(out, "  Lowest net: {}", highlight(stats.lowest_net.as_ref()))?;
    writeln!(out, "  Highest salary: {}", highlight(stats.highest_salary.as_ref()))?;
    writeln!(out)?;
    writeln!(out, "DISTRIBUTION")?;
    writeln!(out, "  Salary > ${:.2}: {}", money(threshold), stats.high_salary_count)?;
    writeln!(out, "  Salary <= ${:.2}: {}", money(threshold), stats.low_salary_count)?;
    Ok(())
}

fn money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn highlight(entry: Option<&ExtremalEntry>) -> String {
    match entry {
        Some(entry) => format!("{} (${:.2})", entry.name, money(entry.amount)),
        None => "N/A".to_string(),
    }
}
