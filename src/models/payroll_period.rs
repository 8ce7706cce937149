//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] aggregate and its
//! [`PeriodTotals`]. Totals are recomputed over every line item on each
//! append, so they can never drift from the item set.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayrollLineItem, PeriodKey};

/// Running totals over a period's line items.
///
/// Each total is summed independently from the line items; net is not
/// derived from income and deductions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of total income.
    pub total_income: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub net_total: Decimal,
}

impl PeriodTotals {
    /// Sums the three totals over `items`.
    pub fn from_items(items: &[PayrollLineItem]) -> Self {
        Self {
            total_income: items.iter().map(PayrollLineItem::total_income).sum(),
            total_deductions: items.iter().map(PayrollLineItem::total_deductions).sum(),
            net_total: items.iter().map(PayrollLineItem::net_pay).sum(),
        }
    }
}

/// One monthly payroll run.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{Employee, PayrollLineItem, PayrollPeriod};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PayrollConfig::default();
/// let ana = Employee::new("1234567890", "Ana Lopez", Decimal::new(800, 0), "Ventas", "Asesora")?;
/// let luis = Employee::new("0987654321", "Luis Ruiz", Decimal::new(1200, 0), "IT", "Dev")?;
///
/// let mut period = PayrollPeriod::new(1, "202501".parse()?);
/// period.append_line_item(PayrollLineItem::new(1, &ana, &config));
/// period.append_line_item(PayrollLineItem::new(2, &luis, &config));
///
/// assert_eq!(period.totals().net_total, Decimal::from_str("1871.00").unwrap());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PeriodRecord", into = "PeriodRecord")]
pub struct PayrollPeriod {
    id: u32,
    period_key: PeriodKey,
    generated_at: DateTime<Utc>,
    line_items: Vec<PayrollLineItem>,
    totals: PeriodTotals,
}

impl PayrollPeriod {
    /// Creates an empty period stamped with the current time.
    pub fn new(id: u32, period_key: PeriodKey) -> Self {
        Self::with_timestamp(id, period_key, Utc::now())
    }

    /// Creates an empty period with an explicit generation time.
    pub fn with_timestamp(id: u32, period_key: PeriodKey, generated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            period_key,
            generated_at,
            line_items: Vec::new(),
            totals: PeriodTotals::default(),
        }
    }

    /// Appends a line item and recomputes the totals over the full sequence.
    pub fn append_line_item(&mut self, item: PayrollLineItem) {
        self.line_items.push(item);
        self.totals = PeriodTotals::from_items(&self.line_items);
    }

    /// The sequential period id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The `YYYYMM` label.
    pub fn period_key(&self) -> &PeriodKey {
        &self.period_key
    }

    /// When the period was generated.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Line items in employee-enumeration order.
    pub fn line_items(&self) -> &[PayrollLineItem] {
        &self.line_items
    }

    /// Current totals.
    pub fn totals(&self) -> PeriodTotals {
        self.totals
    }

    /// Number of line items.
    pub fn employee_count(&self) -> usize {
        self.line_items.len()
    }

    /// Returns true when no line items have been appended.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// The persisted form of a period.
///
/// Stored totals are informational; loading re-appends every line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PeriodRecord {
    id: u32,
    period_key: PeriodKey,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    totals: PeriodTotals,
    line_items: Vec<PayrollLineItem>,
}

impl From<PayrollPeriod> for PeriodRecord {
    fn from(period: PayrollPeriod) -> Self {
        Self {
            id: period.id,
            period_key: period.period_key,
            generated_at: period.generated_at,
            totals: period.totals,
            line_items: period.line_items,
        }
    }
}

impl From<PeriodRecord> for PayrollPeriod {
    fn from(record: PeriodRecord) -> Self {
        let mut period = PayrollPeriod::with_timestamp(record.id, record.period_key, record.generated_at);
        for item in record.line_items {
            period.append_line_item(item);
        }
        period
    }
}
