//! Sanction order assembly.
//!
//! Turns the operator's selection of teachers and worked days into a
//! [`SanctionOrder`], and recomputes an existing order after its days change.
//! The order total is always the sum of its line amounts and is never set
//! any other way.

use crate::{
    config::RateTable,
    core::{amount::FormattedAmount, payment, roster::TeacherRoster},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One selected teacher and the days entered for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Application ID of the selected teacher
    pub app_id: String,
    /// Days as entered; negative values are rejected
    pub days: i64,
}

impl Selection {
    /// Convenience constructor.
    pub fn new(app_id: impl Into<String>, days: i64) -> Self {
        Self {
            app_id: app_id.into(),
            days,
        }
    }
}

/// One teacher's line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanctionLine {
    /// Application ID of the teacher
    pub app_id: String,
    /// Teacher name
    pub name: String,
    /// Teacher designation, which decides the daily rate
    pub designation: String,
    /// Teacher secondary code
    pub nic_pin: String,
    /// Worked days
    pub days: u32,
    /// `days` times the designation's daily rate
    pub amount: u64,
}

/// A sanction order with its lines and derived total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanctionOrder {
    /// Assigned when the order is stored
    pub id: Option<i64>,
    /// Month label the order covers
    pub month: String,
    /// Date of issue
    pub issued_date: NaiveDate,
    /// Lines in selection order
    pub lines: Vec<SanctionLine>,
    /// Sum of line amounts with its printed forms
    pub total: FormattedAmount,
    /// Where the rendered document was written, once rendered
    pub file_path: Option<String>,
}

impl SanctionOrder {
    /// Year printed on the order, taken from the issue date.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.issued_date.year()
    }
}

/// Builds an unsaved order from the operator's selections.
///
/// Selections with zero days are dropped. Every selected teacher must exist in
/// the roster, including zero-day ones.
///
/// # Errors
/// - `Error::Validation` for a blank month, no selections, negative days, a
///   teacher selected twice, or when no selection has any days
/// - `Error::TeacherNotFound` for an unknown application ID
/// - `Error::UnrecognizedDesignation` when the rate table rejects a designation
pub async fn build_order<R: TeacherRoster>(
    roster: &R,
    rates: &RateTable,
    month: &str,
    issued_date: NaiveDate,
    selections: &[Selection],
) -> Result<SanctionOrder> {
    let month = month.trim();
    if month.is_empty() {
        return Err(Error::validation("Please enter a month"));
    }
    if selections.is_empty() {
        return Err(Error::validation("Please select at least one teacher"));
    }

    let mut seen = HashSet::new();
    let mut checked = Vec::with_capacity(selections.len());
    for selection in selections {
        if !seen.insert(selection.app_id.as_str()) {
            return Err(Error::validation(format!(
                "Teacher {} is selected more than once",
                selection.app_id
            )));
        }
        checked.push((selection, checked_days(&selection.app_id, selection.days)?));
    }

    let mut lines = Vec::with_capacity(checked.len());
    for (selection, days) in checked {
        let teacher = roster
            .find_teacher(&selection.app_id)
            .await?
            .ok_or_else(|| Error::TeacherNotFound {
                app_id: selection.app_id.clone(),
            })?;

        if days == 0 {
            debug!("Skipping {} with zero days", teacher.app_id);
            continue;
        }

        let amount = payment::line_amount(rates, &teacher.designation, days)?;
        lines.push(SanctionLine {
            app_id: teacher.app_id,
            name: teacher.name,
            designation: teacher.designation,
            nic_pin: teacher.nic_pin,
            days,
            amount,
        });
    }

    if lines.is_empty() {
        return Err(Error::validation(
            "None of the selected teachers has any worked days",
        ));
    }

    let total = total_of(&lines)?;
    debug!(
        "Built order for {} with {} lines, total {}",
        month,
        lines.len(),
        total.grouped
    );

    Ok(SanctionOrder {
        id: None,
        month: month.to_string(),
        issued_date,
        lines,
        total,
        file_path: None,
    })
}

/// Applies new day counts to an order's existing lines and recomputes every
/// amount and the total.
///
/// Lines missing from `updates` keep their days. A line set to zero days is
/// kept with a zero amount.
///
/// # Errors
/// - `Error::Validation` for negative days or an application ID not on the order
/// - `Error::UnrecognizedDesignation` when the rate table rejects a designation
pub fn recompute_order(
    order: &SanctionOrder,
    rates: &RateTable,
    updates: &HashMap<String, i64>,
) -> Result<SanctionOrder> {
    let known: HashSet<&str> = order.lines.iter().map(|l| l.app_id.as_str()).collect();
    let mut unknown: Vec<&str> = updates
        .keys()
        .map(String::as_str)
        .filter(|id| !known.contains(id))
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        return Err(Error::validation(format!(
            "Teachers not on this order: {}",
            unknown.join(", ")
        )));
    }

    let mut lines = Vec::with_capacity(order.lines.len());
    for line in &order.lines {
        let days = match updates.get(&line.app_id) {
            Some(days) => checked_days(&line.app_id, *days)?,
            None => line.days,
        };
        let amount = payment::line_amount(rates, &line.designation, days)?;
        lines.push(SanctionLine {
            days,
            amount,
            ..line.clone()
        });
    }

    Ok(SanctionOrder {
        total: total_of(&lines)?,
        lines,
        ..order.clone()
    })
}

/// Sum of line amounts with both printed forms.
///
/// # Errors
/// Returns `Error::Validation` when the sum exceeds [`payment::MAX_AMOUNT`].
pub fn total_of(lines: &[SanctionLine]) -> Result<FormattedAmount> {
    lines
        .iter()
        .try_fold(0_u64, |total, line| total.checked_add(line.amount))
        .filter(|total| *total <= payment::MAX_AMOUNT)
        .map(FormattedAmount::new)
        .ok_or_else(|| Error::validation("Order total is too large"))
}

/// Days must be non-negative and fit the stored day column.
fn checked_days(app_id: &str, days: i64) -> Result<u32> {
    if days < 0 {
        return Err(Error::validation(format!(
            "Days for teacher {app_id} cannot be negative"
        )));
    }
    i32::try_from(days)
        .map(i32::unsigned_abs)
        .map_err(|_| Error::validation(format!("Days for teacher {app_id} are out of range")))
}
