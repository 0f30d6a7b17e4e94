//! Order persistence.
//!
//! Orders are stored as one `sanctions` header row plus one
//! `sanction_teachers` row per line. Creating and updating an order always
//! happens inside a single database transaction, so a failure part-way
//! through leaves nothing behind. Updates overwrite rows in place; two edits
//! of the same order at the same time are not reconciled and the last
//! commit wins.

use crate::{
    core::{
        amount::FormattedAmount,
        sanction::{SanctionLine, SanctionOrder, total_of},
    },
    entities::{Sanction, SanctionTeacher, Teacher, sanction, sanction_teacher, teacher},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// One line of an order listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSummary {
    /// Teacher name as printed on the order
    pub name: String,
    /// Worked days
    pub days: u32,
}

/// An order as shown in the list of issued sanctions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Order identifier
    pub id: i64,
    /// Month label
    pub month: String,
    /// Date of issue
    pub issued_date: NaiveDate,
    /// Total in regional digit grouping
    pub total_amount: String,
    /// Rendered document location, if rendered
    pub file_path: Option<String>,
    /// Lines in order
    pub teachers: Vec<LineSummary>,
}

/// Persists a new order and its lines, returning the assigned identifier.
///
/// The stored total is derived from the lines, never taken from `order.total`.
pub async fn create_order(db: &DatabaseConnection, order: &SanctionOrder) -> Result<i64> {
    let total = total_of(&order.lines)?;

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let header = sanction::ActiveModel {
        total_amount: Set(i64::try_from(total.value)?),
        total_amount_display: Set(total.grouped),
        total_amount_words: Set(total.words),
        month: Set(order.month.clone()),
        issued_date: Set(order.issued_date),
        file_path: Set(order.file_path.clone().unwrap_or_default()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for line in &order.lines {
        sanction_teacher::ActiveModel {
            sanction_id: Set(header.id),
            app_id: Set(line.app_id.clone()),
            teacher_name: Set(line.name.clone()),
            designation: Set(line.designation.clone()),
            nic_pin: Set(line.nic_pin.clone()),
            days: Set(i32::try_from(line.days)?),
            amount: Set(i64::try_from(line.amount)?),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        "Stored sanction order {} for {} with {} lines",
        header.id,
        header.month,
        order.lines.len()
    );
    Ok(header.id)
}

/// Loads an order with its lines, joining each line to the teacher's current
/// roster entry.
///
/// Lines whose teacher has since been removed keep the details recorded when
/// the order was issued.
pub async fn get_order(db: &DatabaseConnection, order_id: i64) -> Result<SanctionOrder> {
    let header = Sanction::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let rows = lines_for(db, order_id).await?;
    let app_ids: Vec<String> = rows.iter().map(|row| row.app_id.clone()).collect();
    let teachers: HashMap<String, teacher::Model> = Teacher::find()
        .filter(teacher::Column::AppId.is_in(app_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.app_id.clone(), t))
        .collect();

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let (name, designation, nic_pin) = match teachers.get(&row.app_id) {
            Some(t) => (t.name.clone(), t.designation.clone(), t.nic_pin.clone()),
            None => {
                warn!(
                    "Teacher {} on order {} is no longer on the roster, using recorded details",
                    row.app_id, order_id
                );
                (row.teacher_name, row.designation, row.nic_pin)
            }
        };
        lines.push(SanctionLine {
            app_id: row.app_id,
            name,
            designation,
            nic_pin,
            days: u32::try_from(row.days)?,
            amount: u64::try_from(row.amount)?,
        });
    }

    Ok(SanctionOrder {
        id: Some(header.id),
        month: header.month,
        issued_date: header.issued_date,
        lines,
        total: FormattedAmount {
            value: u64::try_from(header.total_amount)?,
            grouped: header.total_amount_display,
            words: header.total_amount_words,
        },
        file_path: Some(header.file_path).filter(|path| !path.is_empty()),
    })
}

/// Lists every order, newest first, with the names and days of its lines.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<OrderSummary>> {
    let orders = Sanction::find()
        .find_with_related(SanctionTeacher)
        .all(db)
        .await?;

    let mut summaries = Vec::with_capacity(orders.len());
    for (header, mut rows) in orders {
        rows.sort_by_key(|row| row.id);
        let teachers = rows
            .into_iter()
            .map(|row| {
                Ok(LineSummary {
                    name: row.teacher_name,
                    days: u32::try_from(row.days)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        summaries.push(OrderSummary {
            id: header.id,
            month: header.month,
            issued_date: header.issued_date,
            total_amount: header.total_amount_display,
            file_path: Some(header.file_path).filter(|path| !path.is_empty()),
            teachers,
        });
    }

    // find_with_related orders by the primary key ascending first.
    summaries.sort_by(|a, b| b.id.cmp(&a.id));

    debug!("Fetched {} sanctions with teacher details", summaries.len());
    Ok(summaries)
}

/// Overwrites the days and amounts of an order's existing lines and rewrites
/// the header total from the resulting line amounts.
///
/// Lines of `order` that are not already stored are ignored.
pub async fn update_lines(
    db: &DatabaseConnection,
    order_id: i64,
    order: &SanctionOrder,
) -> Result<()> {
    let txn = db.begin().await?;

    let header = Sanction::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let updates: HashMap<&str, &SanctionLine> = order
        .lines
        .iter()
        .map(|line| (line.app_id.as_str(), line))
        .collect();

    let mut total: u64 = 0;
    for row in lines_for(&txn, order_id).await? {
        let Some(line) = updates.get(row.app_id.as_str()) else {
            total += u64::try_from(row.amount)?;
            continue;
        };

        total += line.amount;
        let mut active_model: sanction_teacher::ActiveModel = row.into();
        active_model.days = Set(i32::try_from(line.days)?);
        active_model.amount = Set(i64::try_from(line.amount)?);
        active_model.update(&txn).await?;
    }

    let total = FormattedAmount::new(total);
    let mut active_model: sanction::ActiveModel = header.into();
    active_model.total_amount = Set(i64::try_from(total.value)?);
    active_model.total_amount_display = Set(total.grouped);
    active_model.total_amount_words = Set(total.words);
    active_model.update(&txn).await?;

    txn.commit().await?;

    info!("Updated lines of sanction order {}", order_id);
    Ok(())
}

/// Records where an order's rendered document was written.
pub async fn set_file_path(db: &DatabaseConnection, order_id: i64, file_path: &str) -> Result<()> {
    let header = Sanction::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let mut active_model: sanction::ActiveModel = header.into();
    active_model.file_path = Set(file_path.to_string());
    active_model.update(db).await?;
    Ok(())
}

async fn lines_for<C>(db: &C, order_id: i64) -> Result<Vec<sanction_teacher::Model>>
where
    C: ConnectionTrait,
{
    SanctionTeacher::find()
        .filter(sanction_teacher::Column::SanctionId.eq(order_id))
        .order_by_asc(sanction_teacher::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
