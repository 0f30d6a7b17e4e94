//! Issue and edit pipelines.
//!
//! Each operation runs validate → compute → persist → render in sequence.
//! Rendered documents are stored as `<output_dir>/sanction_<id>.pdf`; the
//! month/year name from the configuration is only offered as the download
//! name, so two orders for the same month never overwrite each other.

use crate::{
    config::AppConfig,
    core::{
        document,
        sanction::{self, SanctionOrder, Selection},
        store,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};

/// A rendered order ready to hand out as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// Where the PDF was written
    pub path: PathBuf,
    /// File name to offer for download
    pub download_name: String,
}

/// Result of issuing or editing an order.
#[derive(Debug, Clone)]
pub struct IssuedSanction {
    /// The stored order
    pub order: SanctionOrder,
    /// Its rendered document
    pub artifact: RenderedArtifact,
}

/// Builds, stores and renders a new sanction order.
///
/// Validation and teacher lookups finish before anything is written. If
/// rendering fails the order stays stored without a document and can be
/// rendered again with [`render_sanction`].
pub async fn issue_sanction(
    db: &DatabaseConnection,
    config: &AppConfig,
    month: &str,
    issued_date: NaiveDate,
    selections: &[Selection],
) -> Result<IssuedSanction> {
    let mut order =
        sanction::build_order(db, &config.rates, month, issued_date, selections).await?;

    let order_id = store::create_order(db, &order).await?;
    order.id = Some(order_id);

    let artifact = publish(db, config, order_id, &mut order).await?;
    info!(
        "Issued sanction order {} for {} {}: {} teachers, total {}",
        order_id,
        order.month,
        order.year(),
        order.lines.len(),
        order.total.grouped
    );
    Ok(IssuedSanction { order, artifact })
}

/// Changes the days of an order's existing lines, recomputes amounts and the
/// total, stores the result in place and renders the document again.
pub async fn edit_sanction(
    db: &DatabaseConnection,
    config: &AppConfig,
    order_id: i64,
    updates: &HashMap<String, i64>,
) -> Result<IssuedSanction> {
    let stored = store::get_order(db, order_id).await?;
    let mut order = sanction::recompute_order(&stored, &config.rates, updates)?;

    store::update_lines(db, order_id, &order).await?;

    let artifact = publish(db, config, order_id, &mut order).await?;
    info!(
        "Edited sanction order {}: new total {}",
        order_id, order.total.grouped
    );
    Ok(IssuedSanction { order, artifact })
}

/// Renders a stored order again, e.g. after a failed render or a deleted file.
pub async fn render_sanction(
    db: &DatabaseConnection,
    config: &AppConfig,
    order_id: i64,
) -> Result<RenderedArtifact> {
    let mut order = store::get_order(db, order_id).await?;
    publish(db, config, order_id, &mut order).await
}

/// Path the document of `order_id` is written to.
#[must_use]
pub fn artifact_path(output_dir: &Path, order_id: i64) -> PathBuf {
    output_dir.join(format!("sanction_{order_id}.pdf"))
}

async fn publish(
    db: &DatabaseConnection,
    config: &AppConfig,
    order_id: i64,
    order: &mut SanctionOrder,
) -> Result<RenderedArtifact> {
    let path = artifact_path(&config.output_dir, order_id);
    let bytes = document::render(order, &config.document)
        .inspect_err(|e| error!("Failed to render order {}: {}", order_id, e))?;
    write_atomically(&path, &bytes)
        .inspect_err(|e| error!("Failed to write order {}: {}", order_id, e))?;

    let stored_path = path.to_string_lossy().into_owned();
    store::set_file_path(db, order_id, &stored_path).await?;
    order.file_path = Some(stored_path);
    info!("PDF generated at {}", path.display());

    Ok(RenderedArtifact {
        path,
        download_name: config
            .document
            .download_name_for(&order.month, order.year()),
    })
}

/// Writes next to the target and renames, so a failed write never leaves a
/// truncated document at `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let to_render_error = |e: std::io::Error| Error::Render {
        message: format!("Cannot write {}: {e}", path.display()),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_render_error)?;
    }
    let temp = path.with_extension("pdf.part");
    fs::write(&temp, bytes).map_err(to_render_error)?;
    fs::rename(&temp, path).map_err(|e| {
        let _ = fs::remove_file(&temp);
        to_render_error(e)
    })
}
