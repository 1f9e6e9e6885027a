use chrono_tz::Tz;
use tracing::{info, instrument};

use crate::enrichment::{enrich_quantities, enrich_username};
use crate::error::Result;
use crate::outputs::{write_xlsx, ExportArtifact};
use crate::projection::{project_columns, rows_to_frame};
use crate::sanitize::sanitize_frame;
use crate::session_join::join_sessions;
use crate::settings::ExportSettings;
use crate::store::CountSource;
use crate::timestamp_normalizer::normalize_row_timestamp;
use crate::types::{
    CountSession, ExportRow, ExportSummary, MasterQuantities, RowIssue, StockCountRecord,
};

/// Enriched rows for one export, newest record first, with every absorbed row condition.
#[derive(Debug, Clone)]
pub struct ExportBatch {
    pub rows: Vec<ExportRow>,
    pub issues: Vec<RowIssue>,
    pub summary: ExportSummary,
}

/// Join, enrich and normalize. Each row is threaded through the stages on its own, so one
/// bad row only affects itself.
pub fn build_export(
    records: &[StockCountRecord],
    sessions: &[CountSession],
    masters: &MasterQuantities,
    tz: Tz,
) -> ExportBatch {
    let outcome = join_sessions(records, sessions);

    let mut summary = ExportSummary {
        total_records: records.len(),
        ..ExportSummary::default()
    };
    let mut issues = outcome.excluded;
    let mut rows = Vec::with_capacity(outcome.joined.len());

    for joined in outcome.joined {
        let row = ExportRow::from_joined(joined.record, joined.session);
        let row = enrich_username(row, &joined.session.owner_username);
        let (row, quantity_issue) = enrich_quantities(row, masters);
        let (row, timestamp_issue) = normalize_row_timestamp(row, tz);

        issues.extend(quantity_issue);
        issues.extend(timestamp_issue);
        rows.push(row);
    }

    for issue in &issues {
        summary.record_issue(issue);
    }
    summary.exported_rows = rows.len();

    ExportBatch {
        rows,
        issues,
        summary,
    }
}

/// Sanitize, project and serialize a built batch. An empty batch yields a header-only sheet.
pub fn render_export(batch: &ExportBatch, sheet_name: &str) -> Result<ExportArtifact> {
    let frame = rows_to_frame(&batch.rows)?;
    let frame = sanitize_frame(&frame)?;
    let frame = project_columns(&frame)?;
    let bytes = write_xlsx(&frame, sheet_name)?;

    Ok(ExportArtifact {
        bytes,
        summary: batch.summary.clone(),
    })
}

/// Reads everything the export needs from `source`, then builds and renders the report.
#[instrument(skip_all, fields(timezone = %settings.timezone))]
pub async fn export_from_source(
    source: &dyn CountSource,
    settings: &ExportSettings,
) -> Result<ExportArtifact> {
    let tz = settings.resolve_timezone()?;

    let records = source.fetch_records().await?;
    let sessions = source.fetch_sessions().await?;
    let masters = source.fetch_master_quantities().await?;

    let batch = build_export(&records, &sessions, &masters, tz);
    let artifact = render_export(&batch, &settings.sheet_name)?;

    info!(
        total_records = artifact.summary.total_records,
        exported_rows = artifact.summary.exported_rows,
        excluded_missing_session = artifact.summary.excluded_missing_session,
        passthrough_timestamps = artifact.summary.passthrough_timestamps,
        missing_master_quantity = artifact.summary.missing_master_quantity,
        bytes = artifact.bytes.len(),
        "stock count export complete"
    );

    Ok(artifact)
}
