//! Matching table records against one document's spot colours.

use crate::blend::resolve_blend_mode;
use crate::engine::apply::apply_adjustment;
use crate::error::HostError;
use crate::host::{DocumentHost, DocumentSnapshot};
use crate::model::{AdjustmentSummary, DocumentLog, SwatchAdjustmentResult};
use crate::table::{AdjustmentRecord, AttributeKind};

use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Outcome of one table record against one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Adjusted(SwatchAdjustmentResult),
    /// The record's spot is not declared in the document.
    NoMatch,
    /// The spot is declared but the `Type` cell is neither Fill nor Stroke.
    UnknownType,
    /// The spot is declared but the host could not adjust it.
    Failed(HostError),
}

/// Number of distinct spot colours the table names.
pub fn distinct_spot_count(records: &[AdjustmentRecord]) -> usize {
    records
        .iter()
        .map(|r| r.spot_colour.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// True when the document declares more spots than the table covers.
///
/// Only the count is compared; which names are surplus is not worked out.
pub fn has_extra_swatch(snapshot: &DocumentSnapshot, records: &[AdjustmentRecord]) -> bool {
    snapshot.registered_spot_count() > distinct_spot_count(records)
}

/// Run one record against the document.
pub fn process_record<H: DocumentHost>(
    host: &mut H,
    doc: &mut H::Document,
    snapshot: &DocumentSnapshot,
    record: &AdjustmentRecord,
) -> RecordOutcome {
    if !snapshot.has_spot(&record.spot_colour) {
        return RecordOutcome::NoMatch;
    }

    let Some(kind) = record.attribute() else {
        return RecordOutcome::UnknownType;
    };

    let resolved = resolve_blend_mode(&record.blending_mode);
    match apply_adjustment(host, doc, &record.spot_colour, kind, &resolved) {
        Ok(applied) => {
            let summary = AdjustmentSummary {
                count: applied.count,
                mode: record.blending_mode.clone(),
                applied: resolved.mode,
                mode_error: applied.mode_error,
            };
            let (fills, strokes) = match kind {
                AttributeKind::Fill => (Some(summary), None),
                AttributeKind::Stroke => (None, Some(summary)),
            };
            RecordOutcome::Adjusted(SwatchAdjustmentResult {
                name: record.spot_colour.clone(),
                fills,
                strokes,
            })
        }
        Err(err) => RecordOutcome::Failed(err),
    }
}

/// Check the document's structure and run every record in table order,
/// folding each outcome into `log`. No record can stop later ones.
pub fn match_document<H: DocumentHost>(
    host: &mut H,
    doc: &mut H::Document,
    snapshot: &DocumentSnapshot,
    records: &[AdjustmentRecord],
    log: &mut DocumentLog,
) {
    if snapshot.layer_count > 1 {
        warn!(product = %log.product, layers = snapshot.layer_count, "document has multiple layers");
        log.layer_count = Some(snapshot.layer_count);
    }

    if has_extra_swatch(snapshot, records) {
        warn!(
            product = %log.product,
            spots = snapshot.registered_spot_count(),
            table = distinct_spot_count(records),
            "document has more spot colours than the adjustment table"
        );
        log.extra_swatch.push(log.product.clone());
    }

    for (position, record) in records.iter().enumerate() {
        match process_record(host, doc, snapshot, record) {
            RecordOutcome::Adjusted(result) => {
                debug!(
                    position,
                    spot = %record.spot_colour,
                    kind = %record.kind,
                    fills = result.fills.as_ref().map(|s| s.count),
                    strokes = result.strokes.as_ref().map(|s| s.count),
                    "adjusted"
                );
                if let Some(err) = result
                    .fills
                    .iter()
                    .chain(result.strokes.iter())
                    .find_map(|s| s.mode_error.as_deref())
                {
                    warn!(product = %log.product, position, "{}", err);
                }
                log.swatches.insert(position, result);
            }
            RecordOutcome::UnknownType => {
                warn!(product = %log.product, position, kind = ?record.kind, "unknown adjustment type");
                log.errors.push(format!(
                    "Adjustment Type Unknown: {:?} for {}",
                    record.kind, record.spot_colour
                ));
            }
            RecordOutcome::NoMatch => {
                debug!(position, spot = %record.spot_colour, "spot not in document");
                log.no_swatch_match.push(record.spot_colour.clone());
            }
            RecordOutcome::Failed(err) => {
                warn!(product = %log.product, position, error = %err, "adjustment failed");
                log.no_swatch_match.push(record.spot_colour.clone());
                log.errors.push(err.to_string());
            }
        }
    }
}
