use crate::model::{AdjustmentSummary, BatchLog, DocumentLog};
use std::fmt::Write;

const BANNER: &str = "*******************************";

/// Render the run log written next to the processed documents.
///
/// Output depends only on `batch`, so the same run renders the same bytes.
pub fn render_text_report(title: &str, batch: &BatchLog) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "{} Log", title)?;
    writeln!(out, "{}", BANNER)?;

    for doc in &batch.documents {
        out.push('\n');
        render_document(&mut out, doc)?;
    }

    Ok(out)
}

fn render_document(out: &mut String, doc: &DocumentLog) -> std::fmt::Result {
    writeln!(out, "Product: {}", doc.product)?;
    match doc.route {
        Some(route) => writeln!(out, "Destination: {}", route)?,
        None => writeln!(out, "Destination: Not exported")?,
    }
    if doc.layer_count.is_some() {
        writeln!(out, "ERROR: File contained multiple layers")?;
    }
    if doc.has_extra_swatch() {
        writeln!(out, "ERROR: File contained unregistered spot colour")?;
    }
    for err in &doc.errors {
        writeln!(out, "ERROR: {}", err)?;
    }
    for spot in &doc.no_swatch_match {
        writeln!(out, "Not in file: {}", spot)?;
    }

    for swatch in doc.swatches.values() {
        writeln!(out, "Swatch: {}", swatch.name)?;
        if let Some(fills) = &swatch.fills {
            render_summary(out, "Fills", "Fill", fills)?;
        }
        if let Some(strokes) = &swatch.strokes {
            render_summary(out, "Strokes", "Stroke", strokes)?;
        }
    }
    Ok(())
}

fn render_summary(
    out: &mut String,
    plural: &str,
    singular: &str,
    summary: &AdjustmentSummary,
) -> std::fmt::Result {
    writeln!(out, "\t{} Adjusted: {}", plural, summary.count)?;
    writeln!(out, "\tBlending Mode used: {}", summary.mode)?;
    if summary.mode_error.is_some() {
        writeln!(out, "\t{} Blending Mode not recognised", singular)?;
    }
    Ok(())
}
