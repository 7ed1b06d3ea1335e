//! Per-document and per-run log model.

use crate::blend::BlendMode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Output bucket for an exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Passed,
    Failed,
}

impl Route {
    /// Name of the subfolder documents on this route are exported to.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Route::Passed => "Passed",
            Route::Failed => "Failed",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// What happened to one attribute class of one swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustmentSummary {
    pub count: usize,
    /// Mode name as authored in the table.
    pub mode: String,
    /// Mode actually applied.
    pub applied: BlendMode,
    pub mode_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchAdjustmentResult {
    pub name: String,
    pub fills: Option<AdjustmentSummary>,
    pub strokes: Option<AdjustmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLog {
    pub product: String,
    /// Set only when the document has more than one layer.
    pub layer_count: Option<usize>,
    /// Non-empty when the document declares more spots than the table covers.
    pub extra_swatch: Vec<String>,
    /// Table spots with no counterpart in the document.
    pub no_swatch_match: Vec<String>,
    /// Keyed by table record position; positions without a match are absent.
    pub swatches: BTreeMap<usize, SwatchAdjustmentResult>,
    /// Host failures folded into this document's entry.
    pub errors: Vec<String>,
    /// `None` when the document could not be opened.
    pub route: Option<Route>,
}

impl DocumentLog {
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            layer_count: None,
            extra_swatch: Vec::new(),
            no_swatch_match: Vec::new(),
            swatches: BTreeMap::new(),
            errors: Vec::new(),
            route: None,
        }
    }

    pub fn has_extra_swatch(&self) -> bool {
        !self.extra_swatch.is_empty()
    }
}

/// Document logs for one run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchLog {
    pub documents: Vec<DocumentLog>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    pub processed: usize,
    pub passed: usize,
    pub failed: usize,
    pub not_exported: usize,
}

impl BatchLog {
    pub fn push(&mut self, log: DocumentLog) {
        self.documents.push(log);
    }

    pub fn totals(&self) -> BatchTotals {
        let mut totals = BatchTotals {
            processed: self.documents.len(),
            ..BatchTotals::default()
        };
        for doc in &self.documents {
            match doc.route {
                Some(Route::Passed) => totals.passed += 1,
                Some(Route::Failed) => totals.failed += 1,
                None => totals.not_exported += 1,
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn totals_count_routes() {
        let mut batch = BatchLog::default();
        for route in [Some(Route::Passed), Some(Route::Failed), None, Some(Route::Passed)] {
            let mut log = DocumentLog::new("p");
            log.route = route;
            batch.push(log);
        }
        assert_eq!(
            batch.totals(),
            BatchTotals {
                processed: 4,
                passed: 2,
                failed: 1,
                not_exported: 1,
            }
        );
    }
}
