use crate::model::{DocumentLog, Route};

/// Decide where a fully populated document log is exported to.
///
/// Only structural anomalies fail a document: more than one layer, or more
/// spot colours than the table covers. Unknown modes and unmatched table
/// entries are reported but do not.
pub fn route_document(log: &DocumentLog) -> Route {
    if log.has_extra_swatch() || log.layer_count.is_some_and(|n| n > 1) {
        Route::Failed
    } else {
        Route::Passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::BlendMode;
    use crate::model::{AdjustmentSummary, SwatchAdjustmentResult};

    #[test]
    fn clean_document_passes() {
        assert_eq!(route_document(&DocumentLog::new("a")), Route::Passed);
    }

    #[test]
    fn multiple_layers_fail() {
        let mut log = DocumentLog::new("a");
        log.layer_count = Some(3);
        assert_eq!(route_document(&log), Route::Failed);
    }

    #[test]
    fn extra_swatch_fails() {
        let mut log = DocumentLog::new("a");
        log.extra_swatch.push("a".to_string());
        assert_eq!(route_document(&log), Route::Failed);
    }

    #[test]
    fn mode_errors_and_unmatched_entries_still_pass() {
        let mut log = DocumentLog::new("a");
        log.no_swatch_match.push("Green".to_string());
        log.errors.push("cannot select".to_string());
        log.swatches.insert(
            0,
            SwatchAdjustmentResult {
                name: "Red".to_string(),
                fills: Some(AdjustmentSummary {
                    count: 4,
                    mode: "Fuschia".to_string(),
                    applied: BlendMode::Normal,
                    mode_error: Some("Blending Mode Unknown: Fuschia".to_string()),
                }),
                strokes: None,
            },
        );
        assert_eq!(route_document(&log), Route::Passed);
    }
}
