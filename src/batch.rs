//! Batch driver: one pass over a folder of documents.

use crate::config::RunConfig;
use crate::engine::{match_document, route_document};
use crate::error::RunError;
use crate::host::{DocumentHost, RasterOptions};
use crate::model::{BatchLog, DocumentLog, Route};
use crate::render::render_text_report;
use crate::table::{AdjustmentRecord, parse_adjustment_file};

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DOCUMENT_NAME_RE: &str = r"(?i)\.pdf$";

#[derive(Debug)]
pub struct BatchOutcome {
    pub log: BatchLog,
    pub log_path: PathBuf,
}

/// Process every document in the source folder and write the run log.
///
/// Only the conditions in [`RunError`] stop the run. Anything that goes
/// wrong with a single document ends up in that document's log entry.
pub fn run_batch<H: DocumentHost>(host: &mut H, config: &RunConfig) -> anyhow::Result<BatchOutcome> {
    config.validate()?;
    let records = parse_adjustment_file(&config.adjustment_file, config.has_header)?;
    info!(
        source = %config.source_folder.display(),
        records = records.len(),
        "starting batch"
    );
    if let Some(action) = &config.action_name {
        debug!(action = %action, "post-processing action is reserved and will not run");
    }

    for route in [Route::Passed, Route::Failed] {
        let dir = config.route_folder(route);
        fs::create_dir_all(&dir).map_err(|source| RunError::OutputFolder { path: dir, source })?;
    }

    let mut batch = BatchLog::default();
    for path in list_documents(&config.source_folder)? {
        batch.push(process_document(host, &path, &records, config));
    }

    let report = render_text_report(&config.folder_name(), &batch)?;
    let log_path = config.log_path();
    fs::write(&log_path, report).map_err(|source| RunError::LogFile {
        path: log_path.clone(),
        source,
    })?;

    let totals = batch.totals();
    info!(
        processed = totals.processed,
        passed = totals.passed,
        failed = totals.failed,
        not_exported = totals.not_exported,
        log = %log_path.display(),
        "batch finished"
    );

    Ok(BatchOutcome {
        log: batch,
        log_path,
    })
}

/// Plain files with a document extension, in file-name order.
pub fn list_documents(folder: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let listing_error = |source: std::io::Error| RunError::Listing {
        path: folder.to_path_buf(),
        source,
    };
    let re = Regex::new(DOCUMENT_NAME_RE)?;

    let mut out = Vec::new();
    for entry in fs::read_dir(folder).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        let path = entry.path();
        let is_file = entry.file_type().map_err(listing_error)?.is_file();
        let name = entry.file_name();
        let matches = name.to_str().map(|n| re.is_match(n)).unwrap_or(false);
        if is_file && matches {
            out.push(path);
        } else {
            debug!(path = %path.display(), "skipping");
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

/// Open, adjust, route, export and close one document.
pub fn process_document<H: DocumentHost>(
    host: &mut H,
    path: &Path,
    records: &[AdjustmentRecord],
    config: &RunConfig,
) -> DocumentLog {
    let product = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut log = DocumentLog::new(product);

    let mut doc = match host.open_document(path) {
        Ok(doc) => doc,
        Err(err) => {
            warn!(product = %log.product, error = %err, "cannot open document");
            log.errors.push(err.to_string());
            return log;
        }
    };

    let snapshot = host.snapshot(&doc);
    debug!(
        document = %snapshot.name,
        layers = snapshot.layer_count,
        spots = snapshot.spot_colour_names.len(),
        "opened"
    );
    match_document(host, &mut doc, &snapshot, records, &mut log);

    let route = route_document(&log);
    log.route = Some(route);

    let destination = config
        .route_folder(route)
        .join(format!("{}.tif", log.product));
    if let Err(err) = host.export_raster(&doc, &destination, &RasterOptions::default()) {
        warn!(product = %log.product, error = %err, "export failed");
        log.errors.push(err.to_string());
    }
    host.close_document(doc);

    info!(product = %log.product, route = %route, "document processed");
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedHost;
    use crate::host::simulated::Manifest;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TABLE: &str = "SpotColour,Type,BlendingMode\nRed,Fill,Multiply\nRed,Stroke,Screen\nGreen,Fill,Fuschia\n";

    const MANIFEST: &str = r#"{
        "documents": {
            "a_clean.pdf": {
                "spots": ["Red"],
                "artwork": [{ "fill": "Red" }, { "stroke": "Red" }, { "stroke": "Red" }]
            },
            "b_layers.PDF": { "layers": 2, "spots": ["Red"] },
            "c_extra.pdf": { "spots": ["Red", "Blue", "Green"] },
            "d_typo.pdf": {
                "spots": ["Green"],
                "artwork": [{ "fill": "Green", "blend_mode": "Darken" }]
            },
            "f_export.pdf": { "spots": ["Red"], "export_error": "disk full" }
        }
    }"#;

    struct Fixture {
        _root: TempDir,
        config: RunConfig,
        host: SimulatedHost,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("atlas");
        fs::create_dir(&source).unwrap();
        for name in [
            "a_clean.pdf",
            "b_layers.PDF",
            "c_extra.pdf",
            "d_typo.pdf",
            "e_missing.pdf",
            "f_export.pdf",
            "notes.txt",
        ] {
            fs::write(source.join(name), b"%PDF").unwrap();
        }
        fs::create_dir(source.join("nested.pdf")).unwrap();

        let table = root.path().join("adjustments.csv");
        fs::write(&table, TABLE).unwrap();

        let manifest: Manifest = serde_json::from_str(MANIFEST).unwrap();
        Fixture {
            config: RunConfig::new(&source, &table),
            host: SimulatedHost::new(manifest),
            _root: root,
        }
    }

    fn by_product<'a>(batch: &'a BatchLog, product: &str) -> &'a DocumentLog {
        batch
            .documents
            .iter()
            .find(|d| d.product == product)
            .unwrap()
    }

    #[test]
    fn lists_only_plain_document_files_in_name_order() {
        let fx = fixture();
        let names: Vec<String> = list_documents(&fx.config.source_folder)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "a_clean.pdf",
                "b_layers.PDF",
                "c_extra.pdf",
                "d_typo.pdf",
                "e_missing.pdf",
                "f_export.pdf",
            ]
        );
    }

    #[test]
    fn routes_each_document_once() {
        let mut fx = fixture();
        let outcome = run_batch(&mut fx.host, &fx.config).unwrap();
        let batch = &outcome.log;

        let products: Vec<&str> = batch.documents.iter().map(|d| d.product.as_str()).collect();
        assert_eq!(
            products,
            vec!["a_clean", "b_layers", "c_extra", "d_typo", "e_missing", "f_export"]
        );

        assert_eq!(by_product(batch, "a_clean").route, Some(Route::Passed));
        assert_eq!(by_product(batch, "b_layers").route, Some(Route::Failed));
        assert_eq!(by_product(batch, "c_extra").route, Some(Route::Failed));
        assert_eq!(by_product(batch, "d_typo").route, Some(Route::Passed));
        assert_eq!(by_product(batch, "e_missing").route, None);

        let passed = fx.config.route_folder(Route::Passed);
        let failed = fx.config.route_folder(Route::Failed);
        for (product, route) in [
            ("a_clean", Route::Passed),
            ("b_layers", Route::Failed),
            ("c_extra", Route::Failed),
            ("d_typo", Route::Passed),
        ] {
            let file = format!("{}.tif", product);
            let (here, other) = match route {
                Route::Passed => (&passed, &failed),
                Route::Failed => (&failed, &passed),
            };
            assert!(here.join(&file).is_file(), "{} missing from {}", file, route);
            assert!(!other.join(&file).exists(), "{} exported twice", file);
        }
        assert!(!passed.join("e_missing.tif").exists());
        assert!(!failed.join("e_missing.tif").exists());

        assert_eq!(fx.host.exports().len(), 4);
        assert_eq!(fx.host.open_documents(), 0);
        assert_eq!(fx.host.live_selections(), 0);
    }

    #[test]
    fn per_document_failures_are_folded_into_the_log() {
        let mut fx = fixture();
        let outcome = run_batch(&mut fx.host, &fx.config).unwrap();

        let missing = by_product(&outcome.log, "e_missing");
        assert_eq!(missing.errors.len(), 1);
        assert!(missing.errors[0].contains("not described in manifest"));

        let export = by_product(&outcome.log, "f_export");
        assert_eq!(export.route, Some(Route::Passed));
        assert!(export.errors[0].contains("disk full"));

        let typo = by_product(&outcome.log, "d_typo");
        let fills = typo.swatches[&2].fills.as_ref().unwrap();
        assert_eq!(fills.count, 1);
        assert!(fills.mode_error.is_some());
        assert_eq!(typo.no_swatch_match, vec!["Red".to_string(), "Red".to_string()]);
    }

    #[test]
    fn writes_log_named_after_the_folder() {
        let mut fx = fixture();
        let outcome = run_batch(&mut fx.host, &fx.config).unwrap();
        assert_eq!(outcome.log_path, fx.config.source_folder.join("atlas_Log.txt"));

        let text = fs::read_to_string(&outcome.log_path).unwrap();
        assert!(text.starts_with("*******************************\natlas Log\n"));
        assert!(text.contains("Product: a_clean\nDestination: Passed\n"));
        assert!(text.contains("\tFills Adjusted: 1\n"));
        assert!(text.contains("\tStrokes Adjusted: 2\n"));
        assert!(text.contains("Product: b_layers\nDestination: Failed\nERROR: File contained multiple layers\n"));
        assert!(text.contains("\tFill Blending Mode not recognised\n"));
    }

    #[test]
    fn rerun_produces_identical_log() {
        let mut fx = fixture();
        run_batch(&mut fx.host, &fx.config).unwrap();
        let first = fs::read(fx.config.log_path()).unwrap();

        let manifest: Manifest = serde_json::from_str(MANIFEST).unwrap();
        let mut host = SimulatedHost::new(manifest);
        run_batch(&mut host, &fx.config).unwrap();
        let second = fs::read(fx.config.log_path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn crlf_table_with_type_last_still_runs() {
        let mut fx = fixture();
        fs::write(
            &fx.config.adjustment_file,
            "SpotColour,BlendingMode,Type\r\nRed,Multiply,Fill\r\n",
        )
        .unwrap();
        let outcome = run_batch(&mut fx.host, &fx.config).unwrap();

        let clean = by_product(&outcome.log, "a_clean");
        assert_eq!(clean.route, Some(Route::Passed));
        assert_eq!(
            clean.errors,
            vec!["Adjustment Type Unknown: \"Fill\\r\" for Red".to_string()]
        );
        assert!(clean.swatches.is_empty());
        assert!(fx.config.route_folder(Route::Passed).join("a_clean.tif").is_file());
        assert!(outcome.log_path.is_file());
        assert_eq!(fx.host.live_selections(), 0);
    }

    #[test]
    fn lowercase_type_row_does_not_stop_later_documents() {
        let mut fx = fixture();
        fs::write(
            &fx.config.adjustment_file,
            "SpotColour,Type,BlendingMode\nRed,Fill,Multiply\nBlue,fill,Screen\n",
        )
        .unwrap();
        let outcome = run_batch(&mut fx.host, &fx.config).unwrap();

        let clean = by_product(&outcome.log, "a_clean");
        assert_eq!(clean.swatches[&0].fills.as_ref().unwrap().count, 1);
        assert_eq!(clean.no_swatch_match, vec!["Blue".to_string()]);
        assert!(clean.errors.is_empty());

        let extra = by_product(&outcome.log, "c_extra");
        assert_eq!(
            extra.errors,
            vec!["Adjustment Type Unknown: \"fill\" for Blue".to_string()]
        );
        assert_eq!(outcome.log.documents.len(), 6);
        assert_eq!(fx.host.exports().len(), 4);
    }

    #[test]
    fn unreadable_table_stops_the_run() {
        let mut fx = fixture();
        fx.config.adjustment_file = fx.config.source_folder.join("missing.csv");
        let err = run_batch(&mut fx.host, &fx.config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::AdjustmentFile { .. })
        ));
        assert!(!fx.config.log_path().exists());
    }

    #[test]
    fn missing_source_folder_stops_the_run() {
        let mut fx = fixture();
        fx.config.source_folder = fx.config.source_folder.join("absent");
        let err = run_batch(&mut fx.host, &fx.config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::SourceFolder(_))
        ));
    }
}
