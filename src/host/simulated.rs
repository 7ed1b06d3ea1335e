//! Manifest-backed host.
//!
//! Documents are described in a JSON manifest keyed by file name:
//! {
//!   "documents": {
//!     "sheet_01.pdf": {
//!       "layers": 1,
//!       "spots": ["Red", "Blue"],       // registration marker is implied
//!       "artwork": [
//!         { "fill": "Red" },
//!         { "fill": "Blue", "stroke": "Red", "blend_mode": "Normal" }
//!       ]
//!     }
//!   }
//! }
//!
//! Blend modes are applied in memory. Export writes a JSON rendition of the
//! adjusted artwork plus the raster options to the destination path.

use crate::blend::BlendMode;
use crate::error::HostError;
use crate::host::{DocumentHost, DocumentSnapshot, REGISTRATION_SPOT, RasterOptions};
use crate::table::AttributeKind;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub documents: BTreeMap<String, DocumentSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSpec {
    #[serde(default = "default_layers")]
    pub layers: usize,

    #[serde(default)]
    pub spots: Vec<String>,

    #[serde(default)]
    pub artwork: Vec<ArtworkItem>,

    /// Makes export fail with this reason.
    #[serde(default)]
    pub export_error: Option<String>,
}

fn default_layers() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkItem {
    #[serde(default)]
    pub fill: Option<String>,

    #[serde(default)]
    pub stroke: Option<String>,

    #[serde(default)]
    pub blend_mode: BlendMode,
}

impl ArtworkItem {
    fn uses(&self, spot: &str, kind: AttributeKind) -> bool {
        let colour = match kind {
            AttributeKind::Fill => &self.fill,
            AttributeKind::Stroke => &self.stroke,
        };
        colour.as_deref() == Some(spot)
    }
}

#[derive(Debug)]
pub struct SimulatedDocument {
    name: String,
    spec: DocumentSpec,
}

#[derive(Debug)]
pub struct SimulatedSelection {
    items: Vec<usize>,
}

#[derive(Serialize)]
struct Rendition<'a> {
    document: &'a str,
    options: &'a RasterOptions,
    artwork: &'a [ArtworkItem],
}

#[derive(Debug, Default)]
pub struct SimulatedHost {
    manifest: Manifest,
    open_documents: usize,
    live_selections: usize,
    exports: Vec<PathBuf>,
}

impl SimulatedHost {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            ..Self::default()
        }
    }

    pub fn from_manifest_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read manifest {}", path.display()))?;
        let manifest: Manifest = serde_json::from_str(&text)
            .with_context(|| format!("parse manifest {}", path.display()))?;
        Ok(Self::new(manifest))
    }

    /// Documents opened and not yet closed.
    pub fn open_documents(&self) -> usize {
        self.open_documents
    }

    /// Selections made and not yet released.
    pub fn live_selections(&self) -> usize {
        self.live_selections
    }

    /// Export destinations, in call order.
    pub fn exports(&self) -> &[PathBuf] {
        &self.exports
    }
}

impl DocumentHost for SimulatedHost {
    type Document = SimulatedDocument;
    type Selection = SimulatedSelection;

    fn open_document(&mut self, path: &Path) -> Result<SimulatedDocument, HostError> {
        let open_error = |reason: &str| HostError::Open {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| open_error("file name is not valid UTF-8"))?;
        let spec = self
            .manifest
            .documents
            .get(file_name)
            .cloned()
            .ok_or_else(|| open_error("not described in manifest"))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .to_string();

        self.open_documents += 1;
        Ok(SimulatedDocument { name, spec })
    }

    fn snapshot(&self, doc: &SimulatedDocument) -> DocumentSnapshot {
        let mut spot_colour_names = doc.spec.spots.clone();
        if !spot_colour_names.iter().any(|s| s == REGISTRATION_SPOT) {
            spot_colour_names.push(REGISTRATION_SPOT.to_string());
        }
        DocumentSnapshot {
            name: doc.name.clone(),
            layer_count: doc.spec.layers,
            spot_colour_names,
        }
    }

    fn select_artwork(
        &mut self,
        doc: &mut SimulatedDocument,
        spot: &str,
        kind: AttributeKind,
    ) -> Result<SimulatedSelection, HostError> {
        if !doc.spec.spots.iter().any(|s| s == spot) {
            return Err(HostError::Select {
                spot: spot.to_string(),
                kind: kind.to_string(),
                reason: "no swatch with that name".to_string(),
            });
        }
        let items = doc
            .spec
            .artwork
            .iter()
            .enumerate()
            .filter(|(_, item)| item.uses(spot, kind))
            .map(|(idx, _)| idx)
            .collect();
        self.live_selections += 1;
        Ok(SimulatedSelection { items })
    }

    fn apply_blend_mode(
        &mut self,
        doc: &mut SimulatedDocument,
        selection: &SimulatedSelection,
        mode: BlendMode,
    ) -> Result<usize, HostError> {
        for &idx in &selection.items {
            let item = doc
                .spec
                .artwork
                .get_mut(idx)
                .ok_or_else(|| HostError::Apply(format!("selection item {} is gone", idx)))?;
            item.blend_mode = mode;
        }
        Ok(selection.items.len())
    }

    fn release_selection(&mut self, _doc: &mut SimulatedDocument, _selection: SimulatedSelection) {
        self.live_selections = self.live_selections.saturating_sub(1);
    }

    fn export_raster(
        &mut self,
        doc: &SimulatedDocument,
        destination: &Path,
        options: &RasterOptions,
    ) -> Result<(), HostError> {
        let export_error = |reason: String| HostError::Export {
            path: destination.to_path_buf(),
            reason,
        };
        if let Some(reason) = &doc.spec.export_error {
            return Err(export_error(reason.clone()));
        }
        let rendition = Rendition {
            document: &doc.name,
            options,
            artwork: &doc.spec.artwork,
        };
        let bytes =
            serde_json::to_vec_pretty(&rendition).map_err(|e| export_error(e.to_string()))?;
        fs::write(destination, bytes).map_err(|e| export_error(e.to_string()))?;
        self.exports.push(destination.to_path_buf());
        Ok(())
    }

    fn close_document(&mut self, _doc: SimulatedDocument) {
        self.open_documents = self.open_documents.saturating_sub(1);
    }
}
