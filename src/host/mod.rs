//! Document host capability.
//!
//! The engine never touches document content itself. Everything it needs
//! from a page-layout editor goes through [`DocumentHost`], and every call
//! names the document or selection it acts on.

pub mod simulated;

pub use simulated::SimulatedHost;

use crate::blend::BlendMode;
use crate::error::HostError;
use crate::table::AttributeKind;
use serde::Serialize;
use std::path::Path;

/// Pseudo spot colour every document carries for registration marks.
pub const REGISTRATION_SPOT: &str = "[Registration]";

/// Facts read from an opened document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub name: String,
    pub layer_count: usize,
    /// Declared spot colour names, registration marker included.
    pub spot_colour_names: Vec<String>,
}

impl DocumentSnapshot {
    pub fn has_spot(&self, name: &str) -> bool {
        self.spot_colour_names.iter().any(|s| s == name)
    }

    /// Spot count used for comparisons against the table.
    pub fn registered_spot_count(&self) -> usize {
        self.spot_colour_names
            .iter()
            .filter(|s| s.as_str() != REGISTRATION_SPOT)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorSpace {
    Cmyk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compression {
    Lzw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AntiAliasing {
    TypeOptimized,
}

/// Raster export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RasterOptions {
    pub resolution_dpi: u32,
    pub color_space: ColorSpace,
    pub compression: Compression,
    pub anti_aliasing: AntiAliasing,
    /// 1-based artboard to export.
    pub artboard: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            resolution_dpi: 750,
            color_space: ColorSpace::Cmyk,
            compression: Compression::Lzw,
            anti_aliasing: AntiAliasing::TypeOptimized,
            artboard: 1,
        }
    }
}

/// Operations the batch needs from a page-layout editor.
///
/// Calls are synchronous. Callers must hand every selection back through
/// [`DocumentHost::release_selection`] and every document back through
/// [`DocumentHost::close_document`], on error paths too.
pub trait DocumentHost {
    type Document;
    type Selection;

    fn open_document(&mut self, path: &Path) -> Result<Self::Document, HostError>;

    fn snapshot(&self, doc: &Self::Document) -> DocumentSnapshot;

    /// Select every artwork item whose fill or stroke uses `spot`.
    fn select_artwork(
        &mut self,
        doc: &mut Self::Document,
        spot: &str,
        kind: AttributeKind,
    ) -> Result<Self::Selection, HostError>;

    /// Apply `mode` to the selection, returning how many items changed.
    fn apply_blend_mode(
        &mut self,
        doc: &mut Self::Document,
        selection: &Self::Selection,
        mode: BlendMode,
    ) -> Result<usize, HostError>;

    /// Drop the selection and any temporary artwork made to build it.
    fn release_selection(&mut self, doc: &mut Self::Document, selection: Self::Selection);

    fn export_raster(
        &mut self,
        doc: &Self::Document,
        destination: &Path,
        options: &RasterOptions,
    ) -> Result<(), HostError>;

    /// Close without saving changes.
    fn close_document(&mut self, doc: Self::Document);
}
