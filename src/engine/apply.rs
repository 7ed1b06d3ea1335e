use crate::blend::ResolvedMode;
use crate::error::HostError;
use crate::host::DocumentHost;
use crate::table::AttributeKind;

/// Result of applying one resolved mode to one class of artwork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAdjustment {
    /// Items changed. Zero is a valid outcome.
    pub count: usize,
    pub mode_error: Option<String>,
}

/// Select every `kind` item using `spot` and apply `resolved.mode` to it.
///
/// The selection is released whether or not the apply call succeeds.
pub fn apply_adjustment<H: DocumentHost>(
    host: &mut H,
    doc: &mut H::Document,
    spot: &str,
    kind: AttributeKind,
    resolved: &ResolvedMode,
) -> Result<AppliedAdjustment, HostError> {
    let selection = host.select_artwork(doc, spot, kind)?;
    let applied = host.apply_blend_mode(doc, &selection, resolved.mode);
    host.release_selection(doc, selection);

    Ok(AppliedAdjustment {
        count: applied?,
        mode_error: resolved.error.clone(),
    })
}
