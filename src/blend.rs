//! Blend modes and resolution of authored mode names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Blend modes a host can apply to artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    Darken,
    Multiply,
    ColorBlend,
    ColorBurn,
    ColorDodge,
    Difference,
    Exclusion,
    HardLight,
    Hue,
    Lighten,
    Luminosity,
    Overlay,
    Saturation,
    Screen,
    SoftLight,
    /// Leaves artwork visually unchanged.
    #[default]
    Normal,
}

impl BlendMode {
    pub const ALL: [BlendMode; 16] = [
        BlendMode::Darken,
        BlendMode::Multiply,
        BlendMode::ColorBlend,
        BlendMode::ColorBurn,
        BlendMode::ColorDodge,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::HardLight,
        BlendMode::Hue,
        BlendMode::Lighten,
        BlendMode::Luminosity,
        BlendMode::Overlay,
        BlendMode::Saturation,
        BlendMode::Screen,
        BlendMode::SoftLight,
        BlendMode::Normal,
    ];

    /// Canonical table name.
    pub fn name(&self) -> &'static str {
        match self {
            BlendMode::Darken => "Darken",
            BlendMode::Multiply => "Multiply",
            BlendMode::ColorBlend => "ColorBlend",
            BlendMode::ColorBurn => "ColorBurn",
            BlendMode::ColorDodge => "ColorDodge",
            BlendMode::Difference => "Difference",
            BlendMode::Exclusion => "Exclusion",
            BlendMode::HardLight => "HardLight",
            BlendMode::Hue => "Hue",
            BlendMode::Lighten => "Lighten",
            BlendMode::Luminosity => "Luminosity",
            BlendMode::Overlay => "Overlay",
            BlendMode::Saturation => "Saturation",
            BlendMode::Screen => "Screen",
            BlendMode::SoftLight => "SoftLight",
            BlendMode::Normal => "Normal",
        }
    }

    /// Exact, case-sensitive lookup. Older tables spell three modes with a
    /// lower-case second word; those spellings are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Colorblend" => return Some(BlendMode::ColorBlend),
            "Hardlight" => return Some(BlendMode::HardLight),
            "Softlight" => return Some(BlendMode::SoftLight),
            _ => {}
        }
        BlendMode::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of resolving an authored mode name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMode {
    pub mode: BlendMode,
    pub error: Option<String>,
}

/// Resolve an authored name. Unknown names fall back to `Normal` and carry
/// an error message instead of failing.
pub fn resolve_blend_mode(name: &str) -> ResolvedMode {
    match BlendMode::from_name(name) {
        Some(mode) => ResolvedMode { mode, error: None },
        None => ResolvedMode {
            mode: BlendMode::Normal,
            error: Some(format!("Blending Mode Unknown: {}", name)),
        },
    }
}
