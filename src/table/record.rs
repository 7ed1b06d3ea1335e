use std::fmt;

/// Which artwork attribute an adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    Fill,
    Stroke,
}

impl AttributeKind {
    /// Exact, case-sensitive match against the table's `Type` values.
    pub fn from_table(value: &str) -> Option<Self> {
        match value {
            "Fill" => Some(AttributeKind::Fill),
            "Stroke" => Some(AttributeKind::Stroke),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Fill => write!(f, "fill"),
            AttributeKind::Stroke => write!(f, "stroke"),
        }
    }
}

/// One row of the adjustment table.
///
/// `kind` and `blending_mode` are kept exactly as authored. Both are only
/// interpreted when the record is applied, so a bad cell never rejects the
/// table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentRecord {
    pub spot_colour: String,
    pub kind: String,
    pub blending_mode: String,
}

impl AdjustmentRecord {
    /// `None` when the `Type` cell is neither `Fill` nor `Stroke`.
    pub fn attribute(&self) -> Option<AttributeKind> {
        AttributeKind::from_table(&self.kind)
    }
}
