//! Adjustment table: which blend mode each spot colour's fills or strokes get.

pub mod parse;
pub mod record;

pub use parse::{parse_adjustment_file, parse_adjustment_table};
pub use record::{AdjustmentRecord, AttributeKind};
