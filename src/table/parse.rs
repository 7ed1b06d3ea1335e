use crate::error::{ParseError, RunError};
use crate::table::record::AdjustmentRecord;
use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use std::fs;
use std::path::Path;

pub const SPOT_COLOUR_COLUMN: &str = "SpotColour";
pub const TYPE_COLUMN: &str = "Type";
pub const BLENDING_MODE_COLUMN: &str = "BlendingMode";

/// Column positions of the three fields a record needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    spot_colour: usize,
    kind: usize,
    blending_mode: usize,
}

impl Columns {
    /// Layout used when the table carries no header line.
    const FIXED: Columns = Columns {
        spot_colour: 0,
        kind: 1,
        blending_mode: 2,
    };

    fn from_header(header: &StringRecord) -> Result<Self, ParseError> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|n| n.trim() == column)
                .ok_or(ParseError::MissingColumn { column })
        };
        Ok(Columns {
            spot_colour: find(SPOT_COLOUR_COLUMN)?,
            kind: find(TYPE_COLUMN)?,
            blending_mode: find(BLENDING_MODE_COLUMN)?,
        })
    }

    fn width(&self) -> usize {
        self.spot_colour.max(self.kind).max(self.blending_mode) + 1
    }
}

/// 1-based line a record starts on.
fn line_of(record: &StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}

/// Parse adjustment table text into records, in table order.
///
/// Records end at `\n` only and empty lines are skipped. With `has_header`
/// the first non-empty line names the columns; otherwise every line is data
/// laid out as `SpotColour,Type,BlendingMode`. Field text is kept verbatim:
/// no quoting, no trimming, and a `\r` before the newline stays in the last
/// field.
pub fn parse_adjustment_table(
    text: &str,
    has_header: bool,
) -> Result<Vec<AdjustmentRecord>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::None)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());
    let mut rows = reader.records();

    let (columns, expected) = if has_header {
        let header = rows.next().ok_or(ParseError::MissingHeader)??;
        (Columns::from_header(&header)?, header.len())
    } else {
        (Columns::FIXED, Columns::FIXED.width())
    };

    let mut out = Vec::new();
    for row in rows {
        let row = row?;
        if row.len() < expected {
            return Err(ParseError::ShortRow {
                line: line_of(&row),
                expected,
                found: row.len(),
            });
        }
        out.push(AdjustmentRecord {
            spot_colour: row[columns.spot_colour].to_string(),
            kind: row[columns.kind].to_string(),
            blending_mode: row[columns.blending_mode].to_string(),
        });
    }

    Ok(out)
}

/// Read and parse an adjustment file. Both failures end the run.
pub fn parse_adjustment_file(
    path: &Path,
    has_header: bool,
) -> Result<Vec<AdjustmentRecord>, RunError> {
    let text = fs::read_to_string(path).map_err(|source| RunError::AdjustmentFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_adjustment_table(&text, has_header).map_err(|source| RunError::Table {
        path: path.to_path_buf(),
        source,
    })
}
