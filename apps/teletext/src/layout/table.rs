//! Tabular row formatter — renders one fixed-width row from named,
//! width-constrained fields. Used for score tables and timetable listings.
//!
//! Records arrive as JSON objects, matching the list-of-dict rows the
//! scrapers produce. A record missing a field (or holding a non-scalar)
//! yields `Ok(None)` — the "no row" sentinel callers must skip, never emit.

use serde_json::{Map, Value};

use crate::errors::Error;
use crate::layout::engine::ROW_WIDTH;
use crate::models::Colour;

/// Per-column alignment. Defaults to left, like the original row specs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableAlign {
    #[default]
    Left,
    Right,
}

/// One column of a table row: a declared width, the record key that fills
/// it, a colour, and an alignment.
///
/// When the column's colour differs from the running colour the colour code
/// is emitted inside the declared width, leaving `width - 1` columns for the
/// value. The rendered row's length therefore always equals the sum of the
/// declared widths.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableColumn {
    pub width: usize,
    pub data: String,
    pub colour: Colour,
    #[serde(default)]
    pub align: TableAlign,
}

impl TableColumn {
    pub fn new(width: usize, data: impl Into<String>, colour: Colour) -> Self {
        TableColumn {
            width,
            data: data.into(),
            colour,
            align: TableAlign::Left,
        }
    }

    pub fn right_aligned(mut self) -> Self {
        self.align = TableAlign::Right;
        self
    }
}

/// Renders one fixed-width row from a column spec and a record.
///
/// Values longer than the column truncate; missing fields return the
/// `Ok(None)` sentinel. Structural misuse (zero-width column, widths
/// summing past the row) is a caller bug and fails fast.
pub fn table_row(
    columns: &[TableColumn],
    record: &Map<String, Value>,
) -> Result<Option<String>, Error> {
    let total: usize = columns.iter().map(|c| c.width).sum();
    if total > ROW_WIDTH {
        return Err(Error::TableTooWide {
            got: total,
            max: ROW_WIDTH,
        });
    }
    for column in columns {
        if column.width == 0 {
            return Err(Error::ZeroWidthColumn(column.data.clone()));
        }
    }

    let mut out = String::with_capacity(total);
    let mut current = Colour::White;
    for column in columns {
        let value = match record.get(&column.data) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => return Ok(None),
        };

        let marker = column.colour != current;
        let field_width = column.width - usize::from(marker);
        let text: String = value.chars().take(field_width).collect();
        let pad = field_width - text.chars().count();

        if marker {
            out.push(column.colour.code());
            current = column.colour;
        }
        match column.align {
            TableAlign::Left => {
                out.push_str(&text);
                out.extend(std::iter::repeat(' ').take(pad));
            }
            TableAlign::Right => {
                out.extend(std::iter::repeat(' ').take(pad));
                out.push_str(&text);
            }
        }
    }
    Ok(Some(out))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
