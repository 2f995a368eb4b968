//! Tabular page assembly: one formatted row per record, stacked from the
//! template's first content row.
//!
//! Records with missing fields are skipped, not rendered blank; the page
//! stops taking rows once the content band is full.

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::Error;
use crate::layout::{table_row, TableColumn, ROW_WIDTH};
use crate::models::{Packet, Page};
use crate::pages::{PageBuilder, MAX_CONTENT_ROW};
use crate::substitute::Substitutions;
use crate::templates::PageTemplate;

/// First content row on the table templates.
const TABLE_START_LINE: u8 = 6;

/// Builds a table page from a column spec and a list of records.
///
/// Each record renders through `table_row`; the row is padded to the full
/// 40 columns before it lands on the page. Incomplete records are skipped
/// with a log line, and rows past the content band are dropped.
pub fn table_page(
    records: &[Map<String, Value>],
    columns: &[TableColumn],
    template: &PageTemplate,
    number: u16,
    subs: &Substitutions,
) -> Result<Page, Error> {
    let mut builder = PageBuilder::seeded(template, subs, TABLE_START_LINE, MAX_CONTENT_ROW);
    for (i, record) in records.iter().enumerate() {
        let Some(mut text) = table_row(columns, record)? else {
            debug!(page = number, record = i, "incomplete record, row skipped");
            continue;
        };
        let pad = ROW_WIDTH - text.chars().count();
        text.extend(std::iter::repeat(' ').take(pad));
        let packet = Packet {
            number: builder.line(),
            text,
        };
        if !builder.try_block(vec![packet]) {
            debug!(page = number, record = i, "table full, remaining rows dropped");
            break;
        }
    }
    Ok(Page::single(number, builder.finish().packets))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Colour;
    use serde_json::json;

    fn template() -> PageTemplate {
        PageTemplate::from_json(
            r#"{
                "number": 235,
                "subpages": [{"packets": [
                    {"number": 0, "text": "P235  VEIKKAUSLIIGA  DATE"},
                    {"number": 24, "text": "UUTISET 101"}
                ]}]
            }"#,
        )
        .expect("valid template")
    }

    fn standings_columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new(2, "P", Colour::Yellow).right_aligned(),
            TableColumn::new(13, "C", Colour::Cyan),
            TableColumn::new(3, "Pt", Colour::Yellow).right_aligned(),
            TableColumn::new(7, "G", Colour::White),
            TableColumn::new(6, "WDG", Colour::White),
        ]
    }

    fn record(pos: u64, club: &str) -> Map<String, Value> {
        json!({"P": pos, "C": club, "Pt": 54 - pos, "G": "51-20", "WDG": "16/6/5"})
            .as_object()
            .expect("object")
            .clone()
    }

    #[test]
    fn test_rows_stack_from_start_line() {
        let subs = Substitutions::default();
        let records = vec![record(1, "HJK Helsinki"), record(2, "KuPS Kuopio")];
        let page =
            table_page(&records, &standings_columns(), &template(), 235, &subs).expect("builds");
        let packets = &page.subpages[0].packets;
        let first = packets.iter().find(|p| p.number == 6).expect("row 6");
        let second = packets.iter().find(|p| p.number == 7).expect("row 7");
        assert!(first.text.contains("HJK Helsinki"));
        assert!(second.text.contains("KuPS Kuopio"));
    }

    #[test]
    fn test_rows_padded_to_full_width() {
        let subs = Substitutions::default();
        let page = table_page(
            &[record(1, "HJK Helsinki")],
            &standings_columns(),
            &template(),
            235,
            &subs,
        )
        .expect("builds");
        let row = page.subpages[0]
            .packets
            .iter()
            .find(|p| p.number == 6)
            .expect("row");
        assert_eq!(row.text.chars().count(), 40);
    }

    #[test]
    fn test_incomplete_record_skipped_without_gap() {
        let subs = Substitutions::default();
        let mut broken = record(2, "KuPS Kuopio");
        broken.remove("Pt");
        let records = vec![record(1, "HJK Helsinki"), broken, record(3, "Inter Turku")];
        let page =
            table_page(&records, &standings_columns(), &template(), 235, &subs).expect("builds");
        let packets = &page.subpages[0].packets;
        // The third record closes the gap: it lands on row 7.
        let second = packets.iter().find(|p| p.number == 7).expect("row 7");
        assert!(second.text.contains("Inter Turku"));
        assert!(!packets.iter().any(|p| p.text.contains("KuPS")));
    }

    #[test]
    fn test_rows_past_band_dropped() {
        let subs = Substitutions::default();
        let records: Vec<_> = (1..=30).map(|i| record(i, "Seura")).collect();
        let page =
            table_page(&records, &standings_columns(), &template(), 235, &subs).expect("builds");
        let packets = &page.subpages[0].packets;
        let content_rows = packets
            .iter()
            .filter(|p| (6..=21).contains(&p.number))
            .count();
        // Rows 6..=21: the table ends before row 22.
        assert_eq!(content_rows, 16);
        assert!(!packets.iter().any(|p| p.number == 22));
    }

    #[test]
    fn test_bad_column_spec_propagates() {
        let subs = Substitutions::default();
        let columns = vec![TableColumn::new(41, "a", Colour::White)];
        let err = table_page(&[record(1, "x")], &columns, &template(), 235, &subs);
        assert!(matches!(err, Err(Error::TableTooWide { .. })));
    }
}
