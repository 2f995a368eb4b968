//! Text layout engine — turns a `ContentBlock` plus a starting row into an
//! ordered list of fixed-width packets.
//!
//! # Algorithm
//! - Left-aligned groups are flattened to coloured words and greedily
//!   word-wrapped; a word longer than the available width is hard-broken.
//! - Right- and centre-aligned groups are assumed short (a page number, a
//!   label): they are rendered once, on the first physical row, and the left
//!   text wraps around the space they reserve there.
//! - `postWrapLimit` caps the wrapped rows; the last kept row is cut to the
//!   configured column count and ends with the `".."` truncation marker.
//!
//! The function is pure: no shared state, identical input gives identical
//! output. Page boundaries are not its business — callers count the returned
//! packets and decide whether the block still fits (see `pages`).

use std::collections::VecDeque;

use crate::errors::Error;
use crate::layout::encode::{cut_runs, encode_row, rendered_width, Run, Segment};
use crate::models::{Align, AlignedGroup, Colour, ContentBlock, Packet, PostWrapLimit};

/// Destination row width in columns.
pub const ROW_WIDTH: usize = 40;

/// Lays out a block at the full 40-column row width.
pub fn layout(block: &ContentBlock, line: u8) -> Result<Vec<Packet>, Error> {
    layout_block(block, line, ROW_WIDTH)
}

/// Lays out a block into packets numbered consecutively from `line`.
///
/// Returns one packet per physical row consumed; callers must use the
/// returned length, never assume one row. A block with no groups yields an
/// empty list. Every packet's text is exactly `max_width` characters, colour
/// codes included.
pub fn layout_block(
    block: &ContentBlock,
    line: u8,
    max_width: usize,
) -> Result<Vec<Packet>, Error> {
    if max_width == 0 || max_width > ROW_WIDTH {
        return Err(Error::InvalidWidth(max_width));
    }
    if block.content.is_empty() {
        return Ok(Vec::new());
    }
    for group in &block.content {
        if let Some(limit) = &group.post_wrap_limit {
            if limit.max_lines == 0 || limit.cutoff == 0 {
                return Err(Error::InvalidWrapLimit(format!(
                    "maxLines {} cutoff {}",
                    limit.max_lines, limit.cutoff
                )));
            }
        }
    }

    let mut words: Vec<(Colour, String)> = Vec::new();
    let mut limit: Option<PostWrapLimit> = None;
    let mut centre_runs: Vec<Run> = Vec::new();
    let mut right_runs: Vec<Run> = Vec::new();

    for group in &block.content {
        match group.align {
            Align::Left => {
                for span in &group.spans {
                    for word in span.text.split_whitespace() {
                        words.push((span.colour, word.to_string()));
                    }
                }
                if limit.is_none() {
                    limit = group.post_wrap_limit;
                }
            }
            Align::Center => collect_runs(&mut centre_runs, group),
            Align::Right => collect_runs(&mut right_runs, group),
        }
    }

    // Right and centre groups never wrap; cut them down if a caller hands
    // over something wider than the row.
    let right_runs = cut_runs(&right_runs, max_width);
    let right_w = rendered_width(&right_runs);
    let centre_runs = cut_runs(&centre_runs, max_width - right_w);
    let centre_w = rendered_width(&centre_runs);

    let first_avail = max_width - right_w - centre_w;
    let wrapped = wrap_words(&words, first_avail, max_width, limit.as_ref());

    let total_rows = wrapped.len().max(1);
    let mut packets = Vec::with_capacity(total_rows);
    for i in 0..total_rows {
        let mut segments: Vec<Segment> = Vec::new();
        let left_runs = wrapped.get(i).cloned().unwrap_or_default();
        let left_w = rendered_width(&left_runs);
        if !left_runs.is_empty() {
            segments.push(Segment {
                at: 0,
                runs: left_runs,
            });
        }
        if i == 0 {
            if !centre_runs.is_empty() {
                let ideal = (max_width - centre_w) / 2;
                let hi = max_width - right_w - centre_w;
                segments.push(Segment {
                    at: ideal.clamp(left_w.min(hi), hi),
                    runs: centre_runs.clone(),
                });
            }
            if !right_runs.is_empty() {
                segments.push(Segment {
                    at: max_width - right_w,
                    runs: right_runs.clone(),
                });
            }
        }
        let number = u8::try_from(line as usize + i)
            .map_err(|_| Error::RowOutOfRange(line as usize + i))?;
        packets.push(Packet {
            number,
            text: encode_row(&segments, max_width),
        });
    }
    Ok(packets)
}

/// Appends a group's spans as runs, merging adjacent same-colour runs and
/// skipping empty text.
fn collect_runs(runs: &mut Vec<Run>, group: &AlignedGroup) {
    for span in &group.spans {
        if span.text.is_empty() {
            continue;
        }
        match runs.last_mut() {
            Some(last) if last.colour == span.colour => last.text.push_str(&span.text),
            _ => runs.push(Run::new(span.colour, span.text.clone())),
        }
    }
}

/// Greedy word-wrap over coloured words.
///
/// The first row offers `first_avail` columns (whatever the right/centre
/// groups left over), continuation rows the full `cont_avail`. Words never
/// break mid-word unless a single word exceeds the row, in which case it is
/// hard-broken at the column boundary.
fn wrap_words(
    words: &[(Colour, String)],
    first_avail: usize,
    cont_avail: usize,
    limit: Option<&PostWrapLimit>,
) -> Vec<Vec<Run>> {
    let mut rows: Vec<Vec<Run>> = Vec::new();
    let mut row: Vec<Run> = Vec::new();
    let mut cells = 0usize;
    let mut queue: VecDeque<(Colour, String)> = words.iter().cloned().collect();
    let mut truncated = false;

    while let Some((colour, word)) = queue.pop_front() {
        if let Some(limit) = limit {
            // One more flush would exceed the cap: everything still queued
            // lands on the cutoff row instead.
            if rows.len() + 1 == limit.max_lines {
                queue.push_front((colour, word));
                truncated = push_remainder(&mut row, &mut cells, &mut queue, rows.len(), first_avail, cont_avail);
                break;
            }
        }
        let avail = if rows.is_empty() { first_avail } else { cont_avail };
        let word_len = word.chars().count();
        let sep = usize::from(cells > 0);
        let marker = marker_cost(&row, colour);

        if cells + sep + marker + word_len <= avail {
            push_word(&mut row, colour, &word, sep == 1);
            cells += sep + marker + word_len;
        } else if cells == 0 {
            // Word alone does not fit on an empty row: hard-break it, or
            // yield the row entirely when right/centre reserve everything.
            let head_cap = avail.saturating_sub(marker);
            if head_cap == 0 {
                rows.push(Vec::new());
                queue.push_front((colour, word));
            } else {
                let head: String = word.chars().take(head_cap).collect();
                let rest: String = word.chars().skip(head_cap).collect();
                rows.push(vec![Run::new(colour, head)]);
                if !rest.is_empty() {
                    queue.push_front((colour, rest));
                }
            }
        } else {
            rows.push(std::mem::take(&mut row));
            cells = 0;
            queue.push_front((colour, word));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }

    if truncated {
        let avail = if rows.len() <= 1 { first_avail } else { cont_avail };
        if let (Some(limit), Some(last)) = (limit, rows.last_mut()) {
            // The cutoff can never widen the row past what the row offers.
            *last = apply_cutoff(std::mem::take(last), limit.cutoff.min(avail));
        }
    }
    rows
}

/// Fills the final (cutoff) row with as many remaining words as fit, then
/// reports whether anything was left over.
fn push_remainder(
    row: &mut Vec<Run>,
    cells: &mut usize,
    queue: &mut VecDeque<(Colour, String)>,
    row_index: usize,
    first_avail: usize,
    cont_avail: usize,
) -> bool {
    let avail = if row_index == 0 { first_avail } else { cont_avail };
    while let Some((colour, word)) = queue.pop_front() {
        let sep = usize::from(*cells > 0);
        let marker = marker_cost(row, colour);
        let word_len = word.chars().count();
        if *cells + sep + marker + word_len <= avail {
            push_word(row, colour, &word, sep == 1);
            *cells += sep + marker + word_len;
        } else {
            // Put enough of the word back that the cutoff row shows where
            // the cut happened.
            push_word(row, colour, &word, sep == 1);
            *cells = avail;
            return true;
        }
    }
    false
}

fn marker_cost(row: &[Run], colour: Colour) -> usize {
    match row.last() {
        Some(last) => usize::from(last.colour != colour),
        None => usize::from(colour != Colour::White),
    }
}

fn push_word(row: &mut Vec<Run>, colour: Colour, word: &str, sep: bool) {
    match row.last_mut() {
        Some(last) if last.colour == colour => {
            if sep {
                last.text.push(' ');
            }
            last.text.push_str(word);
        }
        Some(last) => {
            if sep {
                last.text.push(' ');
            }
            row.push(Run::new(colour, word));
        }
        None => row.push(Run::new(colour, word)),
    }
}

/// Cuts a row to at most `cutoff` rendered columns and appends the `".."`
/// truncation marker. A cutoff below 3 leaves no room for the marker and
/// degrades to a plain hard cut.
fn apply_cutoff(row: Vec<Run>, cutoff: usize) -> Vec<Run> {
    let (ellipsis, cap) = if cutoff >= 3 {
        (true, cutoff - 2)
    } else {
        (false, cutoff)
    };
    let mut cut = cut_runs(&row, cap);
    // Trim trailing spaces so the marker hugs the text.
    while let Some(last) = cut.last_mut() {
        let trimmed = last.text.trim_end().len();
        if trimmed == 0 {
            cut.pop();
        } else {
            last.text.truncate(trimmed);
            break;
        }
    }
    if ellipsis {
        match cut.last_mut() {
            Some(last) => last.text.push_str(".."),
            None => cut.push(Run::new(Colour::White, "..")),
        }
    }
    cut
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::encode::strip_control_codes;

    fn left_white(text: &str) -> ContentBlock {
        ContentBlock::new().group(AlignedGroup::left().span(Colour::White, text))
    }

    fn visible(packet: &Packet) -> String {
        strip_control_codes(&packet.text)
    }

    // ── structural validation ───────────────────────────────────────────────

    #[test]
    fn test_zero_width_fails_fast() {
        let err = layout_block(&left_white("x"), 5, 0);
        assert!(matches!(err, Err(Error::InvalidWidth(0))));
    }

    #[test]
    fn test_width_over_row_fails_fast() {
        let err = layout_block(&left_white("x"), 5, 41);
        assert!(matches!(err, Err(Error::InvalidWidth(41))));
    }

    #[test]
    fn test_degenerate_wrap_limit_fails_fast() {
        let block = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::White, "x").wrap_limit(0, 10));
        assert!(matches!(layout(&block, 5), Err(Error::InvalidWrapLimit(_))));
    }

    // ── basic shape ─────────────────────────────────────────────────────────

    #[test]
    fn test_empty_block_yields_no_packets() {
        let packets = layout(&ContentBlock::new(), 5).expect("layout");
        assert!(packets.is_empty());
    }

    #[test]
    fn test_empty_span_still_consumes_one_row() {
        let packets = layout(&left_white(""), 7).expect("layout");
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].number, 7);
        assert_eq!(packets[0].text, " ".repeat(40));
    }

    #[test]
    fn test_single_row_padded_to_width() {
        let packets = layout(&left_white("SÄÄTIEDOT"), 5).expect("layout");
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].number, 5);
        assert_eq!(packets[0].text.chars().count(), 40);
        assert!(packets[0].text.starts_with("SÄÄTIEDOT"));
    }

    #[test]
    fn test_row_numbers_increase_from_line() {
        let text = "sana ".repeat(30);
        let packets = layout(&left_white(&text), 5).expect("layout");
        assert!(packets.len() > 1);
        for (i, p) in packets.iter().enumerate() {
            assert_eq!(p.number as usize, 5 + i);
        }
    }

    #[test]
    fn test_determinism() {
        let block = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::Yellow, "Sää muuttuu huomenna"))
            .group(AlignedGroup::right().span(Colour::Cyan, "102"));
        let a = layout(&block, 5).expect("layout");
        let b = layout(&block, 5).expect("layout");
        assert_eq!(a, b);
    }

    // ── word wrap ───────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_breaks_only_at_word_boundaries() {
        let packets =
            layout_block(&left_white("Sää muuttuu huomenna koko maassa"), 5, 19).expect("layout");
        assert_eq!(packets.len(), 3);
        let lines: Vec<String> = packets.iter().map(visible).collect();
        assert_eq!(lines[0].trim_end(), "Sää muuttuu");
        assert_eq!(lines[1].trim_end(), "huomenna koko");
        assert_eq!(lines[2].trim_end(), "maassa");
        for p in &packets {
            assert_eq!(p.text.chars().count(), 19);
        }
        // Every produced word is one of the input words, in order.
        let joined: Vec<String> = lines
            .iter()
            .flat_map(|l| l.split_whitespace().map(str::to_string))
            .collect();
        assert_eq!(joined, ["Sää", "muuttuu", "huomenna", "koko", "maassa"]);
    }

    #[test]
    fn test_overlong_word_hard_breaks() {
        let word = "a".repeat(45);
        let packets = layout(&left_white(&word), 5).expect("layout");
        assert_eq!(packets.len(), 2);
        assert_eq!(visible(&packets[0]), "a".repeat(40));
        assert_eq!(visible(&packets[1]).trim_end(), "a".repeat(5));
    }

    #[test]
    fn test_internal_whitespace_collapses() {
        let packets = layout(&left_white("YLE   UUTISET"), 5).expect("layout");
        assert!(visible(&packets[0]).starts_with("YLE UUTISET"));
    }

    // ── alignment composition ───────────────────────────────────────────────

    #[test]
    fn test_headline_with_right_page_number_single_row() {
        let block = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::Yellow, "Hallitus koolla tänään"))
            .group(AlignedGroup::right().span(Colour::Cyan, "102"));
        let packets = layout(&block, 5).expect("layout");
        assert_eq!(packets.len(), 1, "both groups fit on one row");
        let text = &packets[0].text;
        assert_eq!(text.chars().count(), 40);
        // Yellow headline at the left edge, cyan number at the right edge.
        assert!(text.starts_with(Colour::Yellow.code()));
        let tail: String = text.chars().skip(36).collect();
        assert_eq!(tail, format!("{}102", Colour::Cyan.code()));
    }

    #[test]
    fn test_right_group_not_repeated_on_continuation_rows() {
        let title = "Pitkä otsikko joka jatkuu usealle riville asti varmasti tällä leveydellä";
        let block = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::White, title))
            .group(AlignedGroup::right().span(Colour::Yellow, "186"));
        let packets = layout(&block, 18).expect("layout");
        assert!(packets.len() >= 2);
        assert!(packets[0].text.contains("186"));
        for p in &packets[1..] {
            assert!(!p.text.contains("186"), "page number only on first row");
        }
    }

    #[test]
    fn test_first_row_reserves_space_for_right_group() {
        // 36 columns remain for the left text when a 4-cell right group
        // (marker + 3 digits) is present.
        let block = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::White, "a".repeat(36)))
            .group(AlignedGroup::right().span(Colour::Yellow, "101"));
        let packets = layout(&block, 5).expect("layout");
        assert_eq!(packets.len(), 1);
        let block = ContentBlock::new()
            .group(AlignedGroup::left().span(Colour::White, "a".repeat(37)))
            .group(AlignedGroup::right().span(Colour::Yellow, "101"));
        let packets = layout(&block, 5).expect("layout");
        assert_eq!(packets.len(), 2, "37 columns no longer fit beside the number");
    }

    #[test]
    fn test_centre_group_centred() {
        let block =
            ContentBlock::new().group(AlignedGroup::center().span(Colour::White, "UUTISIA"));
        let packets = layout(&block, 5).expect("layout");
        assert_eq!(packets.len(), 1);
        let text = &packets[0].text;
        // (40 - 7) / 2 = 16 leading spaces.
        assert!(text.starts_with(&" ".repeat(16)));
        assert_eq!(text.chars().count(), 40);
        assert!(text.contains("UUTISIA"));
    }

    #[test]
    fn test_right_only_block_is_one_row() {
        let block = ContentBlock::new().group(AlignedGroup::right().span(Colour::White, "306"));
        let packets = layout(&block, 12).expect("layout");
        assert_eq!(packets.len(), 1);
        assert!(packets[0].text.ends_with("306"));
    }

    // ── multi-colour spans ──────────────────────────────────────────────────

    #[test]
    fn test_two_colour_listing_row() {
        let block = ContentBlock::new().group(
            AlignedGroup::left()
                .span(Colour::Yellow, "18.00 ")
                .span(Colour::White, "Uutiset ja sää"),
        );
        let packets = layout(&block, 7).expect("layout");
        assert_eq!(packets.len(), 1);
        let text = &packets[0].text;
        assert!(text.starts_with(Colour::Yellow.code()));
        assert!(text.contains(&format!("18.00 {}Uutiset", Colour::White.code())));
    }

    // ── postWrapLimit ───────────────────────────────────────────────────────

    #[test]
    fn test_wrap_limit_caps_rows_and_truncates() {
        let title = "Eduskunta äänesti tänään uudesta esityksestä jonka käsittely \
                     jatkuu ensi viikolla valiokunnassa";
        let block = ContentBlock::new().group(
            AlignedGroup::left()
                .span(Colour::White, title)
                .wrap_limit(2, 36),
        );
        let packets = layout(&block, 18).expect("layout");
        assert_eq!(packets.len(), 2, "capped at maxLines");
        let last = visible(&packets[1]);
        let content = last.trim_end();
        assert!(content.chars().count() <= 36, "cutoff respected: {content:?}");
        assert!(content.ends_with(".."), "truncation marker present: {content:?}");
    }

    #[test]
    fn test_wrap_limit_not_applied_when_text_fits() {
        let block = ContentBlock::new().group(
            AlignedGroup::left()
                .span(Colour::White, "Lyhyt otsikko")
                .wrap_limit(2, 36),
        );
        let packets = layout(&block, 18).expect("layout");
        assert_eq!(packets.len(), 1);
        assert!(!visible(&packets[0]).contains(".."));
    }

    #[test]
    fn test_front_page_headline_with_limit_and_number() {
        // The front-page convention: white headline capped at 2×36, yellow
        // page number right on the first row.
        let title = "Presidentti tapasi kollegansa Tukholmassa ja keskusteli \
                     pohjoismaisesta puolustusyhteistyöstä pitkään";
        let block = ContentBlock::new()
            .group(
                AlignedGroup::left()
                    .span(Colour::White, title)
                    .wrap_limit(2, 36),
            )
            .group(AlignedGroup::right().span(Colour::Yellow, "102"));
        let packets = layout(&block, 18).expect("layout");
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].number, 18);
        assert_eq!(packets[1].number, 19);
        assert!(packets[0].text.contains("102"));
        assert!(visible(&packets[1]).trim_end().ends_with(".."));
    }

    #[test]
    fn test_wrap_limit_determinism() {
        let block = ContentBlock::new().group(
            AlignedGroup::left()
                .span(Colour::White, "yksi kaksi kolme neljä viisi kuusi seitsemän")
                .wrap_limit(1, 20),
        );
        let a = layout(&block, 5).expect("layout");
        let b = layout(&block, 5).expect("layout");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }
}
