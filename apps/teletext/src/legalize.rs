//! Legalizer — remaps accented characters to the Finnish/Swedish teletext
//! G0 alphabet before export.
//!
//! The national-option positions of the transmission charset display the
//! Finnish letters: `[`→Ä, `\`→Ö, `]`→Å, `{`→ä, `|`→ö, `}`→å, `^`→Ü, `~`→ü,
//! `@`→É, `` ` ``→é. Other accented Latin letters fold to their unaccented
//! base; anything else non-ASCII becomes `?`. Colour control codes pass
//! through untouched, and page structure is preserved — only characters
//! change.

use crate::models::{Packet, Page};

/// Remaps one character to the transmission alphabet.
pub fn legalize_char(c: char) -> char {
    match c {
        'ä' => '{',
        'ö' => '|',
        'å' => '}',
        'Ä' => '[',
        'Ö' => '\\',
        'Å' => ']',
        'ü' => '~',
        'Ü' => '^',
        'é' => '`',
        'É' => '@',
        'à' | 'á' | 'â' | 'ã' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' => 'A',
        'è' | 'ê' | 'ë' => 'e',
        'È' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' | 'ø' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ø' => 'O',
        'ù' | 'ú' | 'û' => 'u',
        'Ù' | 'Ú' | 'Û' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'š' => 's',
        'Š' => 'S',
        'ž' => 'z',
        'Ž' => 'Z',
        c if c.is_ascii() => c,
        _ => '?',
    }
}

/// Remaps a whole string.
pub fn legalize_text(text: &str) -> String {
    text.chars().map(legalize_char).collect()
}

fn legalize_packets(packets: &mut [Packet]) {
    for packet in packets {
        packet.text = legalize_text(&packet.text);
    }
}

/// Remaps every packet of a page. Packets in, packets out — only the
/// characters change, never the structure or row numbers.
pub fn legalize_page(mut page: Page) -> Page {
    for subpage in &mut page.subpages {
        legalize_packets(&mut subpage.packets);
    }
    page
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
