//! Text escaping for splicing arbitrary strings into RTF markup.

/// Escapes text for inclusion in an RTF group.
///
/// Backslashes and braces get backslash escapes, newlines become `\line`,
/// tabs become `\tab`, and carriage returns are dropped. Characters
/// outside ASCII are written as `\uN?` escapes carrying the signed 16-bit
/// code unit, with a surrogate pair for characters beyond the BMP. The
/// document preamble declares `\uc1`, so each escape carries a single `?`
/// fallback.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u16; 2];
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\\"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '\n' => out.push_str("\\line "),
            '\t' => out.push_str("\\tab "),
            '\r' => {}
            c if c.is_ascii() => out.push(c),
            c => {
                for &unit in c.encode_utf16(&mut buf).iter() {
                    out.push_str(&format!("\\u{}?", unit as i16));
                }
            }
        }
    }
    out
}
