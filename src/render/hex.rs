//! Hex encoding for binary payloads embedded in picture groups.

/// Payload bytes emitted per line of hex output.
const BYTES_PER_LINE: usize = 60;

/// Encodes a binary payload as lowercase hex, two digits per byte.
///
/// A line break is inserted after every 60th byte's digits to keep the
/// markup file readable. The breaks carry no meaning; RTF readers skip
/// them.
pub fn encode_payload(data: &[u8]) -> String {
    let encoded = hex::encode(data);
    let line_len = BYTES_PER_LINE * 2;
    let mut out = String::with_capacity(encoded.len() + encoded.len() / line_len);
    for (i, ch) in encoded.chars().enumerate() {
        if i != 0 && i % line_len == 0 {
            out.push('\n');
        }
        out.push(ch);
    }
    out
}
