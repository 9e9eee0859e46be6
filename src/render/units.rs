//! Length unit conversion for RTF control words.

/// Twips per point; RTF expresses lengths in twentieths of a point.
pub const TWIPS_PER_POINT: f32 = 20.0;

/// Converts a length in points to twips, truncating toward zero.
///
/// RTF control words take integer twip arguments. The fractional part is
/// dropped, never rounded.
pub fn pt_to_twip(pt: f32) -> i32 {
    (pt * TWIPS_PER_POINT) as i32
}
