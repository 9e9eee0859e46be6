//! The block contract and the value types shared by every block kind.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::pt_to_twip;

use super::paragraph::CharFormat;

/// Horizontal placement of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// No alignment directive is emitted (reader default applies)
    #[default]
    None,
    /// Left alignment
    Left,
    /// Right alignment
    Right,
    /// Center alignment
    Center,
}

impl Alignment {
    /// The control word this alignment emits, empty for `None`.
    pub fn control_word(&self) -> &'static str {
        match self {
            Alignment::None => "",
            Alignment::Left => r"\ql",
            Alignment::Right => r"\qr",
            Alignment::Center => r"\qc",
        }
    }
}

/// One of the four margin directions of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Space above the block
    Top,
    /// Space below the block
    Bottom,
    /// Left indent
    Left,
    /// Right indent
    Right,
}

/// Per-direction block margins in points, each independently unset by
/// default.
///
/// An unset direction emits no directive. Setting a negative value clears
/// the direction back to unset, matching the sentinel convention of older
/// RTF writers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    top: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
    right: Option<f32>,
}

impl Margins {
    /// Create margins with all four directions unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the margin for a direction, if set.
    pub fn get(&self, direction: Direction) -> Option<f32> {
        match direction {
            Direction::Top => self.top,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Set the margin for a direction in points.
    ///
    /// A negative value unsets the direction instead.
    pub fn set(&mut self, direction: Direction, pt: f32) {
        let value = if pt < 0.0 { None } else { Some(pt) };
        match direction {
            Direction::Top => self.top = value,
            Direction::Bottom => self.bottom = value,
            Direction::Left => self.left = value,
            Direction::Right => self.right = value,
        }
    }

    /// Unset the margin for a direction.
    pub fn clear(&mut self, direction: Direction) {
        match direction {
            Direction::Top => self.top = None,
            Direction::Bottom => self.bottom = None,
            Direction::Left => self.left = None,
            Direction::Right => self.right = None,
        }
    }

    /// Check whether no direction is set.
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }

    /// Write the margin directives for every set direction, in Top,
    /// Bottom, Left, Right order, converting points to twips.
    pub fn write_directives(&self, out: &mut String) {
        for (value, tag) in [
            (self.top, r"\sb"),
            (self.bottom, r"\sa"),
            (self.left, r"\li"),
            (self.right, r"\ri"),
        ] {
            if let Some(pt) = value {
                if pt >= 0.0 {
                    out.push_str(tag);
                    out.push_str(&pt_to_twip(pt).to_string());
                }
            }
        }
    }
}

/// The contract every renderable document unit implements.
///
/// A block owns its alignment, margins, page-break intent, and the
/// opening/closing group delimiters a container may override to nest it.
/// The composer places blocks uniformly through this interface without
/// knowing their concrete kind.
pub trait Block: Send + Sync {
    /// Horizontal placement of the block.
    fn alignment(&self) -> Alignment;

    /// Set the horizontal placement of the block.
    fn set_alignment(&mut self, alignment: Alignment);

    /// The block's margins.
    fn margins(&self) -> &Margins;

    /// Mutable access to the block's margins.
    fn margins_mut(&mut self) -> &mut Margins;

    /// Whether a page break is forced before the block.
    fn start_new_page(&self) -> bool;

    /// Force or release a page break before the block.
    fn set_start_new_page(&mut self, start_new_page: bool);

    /// The block's default character formatting; images expose none.
    fn default_char_format(&self) -> Option<&CharFormat> {
        None
    }

    /// Replace the opening delimiter. Used by a containing block to splice
    /// this block into a nesting context; the head must stay balanced with
    /// the tail.
    fn set_block_head(&mut self, head: String);

    /// Replace the closing delimiter paired with the block head.
    fn set_block_tail(&mut self, tail: String);

    /// Render the block to markup.
    ///
    /// A pure function of the block's current fields: it never mutates the
    /// block, and repeated calls with unchanged fields produce identical
    /// output.
    fn render(&self) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_control_words() {
        assert_eq!(Alignment::None.control_word(), "");
        assert_eq!(Alignment::Left.control_word(), r"\ql");
        assert_eq!(Alignment::Right.control_word(), r"\qr");
        assert_eq!(Alignment::Center.control_word(), r"\qc");
    }

    #[test]
    fn test_margins_set_get_clear() {
        let mut margins = Margins::new();
        assert!(margins.is_empty());

        margins.set(Direction::Top, 12.5);
        assert_eq!(margins.get(Direction::Top), Some(12.5));
        assert_eq!(margins.get(Direction::Bottom), None);
        assert!(!margins.is_empty());

        margins.clear(Direction::Top);
        assert!(margins.is_empty());
    }

    #[test]
    fn test_negative_margin_unsets() {
        let mut margins = Margins::new();
        margins.set(Direction::Left, 8.0);
        margins.set(Direction::Left, -1.0);
        assert_eq!(margins.get(Direction::Left), None);
    }

    #[test]
    fn test_directive_order() {
        let mut margins = Margins::new();
        margins.set(Direction::Top, 10.0);
        margins.set(Direction::Left, 5.0);

        let mut out = String::new();
        margins.write_directives(&mut out);
        assert_eq!(out, r"\sb200\li100");
    }

    #[test]
    fn test_all_directions_emit_in_order() {
        let mut margins = Margins::new();
        margins.set(Direction::Right, 4.0);
        margins.set(Direction::Top, 1.0);
        margins.set(Direction::Bottom, 2.0);
        margins.set(Direction::Left, 3.0);

        let mut out = String::new();
        margins.write_directives(&mut out);
        assert_eq!(out, r"\sb20\sa40\li60\ri80");
    }

    #[test]
    fn test_unset_margins_emit_nothing() {
        let mut out = String::new();
        Margins::new().write_directives(&mut out);
        assert!(out.is_empty());
    }
}
