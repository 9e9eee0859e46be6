//! RTF markup emission utilities shared by all block kinds.

mod escape;
mod hex;
mod units;

pub use escape::escape_text;
pub use hex::encode_payload;
pub use units::{pt_to_twip, TWIPS_PER_POINT};
