//! Priority encoder decoding.
//!
//! The encoder reports only the highest-numbered lit digit. A lower digit
//! shorted on while a higher one is correctly lit is indistinguishable from
//! the healthy reading, and digit zero is not wired to the encoder at all.

use ntd_hal::{DigitalLines, Level, Line, Node};

/// Decode active-low encoder lines (LSB first) into a 4-bit code.
#[must_use]
pub fn decode(bits: [Level; 4]) -> u8 {
    bits.iter()
        .enumerate()
        .filter(|(_, level)| level.is_low())
        .fold(0u8, |code, (bit, _)| code | (1u8 << bit))
}

/// Node reported by an encoder code; `None` when nothing is lit.
#[must_use]
pub fn node_for_code(code: u8) -> Option<Node> {
    match code {
        0 => None,
        _ => Some(Node::digit(code).unwrap_or(Node::EncoderCode(code))),
    }
}

/// Sample the encoder lines and return the active digit, if any.
pub fn read_active_digit<L: DigitalLines + ?Sized>(lines: &mut L) -> Option<Node> {
    let bits = [
        lines.read_line(Line::Encoder(0)),
        lines.read_line(Line::Encoder(1)),
        lines.read_line(Line::Encoder(2)),
        lines.read_line(Line::Encoder(3)),
    ];
    node_for_code(decode(bits))
}
