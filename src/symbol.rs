//! Parametric L-System alphabet for plant growth.
//!
//! Plant grammars here use a closed alphabet, so symbols are a typed
//! [`Letter`] plus numeric parameters rather than interned characters. A
//! [`Symbol`] is a plain value: copying one never aliases another, which is
//! what lets a rewrite pass emit fresh symbols without touching its input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed plant alphabet.
///
/// `Forward` is the only growth letter (the rewriting target); everything
/// else is structural and passes through expansion unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Letter {
    /// Draw a segment and advance the cursor (`F`).
    Forward,
    /// Save the full cursor state onto the stack (`[`).
    PushState,
    /// Restore the most recently saved cursor state (`]`).
    PopState,
    /// Rotate left about the cursor's vertical axis (`+`).
    YawLeft,
    /// Rotate right about the cursor's vertical axis (`-`).
    YawRight,
    /// Tilt about the cursor's lateral axis (`&`).
    PitchDown,
    /// Tilt the opposite way about the lateral axis (`^`).
    PitchUp,
    /// Place a leaf at the cursor without moving it (`L`).
    Leaf,
}

impl Letter {
    /// The single-character rendering used in sequence dumps.
    pub fn glyph(self) -> char {
        match self {
            Letter::Forward => 'F',
            Letter::PushState => '[',
            Letter::PopState => ']',
            Letter::YawLeft => '+',
            Letter::YawRight => '-',
            Letter::PitchDown => '&',
            Letter::PitchUp => '^',
            Letter::Leaf => 'L',
        }
    }

    /// Whether this letter is rewritten by a production rule.
    pub fn is_growth(self) -> bool {
        matches!(self, Letter::Forward)
    }
}

/// One parametric symbol: a letter plus the values its interpretation needs.
///
/// `length` and `radius` are non-negative magnitudes in world units. `age`
/// counts the expansion passes the symbol's growth lineage has undergone
/// since the axiom; renderers typically key color or leaf density on it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub letter: Letter,
    pub length: f32,
    pub radius: f32,
    pub age: u32,
}

impl Symbol {
    pub fn new(letter: Letter, length: f32, radius: f32, age: u32) -> Self {
        Self {
            letter,
            length,
            radius,
            age,
        }
    }

    /// A structural symbol with zeroed parameters (`[`, `]`, turns).
    pub fn bare(letter: Letter) -> Self {
        Self::new(letter, 0.0, 0.0, 0)
    }

    /// A growth segment of the given length, radius, and age.
    pub fn forward(length: f32, radius: f32, age: u32) -> Self {
        Self::new(Letter::Forward, length, radius, age)
    }

    /// A leaf whose `length` field carries the size multiplier.
    pub fn leaf(size: f32, radius: f32, age: u32) -> Self {
        Self::new(Letter::Leaf, size, radius, age)
    }
}

impl fmt::Display for Symbol {
    /// Parametric letters render as `F(1.20,0.08,0)`; structural letters as
    /// their bare glyph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter {
            Letter::Forward | Letter::Leaf => write!(
                f,
                "{}({:.2},{:.2},{})",
                self.letter.glyph(),
                self.length,
                self.radius,
                self.age
            ),
            _ => write!(f, "{}", self.letter.glyph()),
        }
    }
}

/// Renders a sequence as its compact glyph string, e.g. `F[+F][-F]`.
///
/// Parameters are dropped; this is the structural view used in logs and
/// tests.
pub fn glyphs(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.letter.glyph()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_symbols_zero_their_parameters() {
        let s = Symbol::bare(Letter::PushState);
        assert_eq!(s.letter, Letter::PushState);
        assert_eq!(s.length, 0.0);
        assert_eq!(s.radius, 0.0);
        assert_eq!(s.age, 0);
    }

    #[test]
    fn display_shows_parameters_for_growth_letters() {
        let f = Symbol::forward(1.2, 0.08, 3);
        assert_eq!(f.to_string(), "F(1.20,0.08,3)");
        let l = Symbol::leaf(1.0, 0.05, 4);
        assert_eq!(l.to_string(), "L(1.00,0.05,4)");
        assert_eq!(Symbol::bare(Letter::YawLeft).to_string(), "+");
    }

    #[test]
    fn glyph_string_matches_sequence_order() {
        let seq = vec![
            Symbol::forward(1.0, 0.1, 0),
            Symbol::bare(Letter::PushState),
            Symbol::bare(Letter::YawLeft),
            Symbol::bare(Letter::PitchDown),
            Symbol::forward(0.8, 0.08, 1),
            Symbol::leaf(1.0, 0.08, 1),
            Symbol::bare(Letter::PopState),
        ];
        assert_eq!(glyphs(&seq), "F[+&FL]");
    }

    #[test]
    fn only_forward_is_a_growth_letter() {
        assert!(Letter::Forward.is_growth());
        for letter in [
            Letter::PushState,
            Letter::PopState,
            Letter::YawLeft,
            Letter::YawRight,
            Letter::PitchDown,
            Letter::PitchUp,
            Letter::Leaf,
        ] {
            assert!(!letter.is_growth());
        }
    }
}
