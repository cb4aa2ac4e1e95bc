//! Trade codes - numeric link codes and picture-code sequences.
//!
//! Most game generations pair trade partners with an eight-digit numeric
//! code. One generation instead shows a three-symbol picture code; payloads
//! that support it carry a [`VisualCode`] resolved once at entry
//! construction, so nothing downstream has to type-test the payload.

use std::fmt;

use rand::Rng;

use crate::error::SubmitError;

/// Largest permitted numeric trade code (eight digits).
pub const MAX_TRADE_CODE: u32 = 9999_9999;

/// Numeric link code in `[0, 99_999_999]`.
///
/// Range-checked at construction; displays with the in-game `0000 0000`
/// grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TradeCode(u32);

impl TradeCode {
    /// Create a trade code, rejecting values outside the permitted range.
    pub fn new(code: u32) -> Result<Self, SubmitError> {
        if code > MAX_TRADE_CODE {
            return Err(SubmitError::InvalidCode(u64::from(code)));
        }
        Ok(Self(code))
    }

    /// Draw a uniformly random trade code.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::thread_rng().gen_range(0..=MAX_TRADE_CODE))
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TradeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04} {:04}", self.0 / 10_000, self.0 % 10_000)
    }
}

/// One symbol of a picture-based link code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PictoSymbol {
    Pikachu,
    Eevee,
    Bulbasaur,
    Charmander,
    Squirtle,
    Psyduck,
    Cubone,
    Snorlax,
    Jigglypuff,
    Diglett,
}

impl PictoSymbol {
    pub const ALL: [Self; 10] = [
        Self::Pikachu,
        Self::Eevee,
        Self::Bulbasaur,
        Self::Charmander,
        Self::Squirtle,
        Self::Psyduck,
        Self::Cubone,
        Self::Snorlax,
        Self::Jigglypuff,
        Self::Diglett,
    ];
}

impl fmt::Display for PictoSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pikachu => "Pikachu",
            Self::Eevee => "Eevee",
            Self::Bulbasaur => "Bulbasaur",
            Self::Charmander => "Charmander",
            Self::Squirtle => "Squirtle",
            Self::Psyduck => "Psyduck",
            Self::Cubone => "Cubone",
            Self::Snorlax => "Snorlax",
            Self::Jigglypuff => "Jigglypuff",
            Self::Diglett => "Diglett",
        };
        write!(f, "{name}")
    }
}

/// Three-symbol visual link code shown in place of a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualCode([PictoSymbol; 3]);

impl VisualCode {
    #[must_use]
    pub const fn new(symbols: [PictoSymbol; 3]) -> Self {
        Self(symbols)
    }

    /// Draw a random three-symbol sequence.
    #[must_use]
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let mut pick = || PictoSymbol::ALL[rng.gen_range(0..PictoSymbol::ALL.len())];
        Self([pick(), pick(), pick()])
    }

    #[must_use]
    pub const fn symbols(&self) -> &[PictoSymbol; 3] {
        &self.0
    }
}

impl fmt::Display for VisualCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0[0], self.0[1], self.0[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(TradeCode::new(0).is_ok());
        assert!(TradeCode::new(MAX_TRADE_CODE).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = TradeCode::new(MAX_TRADE_CODE + 1).unwrap_err();
        assert_eq!(err, SubmitError::InvalidCode(100_000_000));
    }

    #[test]
    fn displays_grouped_digits() {
        let code = TradeCode::new(12_345_678).unwrap();
        assert_eq!(code.to_string(), "1234 5678");

        let low = TradeCode::new(42).unwrap();
        assert_eq!(low.to_string(), "0000 0042");
    }

    #[test]
    fn random_codes_stay_in_range() {
        for _ in 0..1_000 {
            assert!(TradeCode::random().value() <= MAX_TRADE_CODE);
        }
    }

    #[test]
    fn visual_code_displays_symbol_names() {
        let code = VisualCode::new([
            PictoSymbol::Pikachu,
            PictoSymbol::Eevee,
            PictoSymbol::Snorlax,
        ]);
        assert_eq!(code.to_string(), "Pikachu, Eevee, Snorlax");
    }
}
