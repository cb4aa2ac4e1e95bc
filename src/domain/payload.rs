//! Opaque game-entity payload.
//!
//! The core never interprets game rules; legality lives behind the
//! validator port. The few fields here exist so notifications can name what
//! is being traded and so visual-code support is resolved once, up front.

use std::fmt;

/// The game entity attached to a trade request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradePayload {
    species: u16,
    species_name: String,
    nickname: String,
    is_egg: bool,
    visual_code_capable: bool,
}

impl TradePayload {
    /// Create a payload for a concrete species.
    pub fn new(species: u16, species_name: impl Into<String>) -> Self {
        Self {
            species,
            species_name: species_name.into(),
            nickname: String::new(),
            is_egg: false,
            visual_code_capable: false,
        }
    }

    /// A payload carrying no species, used by routines that only read from
    /// the partner (dump, seed check).
    #[must_use]
    pub fn empty() -> Self {
        Self::new(0, "")
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    #[must_use]
    pub fn as_egg(mut self) -> Self {
        self.is_egg = true;
        self
    }

    /// Mark the payload as originating from the generation that pairs
    /// partners with a picture code instead of a numeric one.
    #[must_use]
    pub fn with_visual_code_support(mut self) -> Self {
        self.visual_code_capable = true;
        self
    }

    #[must_use]
    pub const fn species(&self) -> u16 {
        self.species
    }

    #[must_use]
    pub fn species_name(&self) -> &str {
        &self.species_name
    }

    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    #[must_use]
    pub const fn is_egg(&self) -> bool {
        self.is_egg
    }

    /// True when no species is attached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.species == 0
    }

    #[must_use]
    pub const fn supports_visual_code(&self) -> bool {
        self.visual_code_capable
    }

    /// Name shown to the requester: the nickname when set, otherwise the
    /// species name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.species_name
        } else {
            &self.nickname
        }
    }
}

impl fmt::Display for TradePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", self.display_name())
        }
    }
}
