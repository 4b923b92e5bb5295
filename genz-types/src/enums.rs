use serde::{Deserialize, Serialize};

/// Number of reaction counters carried by every post.
pub const REACTION_SLOTS: usize = 5;

/// One of the five reaction counters on a post.
///
/// The first four slots are live counters. The last slot is permanently
/// disabled: it is rendered but never counts anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionSlot {
    First,
    Second,
    Third,
    Fourth,
    Disabled,
}

impl ReactionSlot {
    pub const ALL: [ReactionSlot; REACTION_SLOTS] = [
        ReactionSlot::First,
        ReactionSlot::Second,
        ReactionSlot::Third,
        ReactionSlot::Fourth,
        ReactionSlot::Disabled,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            ReactionSlot::First => 0,
            ReactionSlot::Second => 1,
            ReactionSlot::Third => 2,
            ReactionSlot::Fourth => 3,
            ReactionSlot::Disabled => 4,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ReactionSlot::Disabled)
    }

    /// Glyph shown on the reaction button for this slot
    pub fn glyph(&self) -> &'static str {
        if self.is_active() {
            "❤️"
        } else {
            "🚫"
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionSlot::First => "first",
            ReactionSlot::Second => "second",
            ReactionSlot::Third => "third",
            ReactionSlot::Fourth => "fourth",
            ReactionSlot::Disabled => "disabled",
        }
    }

    /// Accepts either the slot name or its numeric index
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index);
        }
        match s.to_lowercase().as_str() {
            "first" => Some(ReactionSlot::First),
            "second" => Some(ReactionSlot::Second),
            "third" => Some(ReactionSlot::Third),
            "fourth" => Some(ReactionSlot::Fourth),
            "disabled" => Some(ReactionSlot::Disabled),
            _ => None,
        }
    }
}
