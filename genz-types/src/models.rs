use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::enums::{ReactionSlot, REACTION_SLOTS};

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

mod optional_datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&date.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        s.map(|s| s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom))
            .transpose()
    }
}

macro_rules! numeric_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map($name)
            }
        }
    };
}

numeric_id!(UserId);
numeric_id!(PostId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
        }
    }
}

/// Fixed set of reaction counters attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reactions([u32; REACTION_SLOTS]);

impl Reactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: ReactionSlot) -> u32 {
        self.0[slot.index()]
    }

    pub fn counts(&self) -> &[u32; REACTION_SLOTS] {
        &self.0
    }

    /// Adds one to an active slot. Returns false for the disabled slot,
    /// which is left untouched.
    pub fn increment(&mut self, slot: ReactionSlot) -> bool {
        if !slot.is_active() {
            return false;
        }
        let counter = &mut self.0[slot.index()];
        *counter = counter.saturating_add(1);
        true
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Iterate slots alongside their current counts
    pub fn iter(&self) -> impl Iterator<Item = (ReactionSlot, u32)> + '_ {
        ReactionSlot::ALL.iter().map(move |slot| (*slot, self.get(*slot)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub author_id: UserId,
    pub content: String,
    pub reactions: Reactions,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    /// Set on the first edit, refreshed on every later one
    #[serde(default, with = "optional_datetime_format")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for a post. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl PostPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Form state behind the create and edit pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub author_id: Option<UserId>,
    pub content: String,
}

impl PostDraft {
    /// Blank draft with the author preselected to the first user
    pub fn for_create(users: &[User]) -> Self {
        Self {
            author_id: users.first().map(|u| u.id),
            ..Self::default()
        }
    }

    /// Draft prefilled from an existing post, for the edit page
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            author_id: Some(post.author_id),
            content: post.content.clone(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// The edit page only saves title and content
    pub fn into_patch(self) -> PostPatch {
        PostPatch {
            title: Some(self.title),
            content: Some(self.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}
