//! Startup data. Every call builds fresh values; nothing here is shared
//! mutable state.

use genz_types::{User, UserId};

/// A post as described at startup, before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPost {
    pub title: String,
    pub author_id: UserId,
    pub content: String,
}

impl SeedPost {
    pub fn new(title: impl Into<String>, author_id: UserId, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author_id,
            content: content.into(),
        }
    }
}

pub fn default_users() -> Vec<User> {
    vec![
        User::new(1, "Alice"),
        User::new(2, "Bob"),
        User::new(3, "Charlie"),
    ]
}

pub fn demo_posts() -> Vec<SeedPost> {
    vec![
        SeedPost::new("First Post", UserId(1), "Hello World"),
        SeedPost::new("Second Post", UserId(2), "React is cool!"),
    ]
}

/// The static post pinned to the top of the feed when pinning is enabled
pub fn intro_post() -> SeedPost {
    SeedPost::new(
        "Welcome to GenZ",
        UserId(1),
        "Share what you're up to. New posts show up right below this one.",
    )
}

pub fn default_notifications() -> Vec<String> {
    vec![
        "New comment!".to_string(),
        "Post liked!".to_string(),
        "New follower!".to_string(),
    ]
}
