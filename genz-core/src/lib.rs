//! In-memory state for the GenZ social demo: posts, users, reactions,
//! notifications and navigation.

pub mod config;
pub mod error;
pub mod nav;
pub mod notifications;
pub mod seed;
pub mod session;
pub mod store;

pub use config::Settings;
pub use error::{SessionError, SessionResult, StoreError, StoreResult};
pub use nav::{AfterSave, Route};
pub use notifications::{CannedNotifications, NotificationFeed, NotificationSource};
pub use seed::SeedPost;
pub use session::Session;
pub use store::PostStore;
