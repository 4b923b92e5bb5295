use genz_types::{PostId, UserId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Reaction slot out of range: {0}")]
    InvalidReactionSlot(usize),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
