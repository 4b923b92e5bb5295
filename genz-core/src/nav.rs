use genz_types::{PostId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A navigable view location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Posts,
    Users,
    UserPosts(UserId),
    Notifications,
    CreatePost,
    EditPost(PostId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Posts => "/".to_string(),
            Route::Users => "/users".to_string(),
            Route::UserPosts(id) => format!("/users/{}", id),
            Route::Notifications => "/notifications".to_string(),
            Route::CreatePost => "/create".to_string(),
            Route::EditPost(id) => format!("/edit/{}", id),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Some(Route::Posts),
            ["users"] => Some(Route::Users),
            ["users", id] => id.parse().ok().map(Route::UserPosts),
            ["notifications"] => Some(Route::Notifications),
            ["create"] => Some(Route::CreatePost),
            ["edit", id] => id.parse().ok().map(Route::EditPost),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where the view goes after an edit is saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterSave {
    #[default]
    #[serde(alias = "posts")]
    ReturnToPosts,
    #[serde(alias = "stay")]
    StayOnPost,
}

impl AfterSave {
    pub fn as_str(&self) -> &'static str {
        match self {
            AfterSave::ReturnToPosts => "return_to_posts",
            AfterSave::StayOnPost => "stay_on_post",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "return_to_posts" | "posts" => Some(AfterSave::ReturnToPosts),
            "stay_on_post" | "stay" => Some(AfterSave::StayOnPost),
            _ => None,
        }
    }

    /// Route to show once post `id` has been saved
    pub fn target(&self, id: PostId) -> Route {
        match self {
            AfterSave::ReturnToPosts => Route::Posts,
            AfterSave::StayOnPost => Route::EditPost(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Posts));
        assert_eq!(Route::parse(""), Some(Route::Posts));
        assert_eq!(Route::parse("/users"), Some(Route::Users));
        assert_eq!(Route::parse("/users/2"), Some(Route::UserPosts(UserId(2))));
        assert_eq!(Route::parse("/notifications/"), Some(Route::Notifications));
        assert_eq!(Route::parse("/create"), Some(Route::CreatePost));
        assert_eq!(Route::parse("/edit/12"), Some(Route::EditPost(PostId(12))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Route::parse("/edit"), None);
        assert_eq!(Route::parse("/edit/abc"), None);
        assert_eq!(Route::parse("/users/1/posts"), None);
        assert_eq!(Route::parse("/settings"), None);
    }

    #[test]
    fn test_after_save_targets() {
        assert_eq!(AfterSave::ReturnToPosts.target(PostId(3)), Route::Posts);
        assert_eq!(AfterSave::StayOnPost.target(PostId(3)), Route::EditPost(PostId(3)));
        assert_eq!(AfterSave::parse("stay"), Some(AfterSave::StayOnPost));
        assert_eq!(AfterSave::parse(AfterSave::ReturnToPosts.as_str()), Some(AfterSave::ReturnToPosts));
        assert_eq!(AfterSave::parse("nowhere"), None);
    }

    fn any_route() -> impl Strategy<Value = Route> {
        prop_oneof![
            Just(Route::Posts),
            Just(Route::Users),
            any::<u64>().prop_map(|id| Route::UserPosts(UserId(id))),
            Just(Route::Notifications),
            Just(Route::CreatePost),
            any::<u64>().prop_map(|id| Route::EditPost(PostId(id))),
        ]
    }

    proptest! {
        #[test]
        fn prop_path_parses_back(route in any_route()) {
            prop_assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }
}
