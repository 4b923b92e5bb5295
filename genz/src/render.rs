use genz_core::{PostStore, Session};
use genz_types::{ErrorResponse, NotificationEntry, Post, User};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A post together with its author's display name
#[derive(Serialize)]
struct PostView<'a> {
    #[serde(flatten)]
    post: &'a Post,
    author_name: Option<&'a str>,
    pinned: bool,
}

impl<'a> PostView<'a> {
    fn new(store: &'a PostStore, post: &'a Post) -> Self {
        Self {
            post,
            author_name: store.get_user(post.author_id).map(|u| u.name.as_str()),
            pinned: store.pinned_post_id() == Some(post.id),
        }
    }
}

pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn posts(&self, session: &Session, posts: &[&Post]) -> String {
        let store = session.store();
        let views: Vec<PostView> = posts.iter().map(|p| PostView::new(store, p)).collect();

        match self.format {
            OutputFormat::Json => to_json(&views),
            OutputFormat::Text => {
                if views.is_empty() {
                    return "(no posts)".to_string();
                }
                views
                    .iter()
                    .map(post_text)
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
        }
    }

    pub fn post(&self, session: &Session, post: &Post) -> String {
        let view = PostView::new(session.store(), post);
        match self.format {
            OutputFormat::Json => to_json(&view),
            OutputFormat::Text => post_text(&view),
        }
    }

    pub fn users(&self, users: &[User]) -> String {
        match self.format {
            OutputFormat::Json => to_json(&users),
            OutputFormat::Text => users
                .iter()
                .map(|u| format!("{}  {}  (/users/{})", u.id, u.name, u.id))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn notifications(&self, entries: &[NotificationEntry]) -> String {
        match self.format {
            OutputFormat::Json => to_json(&entries),
            OutputFormat::Text if entries.is_empty() => {
                "(no notifications, try 'refresh')".to_string()
            }
            OutputFormat::Text => entries
                .iter()
                .map(|e| format!("{}. {}", e.index + 1, e.text))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn message(&self, text: &str) -> String {
        match self.format {
            OutputFormat::Json => to_json(&serde_json::json!({ "message": text })),
            OutputFormat::Text => text.to_string(),
        }
    }

    pub fn error(&self, error: &dyn std::error::Error) -> String {
        match self.format {
            OutputFormat::Json => to_json(&ErrorResponse {
                error: error.to_string(),
                details: error.source().map(|s| s.to_string()),
            }),
            OutputFormat::Text => format!("error: {}", error),
        }
    }
}

fn post_text(view: &PostView) -> String {
    let post = view.post;
    let mut out = String::new();

    let _ = write!(out, "#{} {}", post.id, post.title);
    if view.pinned {
        out.push_str("  [pinned]");
    }
    let _ = write!(
        out,
        "\n   by {}",
        view.author_name.unwrap_or("(unknown author)")
    );
    if post.updated_at.is_some() {
        out.push_str(" (edited)");
    }
    if !post.content.is_empty() {
        let _ = write!(out, "\n   {}", post.content);
    }

    let buttons: Vec<String> = post
        .reactions
        .iter()
        .map(|(slot, count)| format!("[{}] {} {}", slot.index(), slot.glyph(), count))
        .collect();
    let _ = write!(
        out,
        "\n   {}  ({} total)",
        buttons.join("  "),
        post.reactions.total()
    );
    out
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_post_shows_author_and_reactions() {
        let mut session = Session::default();
        let id = session.store().list_posts()[0].id;
        session.react(id, 1).unwrap();

        let post = session.store().get_post(id).unwrap().clone();
        let text = Renderer::new(OutputFormat::Text).post(&session, &post);

        assert!(text.starts_with("#1 First Post"));
        assert!(text.contains("by Alice"));
        assert!(text.contains("[1] ❤️ 1"));
        assert!(text.contains("[4] 🚫 0"));
        assert!(text.contains("(1 total)"));
        assert!(!text.contains("(edited)"));
    }

    #[test]
    fn test_json_posts_include_author_name() {
        let session = Session::default();
        let posts = session.visible_posts();
        let json = Renderer::new(OutputFormat::Json).posts(&session, &posts);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["author_name"], "Bob");
        assert_eq!(value[1]["reactions"], serde_json::json!([0, 0, 0, 0, 0]));
        assert_eq!(value[0]["pinned"], false);
    }

    #[test]
    fn test_empty_notifications_hint() {
        let text = Renderer::new(OutputFormat::Text).notifications(&[]);
        assert!(text.contains("refresh"));
    }
}
