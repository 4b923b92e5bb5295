use genz_core::{Route, Session};

use crate::command::{Command, HELP};
use crate::render::Renderer;

/// What the input loop should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Print(String),
    Quit,
}

/// Drives a `Session` from console commands
pub struct Shell {
    session: Session,
    renderer: Renderer,
}

impl Shell {
    pub fn new(session: Session, renderer: Renderer) -> Self {
        Self { session, renderer }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn handle_line(&mut self, line: &str) -> Option<Step> {
        match Command::parse(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(e) => Some(Step::Print(self.renderer.error(&e))),
        }
    }

    pub fn execute(&mut self, command: Command) -> Step {
        tracing::debug!("Executing {:?}", command);
        let output = match command {
            Command::Quit => return Step::Quit,
            Command::Help => HELP.to_string(),
            Command::Posts => self.show(Route::Posts),
            Command::Users => self.show(Route::Users),
            Command::User(id) => self.show(Route::UserPosts(id)),
            Command::Notifications => self.show(Route::Notifications),
            Command::Go(path) => match self.session.navigate_to(&path) {
                Ok(()) => self.render_current(),
                Err(e) => self.renderer.error(&e),
            },
            Command::Refresh => {
                let _ = self.session.navigate(Route::Notifications);
                let entries = self.session.refresh_notifications().to_vec();
                self.renderer.notifications(&entries)
            }
            Command::Post {
                author,
                title,
                content,
            } => {
                let _ = self.session.navigate(Route::CreatePost);
                let mut draft = self.session.create_draft();
                if author.is_some() {
                    draft.author_id = author;
                }
                draft.title = title;
                draft.content = content;

                match self.session.submit_post(draft) {
                    Some(post) => self.renderer.post(&self.session, &post),
                    None => self.renderer.message("Post not created: title is empty"),
                }
            }
            Command::Edit { id, title, content } => {
                let result = self.session.navigate(Route::EditPost(id)).and_then(|()| {
                    let mut draft = self.session.edit_draft(id)?;
                    if !title.is_empty() {
                        draft.title = title;
                    }
                    if let Some(content) = content {
                        draft.content = content;
                    }
                    self.session.save_edit(id, draft)
                });
                match result {
                    Ok(post) => self.renderer.post(&self.session, &post),
                    Err(e) => self.renderer.error(&e),
                }
            }
            Command::React { id, slot } => match self.session.react(id, slot) {
                Ok(post) => self.renderer.post(&self.session, &post),
                Err(e) => self.renderer.error(&e),
            },
        };
        Step::Print(output)
    }

    fn show(&mut self, route: Route) -> String {
        match self.session.navigate(route) {
            Ok(()) => self.render_current(),
            Err(e) => self.renderer.error(&e),
        }
    }

    fn render_current(&self) -> String {
        match self.session.route() {
            Route::Users => self.renderer.users(self.session.store().list_users()),
            Route::Notifications => self.renderer.notifications(self.session.feed().entries()),
            Route::CreatePost => self
                .renderer
                .message("Use: post <title> | <content>"),
            Route::Posts | Route::UserPosts(_) | Route::EditPost(_) => {
                let posts = self.session.visible_posts();
                self.renderer.posts(&self.session, &posts)
            }
        }
    }
}
