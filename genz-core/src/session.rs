use genz_types::{NotificationEntry, Post, PostDraft, PostId};

use crate::config::Settings;
use crate::error::{SessionError, SessionResult};
use crate::nav::{AfterSave, Route};
use crate::notifications::NotificationFeed;
use crate::store::PostStore;

/// View-layer controller: owns the store, the notification feed and the
/// current route, and decides where to go after each action.
pub struct Session {
    store: PostStore,
    feed: NotificationFeed,
    route: Route,
    after_save: AfterSave,
}

impl Session {
    pub fn new(store: PostStore, feed: NotificationFeed, after_save: AfterSave) -> Self {
        Self {
            store,
            feed,
            route: Route::default(),
            after_save,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            PostStore::seeded(&settings.store),
            NotificationFeed::canned(settings.notifications.messages.clone()),
            settings.navigation.after_save,
        )
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn after_save(&self) -> AfterSave {
        self.after_save
    }

    /// Switch views. Routes naming a post or user that doesn't exist are
    /// refused and the current route is kept.
    pub fn navigate(&mut self, route: Route) -> SessionResult<()> {
        match route {
            Route::UserPosts(id) if self.store.get_user(id).is_none() => {
                return Err(SessionError::UserNotFound(id));
            }
            Route::EditPost(id) => {
                self.store.get_post(id)?;
            }
            _ => {}
        }
        tracing::debug!("Navigating {} -> {}", self.route, route);
        self.route = route;
        Ok(())
    }

    pub fn navigate_to(&mut self, path: &str) -> SessionResult<()> {
        let route = Route::parse(path).ok_or_else(|| SessionError::UnknownRoute(path.to_string()))?;
        self.navigate(route)
    }

    /// Posts shown by the current view
    pub fn visible_posts(&self) -> Vec<&Post> {
        match self.route {
            Route::Posts => self.store.list_posts().iter().collect(),
            Route::UserPosts(id) => self.store.posts_by_author(id),
            Route::EditPost(id) => self.store.get_post(id).into_iter().collect(),
            Route::Users | Route::Notifications | Route::CreatePost => Vec::new(),
        }
    }

    pub fn create_draft(&self) -> PostDraft {
        PostDraft::for_create(self.store.list_users())
    }

    pub fn edit_draft(&self, id: PostId) -> SessionResult<PostDraft> {
        Ok(PostDraft::from_post(self.store.get_post(id)?))
    }

    /// Submit the create form. On success the view returns to the post list;
    /// a blank title leaves everything as it was.
    pub fn submit_post(&mut self, draft: PostDraft) -> Option<Post> {
        if !draft.has_title() {
            tracing::debug!("Create form submitted without a title");
            return None;
        }
        let author_id = match draft
            .author_id
            .or_else(|| self.store.list_users().first().map(|u| u.id))
        {
            Some(id) => id,
            None => {
                tracing::warn!("Ignoring post submission: no author and no users to default to");
                return None;
            }
        };

        let post = self.store.add_post(draft.title, author_id, draft.content)?;
        self.route = Route::Posts;
        Some(post)
    }

    /// Save the edit form for post `id`, then apply the after-save policy
    pub fn save_edit(&mut self, id: PostId, draft: PostDraft) -> SessionResult<Post> {
        let post = self.store.update_post(id, draft.into_patch())?;
        self.route = self.after_save.target(id);
        Ok(post)
    }

    pub fn react(&mut self, id: PostId, index: usize) -> SessionResult<Post> {
        Ok(self.store.increment_reaction(id, index)?)
    }

    pub fn refresh_notifications(&mut self) -> &[NotificationEntry] {
        self.feed.refresh()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
