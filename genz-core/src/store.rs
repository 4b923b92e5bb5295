use chrono::Utc;
use genz_types::{Post, PostId, PostPatch, ReactionSlot, Reactions, User, UserId};

use crate::config::StoreSettings;
use crate::error::{StoreError, StoreResult};
use crate::seed::{self, SeedPost};

/// Single source of truth for users and posts.
///
/// Every mutation goes through here so all views read the same state.
/// Posts are kept in display order: insertion order, except that a pinned
/// intro post stays first and new posts land directly after it.
#[derive(Debug, Clone)]
pub struct PostStore {
    users: Vec<User>,
    posts: Vec<Post>,
    pinned: Option<PostId>,
    next_id: u64,
}

impl PostStore {
    /// Create a store with the given users and seed posts, in order
    pub fn new(users: Vec<User>, posts: Vec<SeedPost>) -> Self {
        let mut store = Self {
            users,
            posts: Vec::with_capacity(posts.len()),
            pinned: None,
            next_id: 1,
        };
        for seed in posts {
            let post = store.build_post(seed.title, seed.author_id, seed.content);
            store.posts.push(post);
        }
        store
    }

    /// Create a store whose first post is pinned ahead of everything else
    pub fn with_pinned_intro(users: Vec<User>, intro: SeedPost, posts: Vec<SeedPost>) -> Self {
        let mut store = Self::new(users, Vec::new());
        let intro = store.build_post(intro.title, intro.author_id, intro.content);
        store.pinned = Some(intro.id);
        store.posts.push(intro);
        for seed in posts {
            let post = store.build_post(seed.title, seed.author_id, seed.content);
            store.posts.push(post);
        }
        store
    }

    /// Build the startup store described by the settings
    pub fn seeded(settings: &StoreSettings) -> Self {
        let posts = if settings.seed_demo_posts {
            seed::demo_posts()
        } else {
            Vec::new()
        };

        let store = if settings.pinned_intro {
            Self::with_pinned_intro(seed::default_users(), seed::intro_post(), posts)
        } else {
            Self::new(seed::default_users(), posts)
        };

        tracing::info!(
            "Seeded store with {} users and {} posts (pinned intro: {})",
            store.users.len(),
            store.posts.len(),
            store.pinned.is_some()
        );
        store
    }

    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn list_posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn pinned_post_id(&self) -> Option<PostId> {
        self.pinned
    }

    pub fn get_post(&self, id: PostId) -> StoreResult<&Post> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::PostNotFound(id))
    }

    /// Posts written by one user, in display order
    pub fn posts_by_author(&self, author_id: UserId) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.author_id == author_id).collect()
    }

    /// Add a post. A blank title is ignored and yields `None`.
    pub fn add_post(
        &mut self,
        title: impl Into<String>,
        author_id: UserId,
        content: impl Into<String>,
    ) -> Option<Post> {
        let title = title.into();
        if title.trim().is_empty() {
            tracing::debug!("Ignoring post submission with blank title");
            return None;
        }
        if self.get_user(author_id).is_none() {
            tracing::debug!("Adding post for unknown author {}", author_id);
        }

        let post = self.build_post(title, author_id, content.into());
        let index = self.insert_index();
        self.posts.insert(index, post.clone());

        tracing::debug!("Added post {} at position {}", post.id, index);
        Some(post)
    }

    /// Replace the supplied fields of a post. Id, author and reactions are
    /// never touched.
    pub fn update_post(&mut self, id: PostId, patch: PostPatch) -> StoreResult<Post> {
        let post = self.post_mut(id)?;
        if patch.is_empty() {
            return Ok(post.clone());
        }

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        post.updated_at = Some(Utc::now());

        tracing::debug!("Updated post {}", id);
        Ok(post.clone())
    }

    /// Add one to a reaction counter. The disabled slot is accepted and
    /// left unchanged.
    pub fn increment_reaction(&mut self, post_id: PostId, index: usize) -> StoreResult<Post> {
        let post = self.post_mut(post_id)?;
        let slot = ReactionSlot::from_index(index).ok_or(StoreError::InvalidReactionSlot(index))?;

        if post.reactions.increment(slot) {
            tracing::debug!(
                "Post {} reaction {} now {}",
                post_id,
                index,
                post.reactions.get(slot)
            );
        } else {
            tracing::debug!("Ignoring reaction on disabled slot for post {}", post_id);
        }
        Ok(post.clone())
    }

    fn post_mut(&mut self, id: PostId) -> StoreResult<&mut Post> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::PostNotFound(id))
    }

    fn insert_index(&self) -> usize {
        match self.pinned {
            Some(_) => self.posts.len().min(1),
            None => self.posts.len(),
        }
    }

    fn build_post(&mut self, title: String, author_id: UserId, content: String) -> Post {
        let id = PostId(self.next_id);
        self.next_id += 1;
        Post {
            id,
            title,
            author_id,
            content,
            reactions: Reactions::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn demo_store() -> PostStore {
        PostStore::new(seed::default_users(), seed::demo_posts())
    }

    fn pinned_store() -> PostStore {
        PostStore::with_pinned_intro(
            seed::default_users(),
            SeedPost::new("A", UserId(1), "pinned"),
            vec![SeedPost::new("B", UserId(2), "second")],
        )
    }

    fn titles(store: &PostStore) -> Vec<&str> {
        store.list_posts().iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_list_users_returns_seed_unchanged() {
        let store = demo_store();
        assert_eq!(store.list_users(), seed::default_users().as_slice());
        assert_eq!(store.get_user(UserId(2)).map(|u| u.name.as_str()), Some("Bob"));
        assert!(store.get_user(UserId(99)).is_none());
    }

    #[test]
    fn test_add_post_appends_without_pin() {
        let mut store = demo_store();
        let post = store.add_post("Third", UserId(3), "hey").unwrap();

        assert_eq!(titles(&store), vec!["First Post", "Second Post", "Third"]);
        assert_eq!(post.reactions.counts(), &[0, 0, 0, 0, 0]);
        assert_eq!(post.author_id, UserId(3));
        assert!(post.updated_at.is_none());
    }

    #[test]
    fn test_add_post_lands_after_pinned_intro() {
        let mut store = pinned_store();
        store.add_post("C", UserId(1), "new").unwrap();
        assert_eq!(titles(&store), vec!["A", "C", "B"]);

        store.add_post("D", UserId(1), "newer").unwrap();
        assert_eq!(titles(&store), vec!["A", "D", "C", "B"]);
    }

    #[test]
    fn test_blank_title_is_ignored() {
        let mut store = demo_store();
        assert!(store.add_post("", UserId(1), "body").is_none());
        assert!(store.add_post("   \t\n", UserId(1), "body").is_none());
        assert_eq!(store.list_posts().len(), 2);
    }

    #[test]
    fn test_unknown_author_is_accepted() {
        let mut store = demo_store();
        let post = store.add_post("Ghost", UserId(42), "boo").unwrap();
        assert_eq!(post.author_id, UserId(42));
        assert_eq!(store.list_posts().len(), 3);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = demo_store();
        let a = store.add_post("a", UserId(1), "").unwrap();
        let b = store.add_post("b", UserId(1), "").unwrap();
        let mut ids: Vec<_> = store.list_posts().iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_update_title_only() {
        let mut store = demo_store();
        let id = store.list_posts()[0].id;
        store.increment_reaction(id, 1).unwrap();
        let before = store.get_post(id).unwrap().clone();

        let updated = store.update_post(id, PostPatch::new().title("X")).unwrap();

        assert_eq!(updated.title, "X");
        assert_eq!(updated.content, before.content);
        assert_eq!(updated.author_id, before.author_id);
        assert_eq!(updated.reactions, before.reactions);
        assert!(updated.updated_at.is_some());
        assert_eq!(store.get_post(id).unwrap().title, "X");
    }

    #[test]
    fn test_empty_patch_leaves_post_unedited() {
        let mut store = demo_store();
        let id = store.list_posts()[0].id;

        let post = store.update_post(id, PostPatch::new()).unwrap();

        assert!(post.updated_at.is_none());
        assert_eq!(store.get_post(id).unwrap(), &post);
    }

    #[test]
    fn test_update_unknown_post_mutates_nothing() {
        let mut store = demo_store();
        let before = store.list_posts().to_vec();

        let result = store.update_post(PostId(999), PostPatch::new().title("X").content("Y"));

        assert_eq!(result, Err(StoreError::PostNotFound(PostId(999))));
        assert_eq!(store.list_posts(), before.as_slice());
    }

    #[test]
    fn test_increment_reaction_errors() {
        let mut store = demo_store();
        let id = store.list_posts()[0].id;
        assert_eq!(
            store.increment_reaction(PostId(999), 0),
            Err(StoreError::PostNotFound(PostId(999)))
        );
        assert_eq!(
            store.increment_reaction(id, 5),
            Err(StoreError::InvalidReactionSlot(5))
        );
        assert_eq!(store.get_post(id).unwrap().reactions.total(), 0);
    }

    #[test]
    fn test_posts_by_author() {
        let mut store = demo_store();
        store.add_post("Alice again", UserId(1), "hi").unwrap();
        let alice: Vec<_> = store
            .posts_by_author(UserId(1))
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(alice, vec!["First Post", "Alice again"]);
        assert!(store.posts_by_author(UserId(3)).is_empty());
    }

    #[test]
    fn test_seeded_respects_settings() {
        let plain = PostStore::seeded(&StoreSettings {
            pinned_intro: false,
            seed_demo_posts: true,
        });
        assert_eq!(plain.list_posts().len(), 2);
        assert!(plain.pinned_post_id().is_none());

        let pinned = PostStore::seeded(&StoreSettings {
            pinned_intro: true,
            seed_demo_posts: false,
        });
        assert_eq!(pinned.list_posts().len(), 1);
        assert_eq!(pinned.pinned_post_id(), Some(pinned.list_posts()[0].id));
    }

    // For any number of clicks on an active slot, the counter grows by exactly
    // that many and every other slot is untouched.
    proptest! {
        #[test]
        fn prop_increment_counts_exactly(slot in 0usize..4, clicks in 0usize..50) {
            let mut store = demo_store();
            let id = store.list_posts()[1].id;

            for _ in 0..clicks {
                store.increment_reaction(id, slot).unwrap();
            }

            let counts = *store.get_post(id).unwrap().reactions.counts();
            for (i, count) in counts.iter().enumerate() {
                let expected = if i == slot { clicks as u32 } else { 0 };
                prop_assert_eq!(*count, expected);
            }
        }

        #[test]
        fn prop_disabled_slot_never_changes(
            clicks in 0usize..50,
            warmup in prop::collection::vec(0usize..4, 0..10)
        ) {
            let mut store = demo_store();
            let id = store.list_posts()[0].id;
            for slot in &warmup {
                store.increment_reaction(id, *slot).unwrap();
            }
            let before = store.get_post(id).unwrap().reactions;

            for _ in 0..clicks {
                let post = store.increment_reaction(id, 4).unwrap();
                prop_assert_eq!(post.reactions, before);
            }

            prop_assert_eq!(store.get_post(id).unwrap().reactions.get(ReactionSlot::Disabled), 0);
        }

        #[test]
        fn prop_add_post_grows_by_one(
            title in "[a-zA-Z0-9][a-zA-Z0-9 !?.,]{0,40}",
            content in "[a-zA-Z0-9 !?.,]{0,80}",
            author in 1u64..4
        ) {
            let mut store = demo_store();
            let before = store.list_posts().len();

            let post = store.add_post(title.clone(), UserId(author), content.clone()).unwrap();

            prop_assert_eq!(store.list_posts().len(), before + 1);
            prop_assert_eq!(post.reactions.counts(), &[0, 0, 0, 0, 0]);
            prop_assert_eq!(&post.title, &title);
            prop_assert_eq!(&post.content, &content);
        }

        #[test]
        fn prop_whitespace_title_is_noop(title in "[ \t\n]{0,10}") {
            let mut store = demo_store();
            prop_assert!(store.add_post(title, UserId(1), "body").is_none());
            prop_assert_eq!(store.list_posts().len(), 2);
        }
    }
}
