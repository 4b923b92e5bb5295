use genz_types::NotificationEntry;

use crate::seed;

/// Where notification texts come from on each refresh
pub trait NotificationSource {
    fn fetch(&self) -> Vec<String>;
}

/// Fixed list of demo notifications
#[derive(Debug, Clone)]
pub struct CannedNotifications {
    messages: Vec<String>,
}

impl CannedNotifications {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

impl Default for CannedNotifications {
    fn default() -> Self {
        Self::new(seed::default_notifications())
    }
}

impl NotificationSource for CannedNotifications {
    fn fetch(&self) -> Vec<String> {
        self.messages.clone()
    }
}

/// Notification list shown on the notifications page.
///
/// Empty until the first refresh; afterwards it holds exactly what the last
/// refresh produced.
pub struct NotificationFeed {
    source: Box<dyn NotificationSource>,
    entries: Vec<NotificationEntry>,
}

impl NotificationFeed {
    pub fn new(source: Box<dyn NotificationSource>) -> Self {
        Self {
            source,
            entries: Vec::new(),
        }
    }

    pub fn canned(messages: Vec<String>) -> Self {
        Self::new(Box::new(CannedNotifications::new(messages)))
    }

    /// Replace the whole list with a fresh fetch from the source
    pub fn refresh(&mut self) -> &[NotificationEntry] {
        self.entries = self
            .source
            .fetch()
            .into_iter()
            .enumerate()
            .map(|(index, text)| NotificationEntry { index, text })
            .collect();
        tracing::debug!("Refreshed notifications ({} entries)", self.entries.len());
        &self.entries
    }

    pub fn entries(&self) -> &[NotificationEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new(Box::new(CannedNotifications::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl NotificationSource for CountingSource {
        fn fetch(&self) -> Vec<String> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            (0..n).map(|i| format!("note {}", i)).collect()
        }
    }

    #[test]
    fn test_empty_before_refresh() {
        let feed = NotificationFeed::default();
        assert!(feed.is_empty());
        assert!(feed.entries().is_empty());
    }

    #[test]
    fn test_refresh_returns_canned_set() {
        let mut feed = NotificationFeed::default();
        let texts: Vec<_> = feed.refresh().iter().map(|e| e.text.clone()).collect();
        assert_eq!(texts, vec!["New comment!", "Post liked!", "New follower!"]);
        assert_eq!(feed.entries()[2].index, 2);
    }

    #[test]
    fn test_repeated_refresh_does_not_accumulate() {
        let mut feed = NotificationFeed::default();
        let first = feed.refresh().to_vec();
        let second = feed.refresh().to_vec();
        assert_eq!(first, second);
        assert_eq!(feed.entries().len(), 3);
    }

    #[test]
    fn test_refresh_replaces_previous_entries() {
        let mut feed = NotificationFeed::new(Box::new(CountingSource { calls: Cell::new(0) }));
        assert_eq!(feed.refresh().len(), 1);
        assert_eq!(feed.refresh().len(), 2);
        let texts: Vec<_> = feed.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["note 0", "note 1"]);
    }

    #[test]
    fn test_custom_messages() {
        let mut feed = NotificationFeed::canned(vec!["Ping".to_string()]);
        assert_eq!(feed.refresh()[0].text, "Ping");
        assert_eq!(feed.entries().len(), 1);
    }
}
