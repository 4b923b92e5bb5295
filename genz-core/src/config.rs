use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::nav::AfterSave;
use crate::seed;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreSettings {
    pub pinned_intro: bool,
    pub seed_demo_posts: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavigationSettings {
    pub after_save: AfterSave,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "seed::default_notifications")]
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub store: StoreSettings,
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            messages: seed::default_notifications(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                pinned_intro: false,
                seed_demo_posts: true,
            },
            navigation: NavigationSettings {
                after_save: AfterSave::default(),
            },
            notifications: NotificationSettings::default(),
        }
    }
}

const CONFIG_FILE_NAME: &str = "genz.toml";

impl Settings {
    /// Load settings from `genz.toml` (if present) and the environment,
    /// reading `path` instead of `genz.toml` when given. An explicit path
    /// must exist and is always parsed as TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(path, |key| std::env::var(key).ok())
    }

    fn build<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .set_default("store.pinned_intro", false)?
            .set_default("store.seed_demo_posts", true)?
            .set_default("navigation.after_save", AfterSave::default().as_str())?;

        // 1. Settings file
        match path {
            Some(path) => {
                let file = File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true);
                builder = builder.add_source(file);
            }
            None => {
                let current_dir_path = PathBuf::from(CONFIG_FILE_NAME);
                if current_dir_path.exists() {
                    builder = builder.add_source(File::from(current_dir_path).required(false));
                }
            }
        }

        // 2. Environment variables (highest priority)
        if let Some(pinned) = env("GENZ_PINNED_INTRO") {
            builder = builder.set_override("store.pinned_intro", pinned)?;
        }
        if let Some(seed_posts) = env("GENZ_SEED_DEMO_POSTS") {
            builder = builder.set_override("store.seed_demo_posts", seed_posts)?;
        }
        if let Some(after_save) = env("GENZ_AFTER_SAVE") {
            let after_save = AfterSave::parse(&after_save).ok_or_else(|| {
                ConfigError::Message(format!("Invalid GENZ_AFTER_SAVE value: {}", after_save))
            })?;
            builder = builder.set_override("navigation.after_save", after_save.as_str())?;
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        if settings.notifications.messages.is_empty() {
            return Err(ConfigError::Message(
                "notifications.messages must list at least one message".to_string(),
            ));
        }
        Ok(settings)
    }
}
