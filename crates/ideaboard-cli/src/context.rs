//! Locating the board and the acting identity for a command.
//!
//! Identity resolution: `IDEABOARD_USER` env > name stored by `ib login` >
//! guest. The env override never touches the stored session.

use std::env;
use std::path::{Path, PathBuf};

use ideaboard_core::config::{self, ProjectConfig};
use ideaboard_core::error::{IdeaError, Result};
use ideaboard_core::session::{self, Identity};
use ideaboard_core::store::IdeaStore;
use ideaboard_core::store::kv::DirKvStore;
use tracing::debug;

/// Env var that overrides the signed-in name for one invocation.
pub const USER_ENV: &str = "IDEABOARD_USER";

pub struct BoardContext {
    pub root: PathBuf,
    pub kv: DirKvStore,
    pub config: ProjectConfig,
}

impl BoardContext {
    /// Find the board at or above `start` and load its config.
    pub fn open(start: &Path) -> Result<Self> {
        let root = config::find_board_root(start)
            .ok_or_else(|| IdeaError::NotInitialized(start.display().to_string()))?;
        let config = config::load_project_config(&root)?;
        let kv = DirKvStore::new(config::store_dir(&root));
        debug!(root = %root.display(), "opened board");
        Ok(Self { root, kv, config })
    }

    pub fn identity(&self) -> Identity {
        resolve_identity_with(|key| env::var(key).ok(), || session::load_identity(&self.kv))
    }

    pub fn load_store(&self) -> IdeaStore {
        IdeaStore::load(&self.kv)
    }

    pub fn save_store(&self, store: &IdeaStore) -> Result<()> {
        store.save(&self.kv)
    }
}

fn resolve_identity_with(
    env_get: impl Fn(&str) -> Option<String>,
    stored: impl FnOnce() -> Identity,
) -> Identity {
    if let Some(identity) = env_get(USER_ENV).and_then(|name| Identity::sign_in(&name).ok()) {
        return identity;
    }
    stored()
}
