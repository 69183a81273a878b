//! Who is using the board.
//!
//! Identity is a bare display name with no authentication. It survives
//! restarts through the key-value store; without one the session runs as
//! a guest, which can browse and vote but not comment, edit, or filter by
//! assignment.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{IdeaError, Result};
use crate::store::kv::{CURRENT_USER_KEY, KvStore};

/// Display name used for guest sessions.
pub const GUEST: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Guest,
    User(String),
}

impl Identity {
    /// Build a signed-in identity from user input.
    ///
    /// The name is trimmed and must not be blank. The literal guest name
    /// maps back to [`Identity::Guest`].
    pub fn sign_in(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(IdeaError::EmptyName);
        }
        if name == GUEST {
            return Ok(Self::Guest);
        }
        Ok(Self::User(name.to_string()))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Guest => GUEST,
            Self::User(name) => name,
        }
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Fail with a permission notice unless signed in.
    pub fn require_signed_in(&self, action: &str) -> Result<&str> {
        match self {
            Self::User(name) => Ok(name),
            Self::Guest => Err(IdeaError::PermissionDenied(format!(
                "sign in to {action}"
            ))),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Restore the persisted identity, defaulting to guest on any problem.
pub fn load_identity(kv: &dyn KvStore) -> Identity {
    match kv.get(CURRENT_USER_KEY) {
        Ok(Some(raw)) => Identity::sign_in(&raw).unwrap_or_default(),
        Ok(None) => Identity::Guest,
        Err(err) => {
            warn!(error = %err, "could not read current user; continuing as guest");
            Identity::Guest
        }
    }
}

/// Persist a signed-in identity. Signing in as guest clears it.
pub fn save_identity(kv: &dyn KvStore, identity: &Identity) -> Result<()> {
    match identity {
        Identity::User(name) => {
            kv.set(CURRENT_USER_KEY, name)?;
            debug!(user = %name, "signed in");
        }
        Identity::Guest => sign_out(kv)?,
    }
    Ok(())
}

pub fn sign_out(kv: &dyn KvStore) -> Result<()> {
    kv.remove(CURRENT_USER_KEY)?;
    debug!("signed out");
    Ok(())
}
