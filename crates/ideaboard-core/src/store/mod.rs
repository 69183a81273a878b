//! The idea collection and its persistence.
//!
//! [`IdeaStore`] owns the ideas in creation order. It is loaded from and
//! saved to a [`KvStore`] as one JSON array; a missing or unreadable blob
//! loads as an empty board. Mutations check permissions against the
//! caller's [`Identity`] and leave the collection untouched on refusal.

pub mod kv;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{IdeaError, Result};
use crate::model::normalize::normalize_records;
use crate::model::{Comment, Idea, IdeaDraft};
use crate::session::Identity;
use kv::{IDEAS_KEY, KvStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaStore {
    ideas: Vec<Idea>,
}

impl IdeaStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-normalized ideas.
    #[must_use]
    pub fn from_ideas(ideas: Vec<Idea>) -> Self {
        Self { ideas }
    }

    /// Load the persisted collection. Never fails: absent or malformed data
    /// yields an empty store. Ids generated while normalizing are written
    /// back at once so they stay stable across loads.
    pub fn load(kv: &dyn KvStore) -> Self {
        let raw = match kv.get(IDEAS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no stored ideas; starting empty");
                return Self::new();
            }
            Err(err) => {
                warn!(error = %err, "could not read stored ideas; starting empty");
                return Self::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(values)) => {
                let normalized = normalize_records(&values);
                let store = Self {
                    ideas: normalized.ideas,
                };
                debug!(count = store.len(), "loaded ideas");
                if normalized.assigned_ids > 0 {
                    match store.save(kv) {
                        Ok(()) => debug!(assigned = normalized.assigned_ids, "persisted generated ids"),
                        Err(err) => warn!(error = %err, "could not persist generated ids"),
                    }
                }
                store
            }
            Ok(_) => {
                warn!("stored ideas are not a JSON array; starting empty");
                Self::new()
            }
            Err(err) => {
                warn!(error = %err, "stored ideas are not valid JSON; starting empty");
                Self::new()
            }
        }
    }

    /// Write the whole collection back.
    pub fn save(&self, kv: &dyn KvStore) -> Result<()> {
        let json = serde_json::to_string(&self.ideas)?;
        kv.set(IDEAS_KEY, &json)?;
        debug!(count = self.ideas.len(), "saved ideas");
        Ok(())
    }

    #[must_use]
    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Idea> {
        self.ideas.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == id)
    }

    /// Resolve an exact id or a unique id prefix.
    pub fn resolve_id(&self, raw: &str) -> Result<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IdeaError::IdeaNotFound(String::new()));
        }
        if self.get(raw).is_some() {
            return Ok(raw.to_string());
        }
        let matches: Vec<&Idea> = self.ideas.iter().filter(|i| i.id.starts_with(raw)).collect();
        match matches.as_slice() {
            [one] => Ok(one.id.clone()),
            [] => Err(IdeaError::IdeaNotFound(raw.to_string())),
            many => Err(IdeaError::AmbiguousId {
                prefix: raw.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Create an idea authored by `author`. Returns the stored record.
    pub fn add(&mut self, draft: IdeaDraft, author: &Identity) -> Result<&Idea> {
        let draft = draft.validate()?;
        let assigned_to = draft.assignee_or_sentinel();
        let idea = Idea {
            id: self.fresh_id(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            status: draft.status,
            tags: draft.tags,
            votes: 0,
            author: author.name().to_string(),
            assigned_to,
            due_date: draft.due_date,
            comments: Vec::new(),
        };
        debug!(id = %idea.id, author = %idea.author, "added idea");
        self.ideas.push(idea);
        let last = self.ideas.len() - 1;
        Ok(&self.ideas[last])
    }

    /// Replace the editable fields of an idea the caller authored.
    pub fn update(&mut self, id: &str, draft: IdeaDraft, actor: &Identity) -> Result<&Idea> {
        let draft = draft.validate()?;
        let idea = self.authored_mut(id, actor, "edit")?;
        idea.assigned_to = draft.assignee_or_sentinel();
        idea.title = draft.title;
        idea.description = draft.description;
        idea.category = draft.category;
        idea.status = draft.status;
        idea.tags = draft.tags;
        idea.due_date = draft.due_date;
        debug!(id, "updated idea");
        Ok(idea)
    }

    /// Delete an idea the caller authored.
    pub fn remove(&mut self, id: &str, actor: &Identity) -> Result<Idea> {
        self.authored_mut(id, actor, "delete")?;
        let index = self
            .position(id)
            .ok_or_else(|| IdeaError::IdeaNotFound(id.to_string()))?;
        let removed = self.ideas.remove(index);
        debug!(id, "removed idea");
        Ok(removed)
    }

    /// Add one vote. Anyone may vote, guests included.
    pub fn upvote(&mut self, id: &str) -> Result<u32> {
        let idea = self.get_mut(id)?;
        idea.votes = idea.votes.saturating_add(1);
        Ok(idea.votes)
    }

    /// Append a comment from a signed-in user.
    pub fn add_comment(
        &mut self,
        id: &str,
        text: &str,
        author: &Identity,
        now: DateTime<Utc>,
    ) -> Result<&Comment> {
        let name = author.require_signed_in("comment")?.to_string();
        let text = text.trim();
        if text.is_empty() {
            return Err(IdeaError::Validation("comment must not be blank".into()));
        }
        let idea = self.get_mut(id)?;
        idea.comments.push(Comment {
            text: text.to_string(),
            author: name,
            timestamp: now,
        });
        let last = idea.comments.len() - 1;
        Ok(&idea.comments[last])
    }

    /// Swap in an entirely new collection (import).
    pub fn replace_all(&mut self, ideas: Vec<Idea>) {
        debug!(previous = self.ideas.len(), next = ideas.len(), "replacing all ideas");
        self.ideas = ideas;
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.ideas.iter().position(|i| i.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Idea> {
        self.ideas
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| IdeaError::IdeaNotFound(id.to_string()))
    }

    fn authored_mut(&mut self, id: &str, actor: &Identity, action: &str) -> Result<&mut Idea> {
        actor.require_signed_in(action)?;
        let idea = self.get_mut(id)?;
        if idea.author != actor.name() {
            return Err(IdeaError::PermissionDenied(format!(
                "only {} may {action} '{}'",
                idea.author, idea.title
            )));
        }
        Ok(idea)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Idea::new_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl<'a> IntoIterator for &'a IdeaStore {
    type Item = &'a Idea;
    type IntoIter = std::slice::Iter<'a, Idea>;

    fn into_iter(self) -> Self::IntoIter {
        self.ideas.iter()
    }
}
