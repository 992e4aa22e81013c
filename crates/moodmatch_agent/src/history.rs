//! In-memory, per-conversation turn history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Default)]
struct Conversation {
    turns: VecDeque<Turn>,
    /// Value of the append counter at the last write.
    touched: u64,
}

#[derive(Default)]
struct Contexts {
    by_id: HashMap<String, Conversation>,
    appends: u64,
}

/// Keeps the most recent `limit` turns of at most `max_contexts` contexts.
/// Oldest turns are evicted first, and the least recently written context
/// makes room for a new one.
pub struct ConversationHistory {
    limit: usize,
    max_contexts: usize,
    contexts: RwLock<Contexts>,
}

impl ConversationHistory {
    pub fn new(limit: usize, max_contexts: usize) -> Self {
        Self {
            limit: limit.max(1),
            max_contexts: max_contexts.max(1),
            contexts: RwLock::new(Contexts::default()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn max_contexts(&self) -> usize {
        self.max_contexts
    }

    pub async fn append(&self, context_id: &str, role: Role, text: impl Into<String>) {
        let mut contexts = self.contexts.write().await;
        contexts.appends += 1;
        let touched = contexts.appends;

        if !contexts.by_id.contains_key(context_id) && contexts.by_id.len() >= self.max_contexts {
            let stalest = contexts
                .by_id
                .iter()
                .min_by_key(|(_, c)| c.touched)
                .map(|(id, _)| id.clone());
            if let Some(id) = stalest {
                tracing::debug!("Evicting conversation '{}' from history", id);
                contexts.by_id.remove(&id);
            }
        }

        let conversation = contexts.by_id.entry(context_id.to_string()).or_default();
        conversation.touched = touched;
        conversation.turns.push_back(Turn {
            role,
            text: text.into(),
            at: Utc::now(),
        });
        while conversation.turns.len() > self.limit {
            conversation.turns.pop_front();
        }
    }

    /// Turns for `context_id`, oldest first. Empty for unknown contexts.
    pub async fn turns(&self, context_id: &str) -> Vec<Turn> {
        self.contexts
            .read()
            .await
            .by_id
            .get(context_id)
            .map(|c| c.turns.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn clear(&self, context_id: &str) -> bool {
        self.contexts.write().await.by_id.remove(context_id).is_some()
    }

    pub async fn contexts(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.contexts.read().await.by_id.keys().cloned().collect();
        ids.sort();
        ids
    }
}
