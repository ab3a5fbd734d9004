//! In-memory session table.
//!
//! Sessions are created on first state report and never evicted; a session
//! that stops polling simply sits here until the process exits.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::core::{Command, Session, SessionSummary};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `session_id`, creating it when absent. `compile`
    /// runs only on creation, so an existing session keeps its sequence.
    /// The flag is `true` when the session was created by this call.
    pub fn find_or_create<F>(&mut self, session_id: &str, page_type: &str, compile: F) -> (&mut Session, bool)
    where
        F: FnOnce(&str) -> Vec<Command>,
    {
        match self.sessions.entry(session_id.to_string()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => {
                let commands = compile(page_type);
                (entry.insert(Session::new(session_id, page_type, commands)), true)
            }
        }
    }

    pub fn get(&self, session_id: &str) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn get_mut(&mut self, session_id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Summaries ordered by creation time.
    pub fn summaries(&self) -> Vec<SessionSummary> {
        let mut sessions: Vec<&Session> = self.sessions.values().collect();
        sessions.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        sessions.into_iter().map(Session::summary).collect()
    }
}
