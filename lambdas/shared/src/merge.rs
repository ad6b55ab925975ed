//! Partial-update merging of a [`TodoPatch`] onto an existing [`TodoItem`]
//!
//! Two policies decide which patch fields count as "change requested":
//!
//! | Policy     | `Some("")` | `Some(false)` | `None` |
//! |------------|------------|---------------|--------|
//! | `Truthy`   | keep       | keep          | keep   |
//! | `Presence` | apply      | apply         | keep   |
//!
//! `Truthy` reproduces the behaviour of the first deployment, where a patch of
//! `{"done": false}` could never reopen a completed todo. `Presence` is the
//! default. Identity fields (`userId`, `createdAt`, `todoId`) are never touched.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::models::{TodoItem, TodoPatch};

/// Rule for deciding whether a patch field overrides the stored value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Apply only non-empty strings and `true`
    Truthy,
    /// Apply every field present in the patch
    #[default]
    Presence,
}

impl MergePolicy {
    /// Produce the merged record; `existing` is left untouched.
    pub fn merge(self, existing: &TodoItem, patch: &TodoPatch) -> TodoItem {
        match self {
            MergePolicy::Truthy => TodoItem {
                name: truthy_str(&patch.name).unwrap_or(&existing.name).to_string(),
                due_date: truthy_str(&patch.due_date).unwrap_or(&existing.due_date).to_string(),
                done: patch.done.unwrap_or(false) || existing.done,
                attachment_url: truthy_str(&patch.attachment_url)
                    .map(str::to_string)
                    .or_else(|| existing.attachment_url.clone()),
                ..existing.clone()
            },
            MergePolicy::Presence => TodoItem {
                name: patch.name.clone().unwrap_or_else(|| existing.name.clone()),
                due_date: patch.due_date.clone().unwrap_or_else(|| existing.due_date.clone()),
                done: patch.done.unwrap_or(existing.done),
                attachment_url: patch
                    .attachment_url
                    .clone()
                    .or_else(|| existing.attachment_url.clone()),
                ..existing.clone()
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MergePolicy::Truthy => "truthy",
            MergePolicy::Presence => "presence",
        }
    }
}

impl FromStr for MergePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truthy" => Ok(MergePolicy::Truthy),
            "presence" => Ok(MergePolicy::Presence),
            other => Err(Error::Config(format!(
                "unknown merge policy {:?}, expected \"truthy\" or \"presence\"",
                other
            ))),
        }
    }
}

fn truthy_str(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
