//! Audit records
//!
//! One [`AuditEntry`] per store mutation, carrying the serialized record
//! before and after the change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::describe_changes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    fn label(self) -> &'static str {
        match self {
            AuditAction::Created => "CREATE",
            AuditAction::Updated => "UPDATE",
            AuditAction::Deleted => "DELETE",
        }
    }
}

/// Which part of the document a change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Transaction,
    Budget,
    Profile,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Transaction => "transaction",
            Entity::Budget => "budget",
            Entity::Profile => "profile",
        };
        f.write_str(name)
    }
}

/// A single change to the finance document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub action: AuditAction,
    pub entity: Entity,
    /// Record id, `profile` for the profile
    pub id: String,
    /// Human label for the record, usually its category
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    /// Field-level summary for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn new(action: AuditAction, entity: Entity, id: &str, label: &str) -> Self {
        Self {
            at: Utc::now(),
            action,
            entity,
            id: id.to_string(),
            label: label.to_string(),
            before: None,
            after: None,
            changes: None,
        }
    }

    pub fn created<T: Serialize>(entity: Entity, id: &str, label: &str, record: &T) -> Self {
        Self {
            after: serde_json::to_value(record).ok(),
            ..Self::new(AuditAction::Created, entity, id, label)
        }
    }

    pub fn updated<T: Serialize>(
        entity: Entity,
        id: &str,
        label: &str,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let changes = before
            .as_ref()
            .zip(after.as_ref())
            .and_then(|(b, a)| describe_changes(b, a));

        Self {
            before,
            after,
            changes,
            ..Self::new(AuditAction::Updated, entity, id, label)
        }
    }

    pub fn deleted<T: Serialize>(entity: Entity, id: &str, label: &str, record: &T) -> Self {
        Self {
            before: serde_json::to_value(record).ok(),
            ..Self::new(AuditAction::Deleted, entity, id, label)
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {} {} {}",
            self.at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action.label(),
            self.entity,
            self.id
        )?;
        if !self.label.is_empty() {
            write!(f, " ({})", self.label)?;
        }
        if let Some(changes) = &self.changes {
            write!(f, "\n    {}", changes)?;
        }
        Ok(())
    }
}
