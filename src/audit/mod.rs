//! Change history for the finance document
//!
//! The store appends an [`AuditEntry`] to an [`AuditLog`] after every
//! successful mutation. Entries keep the serialized record before and after
//! the change, and updates carry a one-line field summary from
//! [`describe_changes`].

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditAction, AuditEntry, Entity};
pub use logger::AuditLog;
