//! Command abstractions.

use std::fmt::Debug;
use std::hash::Hash;

use uuid::Uuid;

/// Trait that all commands implement.
///
/// A domain's commands form a closed set, usually one `enum`. Every variant
/// maps to a [`Command::Kind`], and [`Command::all_kinds`] lists every kind
/// so the kernel can verify at startup that each one has exactly one
/// executing aggregate.
pub trait Command: Clone + Send + Sync + Debug + 'static {
    /// Field-less discriminant used for routing.
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Returns the routing discriminant of this command.
    fn kind(&self) -> Self::Kind;

    /// Returns every kind this command type can take.
    fn all_kinds() -> &'static [Self::Kind];

    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}
