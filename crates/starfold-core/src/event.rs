//! Domain event abstractions.

use std::fmt::Debug;

use uuid::Uuid;

/// Trait that all domain events implement.
///
/// Events are immutable facts produced by `execute` and consumed by
/// `apply`, `project` and `process`.
pub trait DomainEvent: Clone + Send + Sync + Debug + 'static {
    /// Returns the event type name (used for logging).
    fn event_type(&self) -> &'static str;

    /// Correlation ID inherited from the command that caused this event.
    fn correlation_id(&self) -> Uuid;
}
