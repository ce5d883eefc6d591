//! Kernel wiring errors.

use thiserror::Error;

/// Routing table violations detected by the startup self-check.
///
/// These are wiring mistakes, not runtime data errors: a kernel is only
/// handed out once every command kind has exactly one executing aggregate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// No registered aggregate executes this command kind.
    #[error("unhandled command: no aggregate executes {kind}")]
    Unhandled {
        /// Debug rendering of the command kind.
        kind: String,
    },

    /// More than one registered aggregate executes this command kind.
    #[error("ambiguous command: {kind} is executed by {}", .aggregates.join(", "))]
    Ambiguous {
        /// Debug rendering of the command kind.
        kind: String,
        /// Names of every competing aggregate, in registration order.
        aggregates: Vec<&'static str>,
    },

    /// The same aggregate type was registered twice.
    #[error("aggregate {0} registered more than once")]
    DuplicateAggregate(&'static str),
}

#[cfg(test)]
mod tests {
    use super::RoutingError;

    #[test]
    fn test_ambiguous_message_lists_every_aggregate() {
        let err = RoutingError::Ambiguous {
            kind: "Increment".to_owned(),
            aggregates: vec!["counter", "mirror"],
        };

        assert_eq!(
            err.to_string(),
            "ambiguous command: Increment is executed by counter, mirror"
        );
    }

    #[test]
    fn test_unhandled_message_names_kind() {
        let err = RoutingError::Unhandled {
            kind: "Reset".to_owned(),
        };

        assert_eq!(err.to_string(), "unhandled command: no aggregate executes Reset");
    }
}
