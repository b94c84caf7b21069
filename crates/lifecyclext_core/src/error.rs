use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

use crate::lifecycle::StateId;

/// Convenient result alias for lifecyclext_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Maps one to one onto tracing levels (see `logging`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Where an error came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Lifecycle,
    Observer,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    UnknownState,
    ObserverFailed,
    Other,
}

/// Optional structured payload for rich context without forcing allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context (usually no heap alloc if using &str).
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// The transition that was being dispatched when the error happened.
    LifecycleTransition {
        from_state: StateId,
        to_state: StateId,
    },
}

/// The one error type that crosses module boundaries in lifecyclext_core.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    #[inline]
    pub fn warn() -> ErrB {
        ErrB::new(Severity::Warn)
    }
    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }

    /// An observer callback failed while `from_state -> to_state` was being dispatched.
    pub fn observer_failed(
        from_state: StateId,
        to_state: StateId,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        CoreError::error()
            .domain(Domain::Observer)
            .kind(ErrorKind::ObserverFailed)
            .msg(reason)
            .payload(Payload::LifecycleTransition {
                from_state,
                to_state,
            })
            .build()
    }

    /// Input that names no known lifecycle state.
    pub fn unknown_state(input: &str) -> Self {
        CoreError::warn()
            .domain(Domain::Lifecycle)
            .kind(ErrorKind::UnknownState)
            .msg("unknown lifecycle state")
            .payload(Payload::Context {
                key: "state",
                value: Cow::Owned(input.to_string()),
            })
            .build()
    }

    /// A configuration value that could not be used.
    pub fn invalid_config(key: &'static str, value: &str) -> Self {
        CoreError::error()
            .domain(Domain::Config)
            .kind(ErrorKind::InvalidArgument)
            .msgf(format_args!("invalid value for {key}"))
            .payload(Payload::Context {
                key,
                value: Cow::Owned(value.to_string()),
            })
            .build()
    }

    /// Attach transition context unless the error already carries a payload.
    pub fn with_transition(mut self, from_state: StateId, to_state: StateId) -> Self {
        if self.payload == Payload::None {
            self.payload = Payload::LifecycleTransition {
                from_state,
                to_state,
            };
        }
        self
    }
}

/// Fluent builder that behaves like iterator chains (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    /// Set/override the domain (defaults to Domain::Other).
    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    /// Set/override the kind (defaults to ErrorKind::Other).
    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Formatting-friendly message setter. Allocates once.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Only one payload: this replaces any previous payload (default is None).
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_severity_and_message() {
        let e = CoreError::warn().msg("observer list poisoned").build();
        assert_eq!(e.to_string(), "Warn: observer list poisoned");
    }

    #[test]
    fn with_transition_keeps_existing_payload() {
        let e = CoreError::unknown_state("paused").with_transition(1, 2);
        assert_eq!(
            e.payload,
            Payload::Context {
                key: "state",
                value: Cow::Borrowed("paused")
            }
        );

        let e = CoreError::error().build().with_transition(1, 2);
        assert_eq!(
            e.payload,
            Payload::LifecycleTransition {
                from_state: 1,
                to_state: 2
            }
        );
    }

    #[test]
    fn observer_failed_carries_the_transition() {
        let e = CoreError::observer_failed(2, 3, "listener gone");
        assert_eq!(e.domain, Domain::Observer);
        assert_eq!(e.kind, ErrorKind::ObserverFailed);
        assert_eq!(e.severity, Severity::Error);
        assert_eq!(
            e.payload,
            Payload::LifecycleTransition {
                from_state: 2,
                to_state: 3
            }
        );
    }

    #[test]
    fn invalid_config_names_the_key() {
        let e = CoreError::invalid_config("observers", "many");
        assert_eq!(e.domain, Domain::Config);
        assert_eq!(e.kind, ErrorKind::InvalidArgument);
        assert_eq!(e.message, "invalid value for observers");
    }
}
