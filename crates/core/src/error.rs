use thiserror::Error;

/// Errors raised while validating the identifying parameters of a probe.
///
/// Validation happens eagerly at construction, before any backend is
/// contacted, so these are always reported synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No `name` was supplied (empty mapping or `null` value).
    #[error("you must provide a name to aws_auto_scaling_group")]
    MissingName,

    /// The `name` parameter was present but empty.
    #[error("the name given to aws_auto_scaling_group must not be empty")]
    EmptyName,

    /// A parameter other than `name` was supplied.
    #[error("unrecognized parameter '{0}' for aws_auto_scaling_group (expected: name)")]
    UnrecognizedParameter(String),

    /// A recognized parameter had the wrong type.
    #[error("parameter '{param}' must be a {expected}")]
    InvalidType {
        /// The offending parameter.
        param: String,
        /// Human-readable expected type.
        expected: &'static str,
    },

    /// The parameters were neither a mapping nor a scalar name.
    #[error("parameters must be a mapping or a scalar name, got {0}")]
    NotAMapping(&'static str),
}
