use thiserror::Error;

use crate::ProviderIdentifier;

/// Where unexpected provider construction failures should be reported.
pub const REPORT_ISSUE_URL: &str = "https://example.com/mockup/issues";

/// Errors surfaced by provider lookup and JSON decoding.
#[derive(Debug, Error)]
pub enum MockupError {
    /// No provider is registered under the identifier derived from the data type.
    #[error(
        "mockup provider `{identifier}` for `{data_type}` was not found; make sure the type is annotated, \
         the provider was generated and the project was rebuilt"
    )]
    ProviderNotFound {
        identifier: ProviderIdentifier,
        data_type: &'static str,
    },
    /// A provider is registered but cannot be turned into a usable instance.
    #[error("mockup provider `{identifier}` cannot be constructed: {reason}. This is a bug, please report it at {report_url}")]
    ProviderNotConstructible {
        identifier: ProviderIdentifier,
        reason: String,
        report_url: &'static str,
    },
    /// The provider broke its non-empty invariant.
    #[error("mockup provider `{identifier}` has no items")]
    EmptyProvider { identifier: ProviderIdentifier },
    /// Malformed JSON, or JSON whose shape does not match the target type.
    #[error("failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// Well-formed input that violates the target type's own constraints.
    #[error("decoded value is not a valid `{type_name}`: {reason}")]
    InvalidValue { type_name: &'static str, reason: String },
}

impl MockupError {
    pub(crate) fn not_constructible(identifier: ProviderIdentifier, reason: impl Into<String>) -> Self {
        Self::ProviderNotConstructible {
            identifier,
            reason: reason.into(),
            report_url: REPORT_ISSUE_URL,
        }
    }

    /// Provider identifier involved in a lookup failure, if any.
    pub fn identifier(&self) -> Option<&ProviderIdentifier> {
        match self {
            Self::ProviderNotFound { identifier, .. }
            | Self::ProviderNotConstructible { identifier, .. }
            | Self::EmptyProvider { identifier } => Some(identifier),
            Self::Decode(_) | Self::InvalidValue { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProviderNotFound { .. })
    }

    /// Whether the failure points at a defect rather than a usage error.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::ProviderNotConstructible { .. } | Self::EmptyProvider { .. })
    }
}
