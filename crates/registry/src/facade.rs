//! Typed accessors over the provider registry.
//!
//! Every accessor resolves and constructs its provider anew, delegates to it and
//! drops it before returning. Each comes in a strict form returning
//! [`MockupError`] and a best-effort `*_or_none` form that reports the failure
//! and returns `None`.

use serde::de::DeserializeOwned;

use crate::diagnostics::report_discarded;
use crate::json::{self, Validate};
use crate::{MockupError, ProviderHandle, ProviderRegistry};

/// Access point bound to a provider registry.
///
/// [`Mockup::global`] is the process-wide facade behind this crate's free
/// functions. The struct only borrows its registry, so copies are free and
/// calls never interfere.
#[derive(Debug, Clone, Copy)]
pub struct Mockup<'r> {
    registry: &'r ProviderRegistry,
}

impl Mockup<'static> {
    pub fn global() -> Self {
        Self::with_registry(ProviderRegistry::global())
    }
}

impl<'r> Mockup<'r> {
    pub fn with_registry(registry: &'r ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ProviderRegistry {
        self.registry
    }

    /// Resolve and construct the provider for `T`.
    pub fn provider<T: 'static>(&self) -> Result<ProviderHandle<T>, MockupError> {
        self.registry.resolve::<T>()
    }

    pub fn provider_or_none<T: 'static>(&self) -> Option<ProviderHandle<T>> {
        self.or_none("provider", self.provider::<T>())
    }

    /// First item of `T`'s provider.
    pub fn get<T: Clone + 'static>(&self) -> Result<T, MockupError> {
        self.provider::<T>()?.first_item()
    }

    pub fn get_or_none<T: Clone + 'static>(&self) -> Option<T> {
        self.or_none("get", self.get::<T>())
    }

    /// Random item of `T`'s provider, drawn anew on every call.
    pub fn get_random<T: Clone + 'static>(&self) -> Result<T, MockupError> {
        self.provider::<T>()?.random_item()
    }

    pub fn get_random_or_none<T: Clone + 'static>(&self) -> Option<T> {
        self.or_none("get_random", self.get_random::<T>())
    }

    /// Whole collection of `T`'s provider, in generation order.
    pub fn get_list<T: Clone + 'static>(&self) -> Result<Vec<T>, MockupError> {
        self.provider::<T>()?.items()
    }

    pub fn get_list_or_none<T: Clone + 'static>(&self) -> Option<Vec<T>> {
        self.or_none("get_list", self.get_list::<T>())
    }

    pub fn from_json<T: DeserializeOwned>(&self, json: &str) -> Result<T, MockupError> {
        json::from_json(json)
    }

    pub fn from_json_or_none<T: DeserializeOwned>(&self, json: &str) -> Option<T> {
        json::from_json_or_none(json)
    }

    pub fn from_json_validated<T: DeserializeOwned + Validate>(&self, json: &str) -> Result<T, MockupError> {
        json::from_json_validated(json)
    }

    pub fn from_json_validated_or_none<T: DeserializeOwned + Validate>(&self, json: &str) -> Option<T> {
        json::from_json_validated_or_none(json)
    }

    fn or_none<V>(&self, operation: &'static str, result: Result<V, MockupError>) -> Option<V> {
        result
            .inspect_err(|failure| report_discarded(operation, failure))
            .ok()
    }
}
