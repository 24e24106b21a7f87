//! Provider contract implemented by generated code.

use rand::seq::IndexedRandom;

/// Suffix appended to a data type's name to form its provider's name.
///
/// `crate::models::User` is served by `crate::models::UserMockupProvider`.
/// Changing this value breaks every previously generated provider.
pub const MOCKUP_PROVIDER_SUFFIX: &str = "MockupProvider";

/// Read access to a fixed, pre-generated collection of `T` instances.
///
/// # Purpose
/// Generated providers own their collection exclusively; it is expected to be
/// non-empty and never changes for the lifetime of the provider instance.
///
/// Only [`list`](MockupDataProvider::list) must be implemented. The
/// `first` and `random` accessors derive from it and return `None` only when
/// a provider breaks the non-empty invariant.
pub trait MockupDataProvider<T>: Send + Sync {
    /// Full collection in generation order.
    fn list(&self) -> &[T];

    /// Deterministic first element.
    fn first(&self) -> Option<&T> {
        self.list().first()
    }

    /// Element chosen uniformly at random on every call.
    fn random(&self) -> Option<&T> {
        self.list().choose(&mut rand::rng())
    }
}
