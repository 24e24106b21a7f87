//! Provider registry keyed by provider identifier.
//!
//! Generated code registers each provider under the name of its own type.
//! Lookups derive the conventional provider name from the requested data type
//! and construct a fresh instance on every call; nothing is cached.

use std::any::{Any, type_name};
use std::fmt;
use std::ops::Deref;
use std::panic;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use mockup_types::MockupDataProvider;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::diagnostics::panic_message;
use crate::{MockupError, ProviderIdentifier};

type ErasedProvider = Box<dyn Any + Send>;

static GLOBAL_REGISTRY: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::new);

/// Zero-argument constructor for a provider serving `T`, erased so that
/// registrations for different data types share one table.
fn construct<T, P>() -> ErasedProvider
where
    T: 'static,
    P: MockupDataProvider<T> + Default + 'static,
{
    let provider: Box<dyn MockupDataProvider<T>> = Box::new(P::default());
    Box::new(provider)
}

/// A single registry entry.
///
/// # Fields
/// - `identifier`: Identifier derived from the provider's own type name.
/// - `data_type`: Name of the data type the provider was registered for.
/// - `constructor`: Zero-argument construction path.
#[derive(Debug, Clone)]
pub struct ProviderRegistration {
    identifier: ProviderIdentifier,
    data_type: &'static str,
    constructor: fn() -> ErasedProvider,
}

impl ProviderRegistration {
    /// Describe provider `P` serving data type `T`.
    pub fn new<T, P>() -> Self
    where
        T: 'static,
        P: MockupDataProvider<T> + Default + 'static,
    {
        Self {
            identifier: ProviderIdentifier::of_provider::<P>(),
            data_type: type_name::<T>(),
            constructor: construct::<T, P>,
        }
    }

    pub fn identifier(&self) -> &ProviderIdentifier {
        &self.identifier
    }

    pub fn data_type(&self) -> &'static str {
        self.data_type
    }

    /// Build a fresh provider instance for `T`.
    ///
    /// # Errors
    /// Returns [`MockupError::ProviderNotConstructible`] when the constructor
    /// panics or the registered provider serves a different data type.
    pub fn instantiate<T: 'static>(&self) -> Result<ProviderHandle<T>, MockupError> {
        let erased = panic::catch_unwind(self.constructor).map_err(|payload| {
            MockupError::not_constructible(
                self.identifier.clone(),
                format!("zero-argument constructor panicked: {}", panic_message(payload.as_ref())),
            )
        })?;
        let provider = erased.downcast::<Box<dyn MockupDataProvider<T>>>().map_err(|_| {
            MockupError::not_constructible(
                self.identifier.clone(),
                format!("provider serves `{}`, not `{}`", self.data_type, type_name::<T>()),
            )
        })?;
        Ok(ProviderHandle {
            identifier: self.identifier.clone(),
            provider: *provider,
        })
    }
}

/// Thread-safe table of provider registrations.
///
/// The global instance is filled at start-up by
/// [`mockup_provider!`](crate::mockup_provider); isolated instances are handy
/// for tests and for embedding hand-written providers.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: RwLock<IndexMap<ProviderIdentifier, ProviderRegistration>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.identifiers())
            .finish()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by the free functions of this crate.
    pub fn global() -> &'static ProviderRegistry {
        &GLOBAL_REGISTRY
    }

    /// Register provider `P` for data type `T` under `P`'s own identifier.
    ///
    /// Replaces any previous registration with the same identifier and
    /// returns the identifier used.
    pub fn register<T, P>(&self) -> ProviderIdentifier
    where
        T: 'static,
        P: MockupDataProvider<T> + Default + 'static,
    {
        self.insert(ProviderRegistration::new::<T, P>())
    }

    /// Store a prepared registration, replacing any entry with the same identifier.
    pub fn insert(&self, registration: ProviderRegistration) -> ProviderIdentifier {
        let identifier = registration.identifier.clone();
        let data_type = registration.data_type;
        if let Some(previous) = self.write_entries().insert(identifier.clone(), registration) {
            debug!(
                identifier = %identifier,
                previous_data_type = previous.data_type,
                data_type,
                "mockup provider registration replaced"
            );
        } else {
            debug!(identifier = %identifier, data_type, "mockup provider registered");
        }
        identifier
    }

    /// Remove a registration. Returns whether one was present.
    pub fn unregister(&self, identifier: &ProviderIdentifier) -> bool {
        self.write_entries().shift_remove(identifier).is_some()
    }

    pub fn contains(&self, identifier: &ProviderIdentifier) -> bool {
        self.read_entries().contains_key(identifier)
    }

    /// Registered identifiers in registration order.
    pub fn identifiers(&self) -> Vec<ProviderIdentifier> {
        self.read_entries().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Registration stored under the provider identifier derived from `T`.
    pub fn registration_for<T: ?Sized>(&self) -> Option<ProviderRegistration> {
        self.read_entries().get(&ProviderIdentifier::for_type::<T>()).cloned()
    }

    /// Locate and construct the provider for `T`.
    ///
    /// # Errors
    /// - [`MockupError::ProviderNotFound`] when nothing is registered under the
    ///   derived identifier.
    /// - [`MockupError::ProviderNotConstructible`] when the registration cannot
    ///   produce a provider for `T`.
    pub fn resolve<T: 'static>(&self) -> Result<ProviderHandle<T>, MockupError> {
        let identifier = ProviderIdentifier::for_type::<T>();
        // Clone the entry out so construction runs without the lock held.
        let registration = self.read_entries().get(&identifier).cloned();
        let Some(registration) = registration else {
            debug!(identifier = %identifier, data_type = type_name::<T>(), "mockup provider lookup missed");
            return Err(MockupError::ProviderNotFound {
                identifier,
                data_type: type_name::<T>(),
            });
        };
        debug!(identifier = %identifier, "mockup provider resolved");
        registration.instantiate::<T>()
    }

    // Registry operations are idempotent, so a poisoned lock is still usable.
    fn read_entries(&self) -> RwLockReadGuard<'_, IndexMap<ProviderIdentifier, ProviderRegistration>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, IndexMap<ProviderIdentifier, ProviderRegistration>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Freshly constructed provider together with the identifier it was found under.
pub struct ProviderHandle<T: 'static> {
    identifier: ProviderIdentifier,
    provider: Box<dyn MockupDataProvider<T>>,
}

impl<T: 'static> fmt::Debug for ProviderHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("identifier", &self.identifier)
            .field("items", &self.provider.list().len())
            .finish()
    }
}

impl<T: 'static> Deref for ProviderHandle<T> {
    type Target = dyn MockupDataProvider<T>;

    fn deref(&self) -> &Self::Target {
        self.provider.as_ref()
    }
}

impl<T: 'static> ProviderHandle<T> {
    pub fn identifier(&self) -> &ProviderIdentifier {
        &self.identifier
    }
}

impl<T: Clone + 'static> ProviderHandle<T> {
    /// Owned copy of the provider's first item.
    pub fn first_item(&self) -> Result<T, MockupError> {
        self.provider.first().cloned().ok_or_else(|| self.empty())
    }

    /// Owned copy of a randomly chosen item.
    pub fn random_item(&self) -> Result<T, MockupError> {
        self.provider.random().cloned().ok_or_else(|| self.empty())
    }

    /// Owned copy of the whole collection.
    pub fn items(&self) -> Result<Vec<T>, MockupError> {
        let items = self.provider.list();
        if items.is_empty() {
            return Err(self.empty());
        }
        Ok(items.to_vec())
    }

    fn empty(&self) -> MockupError {
        MockupError::EmptyProvider {
            identifier: self.identifier.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Color(&'static str);

    #[derive(Default)]
    struct ColorMockupProvider {
        items: Vec<Color>,
    }

    impl ColorMockupProvider {
        fn generated() -> Self {
            Self {
                items: vec![Color("red"), Color("green")],
            }
        }
    }

    struct Shade;

    // Generated providers build their collection in `Default`.
    struct ShadeMockupProvider(ColorMockupProvider);

    impl Default for ShadeMockupProvider {
        fn default() -> Self {
            Self(ColorMockupProvider::generated())
        }
    }

    impl MockupDataProvider<Color> for ShadeMockupProvider {
        fn list(&self) -> &[Color] {
            self.0.list()
        }
    }

    impl MockupDataProvider<Color> for ColorMockupProvider {
        fn list(&self) -> &[Color] {
            &self.items
        }
    }

    struct Broken;

    struct BrokenMockupProvider;

    impl Default for BrokenMockupProvider {
        fn default() -> Self {
            panic!("collection could not be built")
        }
    }

    impl MockupDataProvider<Broken> for BrokenMockupProvider {
        fn list(&self) -> &[Broken] {
            &[]
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Page<T>(T);

    struct PageMockupProvider<T> {
        items: Vec<Page<T>>,
    }

    impl Default for PageMockupProvider<u8> {
        fn default() -> Self {
            Self {
                items: vec![Page(1), Page(2)],
            }
        }
    }

    impl<T: Send + Sync> MockupDataProvider<Page<T>> for PageMockupProvider<T> {
        fn list(&self) -> &[Page<T>] {
            &self.items
        }
    }

    #[test]
    fn register_stores_provider_under_its_own_name() {
        let registry = ProviderRegistry::new();
        let identifier = registry.register::<Color, ColorMockupProvider>();
        assert_eq!(identifier.name(), "ColorMockupProvider");
        assert!(registry.contains(&ProviderIdentifier::for_type::<Color>()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn resolve_constructs_fresh_instances() {
        let registry = ProviderRegistry::new();
        registry.register::<Color, ColorMockupProvider>();
        let handle = registry.resolve::<Color>().expect("provider resolves");
        assert_eq!(handle.identifier().name(), "ColorMockupProvider");
        // `Default` of this provider yields an empty collection.
        assert!(matches!(handle.first_item(), Err(MockupError::EmptyProvider { .. })));
        assert!(matches!(handle.items(), Err(MockupError::EmptyProvider { .. })));
    }

    #[test]
    fn generic_data_type_resolves_generic_provider() {
        let registry = ProviderRegistry::new();
        let identifier = registry.register::<Page<u8>, PageMockupProvider<u8>>();
        assert!(identifier.name().starts_with("PageMockupProvider<"), "name: {}", identifier.name());

        let handle = registry.resolve::<Page<u8>>().expect("generic provider resolves");
        assert_eq!(handle.items().unwrap(), vec![Page(1), Page(2)]);
        assert!(registry.resolve::<Page<u16>>().unwrap_err().is_not_found());
    }

    #[test]
    fn provider_named_against_convention_is_not_found() {
        let registry = ProviderRegistry::new();
        registry.register::<Color, ShadeMockupProvider>();
        let error = registry.resolve::<Color>().expect_err("Shade provider must not serve Color lookups");
        assert!(error.is_not_found());
        assert_eq!(error.identifier().map(ProviderIdentifier::name), Some("ColorMockupProvider"));
    }

    #[test]
    fn provider_serving_another_type_is_not_constructible() {
        let registry = ProviderRegistry::new();
        registry.register::<Color, ShadeMockupProvider>();
        let error = registry.resolve::<Shade>().expect_err("data type mismatch");
        assert!(matches!(error, MockupError::ProviderNotConstructible { .. }), "got {error:?}");
        assert!(error.to_string().contains(crate::REPORT_ISSUE_URL));
    }

    #[test]
    fn panicking_constructor_is_not_constructible() {
        let registry = ProviderRegistry::new();
        registry.register::<Broken, BrokenMockupProvider>();
        let error = registry.resolve::<Broken>().expect_err("constructor panics");
        assert!(error.is_internal());
        assert!(error.to_string().contains("collection could not be built"), "message: {error}");
    }

    #[test]
    fn unregister_removes_entry() {
        let registry = ProviderRegistry::new();
        let identifier = registry.register::<Color, ColorMockupProvider>();
        assert!(registry.unregister(&identifier));
        assert!(!registry.unregister(&identifier));
        assert!(registry.is_empty());
        assert!(registry.resolve::<Color>().unwrap_err().is_not_found());
    }

    #[test]
    fn re_registration_replaces_previous_entry() {
        let registry = ProviderRegistry::new();
        registry.register::<Color, ColorMockupProvider>();
        registry.register::<Color, ColorMockupProvider>();
        assert_eq!(registry.identifiers().len(), 1);
        assert!(registry.registration_for::<Color>().is_some());
    }
}
