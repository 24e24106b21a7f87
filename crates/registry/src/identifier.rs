//! Provider identifier derivation.
//!
//! This module centralizes the naming convention that ties a data type to its
//! generated provider: the provider lives in the same module as the data type
//! and is named `<TypeName>MockupProvider`.

use std::any::type_name;
use std::fmt;

use mockup_types::MOCKUP_PROVIDER_SUFFIX;

/// Fully qualified provider name split into namespace and type name.
///
/// # Purpose
/// Serves as the registry key. Data types map to the identifier of the provider
/// that is expected to serve them; providers are stored under the identifier
/// of their own type, so a provider named against the convention is never
/// found.
///
/// # Fields
/// - `namespace`: Module path, e.g. `app::models` (may be empty).
/// - `name`: Type name inside the namespace, including generic arguments.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProviderIdentifier {
    namespace: String,
    name: String,
}

impl ProviderIdentifier {
    /// Identifier of the provider expected to serve `T`.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::for_type_name(type_name::<T>())
    }

    /// Identifier of the provider expected to serve the type named `data_type`.
    ///
    /// `app::models::User` becomes `app::models::UserMockupProvider`, and
    /// `app::Page<u8>` becomes `app::PageMockupProvider<u8>`.
    pub fn for_type_name(data_type: &str) -> Self {
        let (namespace, name) = split_type_path(data_type);
        let (base, generics) = name.split_at(name.find('<').unwrap_or(name.len()));
        Self {
            namespace: namespace.to_string(),
            name: format!("{base}{MOCKUP_PROVIDER_SUFFIX}{generics}"),
        }
    }

    /// Identifier of the provider type `P` itself.
    pub fn of_provider<P: ?Sized>() -> Self {
        let (namespace, name) = split_type_path(type_name::<P>());
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ProviderIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}::{}", self.namespace, self.name)
        }
    }
}

/// Split a type path into its module path and the trailing type name.
///
/// Generic arguments stay attached to the name so that `a::Page<b::Row>`
/// splits into `a` and `Page<b::Row>`.
fn split_type_path(path: &str) -> (&str, &str) {
    let path = path.trim();
    let generics_start = path.find('<').unwrap_or(path.len());
    match path[..generics_start].rfind("::") {
        Some(separator) => (&path[..separator], &path[separator + 2..]),
        None => ("", path),
    }
}
