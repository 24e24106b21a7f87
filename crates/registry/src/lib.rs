//! Runtime access to generated mockup providers.
//!
//! An external generator emits, for every annotated data type `T`, a provider
//! named `<T>MockupProvider` in `T`'s module and registers it with
//! [`mockup_provider!`]. This crate finds that provider by naming convention,
//! constructs it and hands out its canned instances. It also offers strict JSON
//! decode helpers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let first: User = mockup_registry::get::<User>()?;
//! let any: Option<User> = mockup_registry::get_random_or_none::<User>();
//! let all: Vec<User> = mockup_registry::get_list::<User>()?;
//! let decoded: User = mockup_registry::from_json(r#"{"name":"A","age":1}"#)?;
//! ```
//!
//! The free functions operate on [`Mockup::global`]; bind a [`Mockup`] to your
//! own [`ProviderRegistry`] for isolated lookups.

mod diagnostics;
mod error;
mod facade;
mod identifier;
mod json;
mod macros;
mod registry;

pub use error::{MockupError, REPORT_ISSUE_URL};
pub use facade::Mockup;
pub use identifier::ProviderIdentifier;
pub use json::{Validate, from_json, from_json_or_none, from_json_validated, from_json_validated_or_none};
pub use mockup_types::{MOCKUP_PROVIDER_SUFFIX, MockupDataProvider};
pub use mockup_util::init_tracing;
pub use registry::{ProviderHandle, ProviderRegistration, ProviderRegistry};

#[doc(hidden)]
pub mod __reexports {
    pub use ctor;
}

pub fn provider<T: 'static>() -> Result<ProviderHandle<T>, MockupError> {
    Mockup::global().provider::<T>()
}

pub fn provider_or_none<T: 'static>() -> Option<ProviderHandle<T>> {
    Mockup::global().provider_or_none::<T>()
}

pub fn get<T: Clone + 'static>() -> Result<T, MockupError> {
    Mockup::global().get::<T>()
}

pub fn get_or_none<T: Clone + 'static>() -> Option<T> {
    Mockup::global().get_or_none::<T>()
}

pub fn get_random<T: Clone + 'static>() -> Result<T, MockupError> {
    Mockup::global().get_random::<T>()
}

pub fn get_random_or_none<T: Clone + 'static>() -> Option<T> {
    Mockup::global().get_random_or_none::<T>()
}

pub fn get_list<T: Clone + 'static>() -> Result<Vec<T>, MockupError> {
    Mockup::global().get_list::<T>()
}

pub fn get_list_or_none<T: Clone + 'static>() -> Option<Vec<T>> {
    Mockup::global().get_list_or_none::<T>()
}
