//! Shared contract between generated mockup providers and the runtime registry.
//!
//! Generated code implements [`MockupDataProvider`] once per annotated data
//! type; the registry crate only ever talks to providers through this trait.

mod provider;

pub use provider::{MOCKUP_PROVIDER_SUFFIX, MockupDataProvider};
