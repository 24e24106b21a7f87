/// Register generated providers in the global registry at start-up.
///
/// Emitted by the generator next to each provider:
///
/// ```rust,ignore
/// mockup_registry::mockup_provider!(User => UserMockupProvider);
/// mockup_registry::mockup_provider!(Order => OrderMockupProvider, Item => ItemMockupProvider);
/// ```
///
/// The provider must implement `MockupDataProvider<Type>` and `Default`, and
/// must be named `<Type>MockupProvider` in `Type`'s module to be found.
#[macro_export]
macro_rules! mockup_provider {
    ($($data:ty => $provider:ty),+ $(,)?) => {
        $(
            const _: () = {
                #[cfg(not(target_arch = "wasm32"))]
                #[$crate::__reexports::ctor::ctor(unsafe, anonymous, crate_path = $crate::__reexports::ctor)]
                fn __register_mockup_provider() {
                    $crate::ProviderRegistry::global().register::<$data, $provider>();
                }
            };
        )+
    };
}
