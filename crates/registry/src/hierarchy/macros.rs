//! Registration macros for entity types.

/// Declares an entity type in the process-wide [`TypeCatalog`](crate::TypeCatalog).
///
/// This macro generates:
/// - A public `&str` constant naming the type, for use with
///   [`DynamicType::new`](crate::DynamicType::new) and as a parent of other types
/// - A [`TypeReg`](crate::hierarchy::TypeReg) submission picked up by
///   [`TypeCatalog::global`](crate::TypeCatalog::global)
///
/// Facets are named by statics holding an `Arc` (typically a `LazyLock`), so every
/// type that lists the same static shares one declaration.
///
/// # Example
///
/// ```ignore
/// static RUNNING: LazyLock<Arc<Sensor>> =
///     LazyLock::new(|| Arc::new(Sensor::attribute("pump.running", ValueType::Bool)));
/// static CAPACITY: LazyLock<Arc<ConfigKey>> =
///     LazyLock::new(|| Arc::new(ConfigKey::new("pump.capacity", 100_i64)));
///
/// entity_type!(PUMP = "example.Pump", {
///     sensors: [RUNNING],
///     config_keys: [CAPACITY],
/// });
///
/// entity_type!(BIG_PUMP = "example.BigPump", {
///     extends: [PUMP],
///     config_keys: [BIG_CAPACITY],
/// });
/// ```
#[macro_export]
macro_rules! entity_type {
	($ident:ident = $name:literal, {
		$(extends: [$($parent:expr),* $(,)?],)?
		$(effectors: [$($effector:expr),* $(,)?],)?
		$(sensors: [$($sensor:expr),* $(,)?],)?
		$(config_keys: [$($key:expr),* $(,)?],)?
		$(sensor_and_config_keys: [$($pair:expr),* $(,)?],)?
	}) => {
		$crate::paste::paste! {
			#[doc = concat!("Type name of `", $name, "`.")]
			pub const $ident: &str = $name;

			#[allow(non_snake_case)]
			fn [<__declare_ $ident:lower>]() -> ::core::result::Result<$crate::TypeDecl, $crate::TypeError> {
				$crate::TypeDecl::builder($name)
					$($(.extends($parent))*)?
					$($(.effector(::std::sync::Arc::<$crate::Effector>::clone(&$effector)))*)?
					$($(.sensor(::std::sync::Arc::<$crate::Sensor>::clone(&$sensor)))*)?
					$($(.config_key(::std::sync::Arc::<$crate::ConfigKey>::clone(&$key)))*)?
					$($(.sensor_and_config_key(&$pair))*)?
					.build()
			}

			$crate::inventory::submit! {
				$crate::hierarchy::TypeReg::new([<__declare_ $ident:lower>])
			}
		}
	};
}
