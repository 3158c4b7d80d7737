//! Facet vocabulary shared by every module.

pub mod error;
pub mod facet;
pub mod value;

pub use error::TypeError;
pub use facet::{
	AttributeSensorAndConfigKey, ConfigKey, Effector, Facet, FacetKind, HasConfigKey, Parameter,
	Sensor, SensorKind,
};
pub use value::{ConfigValue, FromConfigValue, ValueType};
