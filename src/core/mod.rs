// src/core/mod.rs

//! The JSON document core: value model, path grammar, navigation and the container.

pub mod codec;
pub mod container;
pub mod driver;
pub mod errors;
pub mod navigator;
pub mod path;
pub mod type_tag;
pub mod value;

pub use container::JsonContainer;
pub use driver::{ColumnValue, DriverValue};
pub use errors::SpinelJsonError;
pub use path::{Path, Segment};
pub use type_tag::TypeTag;
pub use value::{Map, Value};
