//! Group Module
//!
//! Named cache namespaces, their loaders, and the registry that tracks them.

mod namespace;
mod registry;

pub use namespace::{Group, GroupBuilder, Loader};
pub use registry::Registry;
