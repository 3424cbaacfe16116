//! Data acquisition: source resolution, the batch loader, and entity lists.

pub mod entities;
pub mod registry;
pub mod source;

pub use entities::{DEFAULT_ENTITY, EntityGroups, MAJOR_CODES};
pub use registry::{Loader, Registry};
pub use source::{DataRoot, Source};
