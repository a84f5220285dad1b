//! Sidebar parsing, validation, and traversal for SideNav.
//!
//! A sidebar moves through one linear lifecycle: raw value
//! ([`loader`]) → [`model::parse`] → [`validate::Validator`] → read-only
//! queries in [`traverse`].

pub mod loader;
pub mod model;
pub mod registry;
pub mod traverse;
pub mod validate;

pub use loader::{SidebarFormat, load_raw, load_sidebar, parse_source};
pub use model::parse;
pub use registry::{DirRegistry, DocRegistry};
pub use traverse::{Neighbors, breadcrumb, flatten, flatten_group, neighbors};
pub use validate::{ValidatedTree, Validator, validate};
