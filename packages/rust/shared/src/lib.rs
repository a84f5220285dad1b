//! Shared types, error model, and configuration for SideNav.
//!
//! This crate is the foundation depended on by all other SideNav crates.
//! It provides:
//! - [`SidenavError`], the unified error type
//! - Domain types ([`SidebarTree`], [`SidebarItem`], [`DocNode`], [`CategoryNode`],
//!   [`NodePath`], [`Violation`])
//! - Configuration ([`AppConfig`], [`ValidateConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, RegistryConfig, ValidateConfig, config_dir, config_file_path,
    init_config, init_config_in, load_config, load_config_from,
};
pub use error::{Result, SidenavError};
pub use types::{
    CategoryNode, DEFAULT_GROUP, DocNode, NodePath, SidebarGroup, SidebarItem,
    SidebarTree, Violation, ViolationKind,
};
