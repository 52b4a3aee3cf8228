//! Build and release tasks for the Tauri MCP project
//!
//! The project ships two packages: the Tauri plugin at the repository root
//! (a Rust crate plus generated JavaScript bindings) and the TypeScript MCP
//! server under `mcp-server-ts/`. Both are published to npm.
//!
//! # Examples
//!
//! ## Bumping a version
//!
//! ```
//! use mcp_xtask::utils::{next_version, BumpLevel};
//!
//! assert_eq!(next_version(BumpLevel::Minor, "1.2.3").unwrap(), "1.3.0");
//! assert_eq!(next_version(BumpLevel::Major, "1.2.3").unwrap(), "2.0.0");
//! ```
//!
//! ## Resolving packages for a target
//!
//! ```no_run
//! use mcp_xtask::types::{PackageInfo, ProjectLayout, Target};
//!
//! let layout = ProjectLayout::new(".");
//! let packages = PackageInfo::load_all(&Target::All.package_specs(&layout)).unwrap();
//! for package in &packages {
//!     println!("{} {}", package.name(), package.version());
//! }
//! ```

pub mod commands;
pub mod types;
pub mod utils;

pub use commands::build;
pub use commands::publish;

pub use semver::Version;

pub type Result<T> = anyhow::Result<T>;
