pub mod cargo;
pub mod fs;
pub mod git;
pub mod manifest;
pub mod npm;
pub mod onepassword;
pub mod process;
pub mod prompt;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use manifest::Manifest;
pub use process::{ensure_tools, first_available, Invocation, OutputMode, Requirement, Runner, SystemRunner};
pub use prompt::{Prompt, TerminalPrompt};
pub use version::{bump_version, next_version, parse_version, BumpLevel};
