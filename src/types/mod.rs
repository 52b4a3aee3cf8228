pub mod error;
pub mod layout;
pub mod package;
pub mod target;

pub use error::{exit_code, XtaskError, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS};
pub use layout::ProjectLayout;
pub use package::PackageInfo;
pub use target::{PackageSpec, Target};
