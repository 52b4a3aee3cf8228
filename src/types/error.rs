use {std::path::PathBuf, thiserror::Error};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INTERRUPTED: i32 = 130;

#[derive(Error, Debug)]
pub enum XtaskError {
    #[error("missing required tools: {}", .0.join(", "))]
    ToolMissing(Vec<String>),

    #[error("command not found: {program}")]
    CommandNotFound { program: String },

    #[error("{}", describe_failure(.command, .code, .stdout, .stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("invalid manifest {}: {reason}", .path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("invalid version `{0}`, expected MAJOR.MINOR.PATCH")]
    InvalidVersion(String),

    #[error("not logged in to npm, run `npm login` first")]
    NotLoggedIn,

    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("failed to clean {}: {source}", .path.display())]
    CleanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} cancelled")]
    UserDeclined(&'static str),

    #[error("interrupted by user")]
    Interrupted,
}

impl XtaskError {
    /// Process exit status for an invocation that stopped with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UserDeclined(_) => EXIT_SUCCESS,
            Self::Interrupted => EXIT_INTERRUPTED,
            _ => EXIT_FAILURE,
        }
    }
}

/// Maps the outcome of a command to the process exit status.
///
/// The typed error may sit anywhere in the chain since callers add context.
pub fn exit_code(result: &anyhow::Result<()>) -> i32 {
    let Err(err) = result else {
        return EXIT_SUCCESS;
    };
    err.chain()
        .find_map(|cause| cause.downcast_ref::<XtaskError>())
        .map_or(EXIT_FAILURE, XtaskError::exit_code)
}

fn describe_failure(command: &str, code: &Option<i32>, stdout: &str, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exit code {code}"),
        None => "signal".to_string(),
    };
    // Some tools (tsc among them) report errors on stdout only.
    let output = match stderr.trim() {
        "" => stdout.trim(),
        stderr => stderr,
    };
    if output.is_empty() {
        format!("`{command}` failed with {status}")
    } else {
        format!("`{command}` failed with {status}: {output}")
    }
}
