use {
    crate::types::error::XtaskError,
    log::{debug, error},
    std::{
        ffi::OsStr,
        fmt,
        io::ErrorKind,
        path::{Path, PathBuf},
        process::{Command, Stdio},
    },
};

/// How a child's output reaches the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Output goes straight to the console while the child runs.
    Stream,
    /// Output is kept and only shown if the child fails.
    Capture,
}

/// A program, its arguments and the directory it runs in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Everything the orchestrators need from the operating system's processes.
pub trait Runner {
    /// Whether `program` can be found on the search path.
    fn is_available(&self, program: &str) -> bool;

    /// Runs the invocation to completion. A non-zero exit is an error.
    fn run(&self, invocation: &Invocation, mode: OutputMode) -> Result<CommandOutput, XtaskError>;
}

/// Spawns real processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        find_in_path(program).is_some()
    }

    fn run(&self, invocation: &Invocation, mode: OutputMode) -> Result<CommandOutput, XtaskError> {
        debug!("running `{invocation}` in {}", invocation.cwd.display());

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit());

        let not_found = |e: std::io::Error| {
            if e.kind() == ErrorKind::NotFound {
                XtaskError::CommandNotFound {
                    program: invocation.program.clone(),
                }
            } else {
                XtaskError::CommandFailed {
                    command: invocation.to_string(),
                    code: None,
                    stdout: String::new(),
                    stderr: e.to_string(),
                }
            }
        };

        match mode {
            OutputMode::Stream => {
                let status = command
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(not_found)?;
                if !status.success() {
                    return Err(XtaskError::CommandFailed {
                        command: invocation.to_string(),
                        code: status.code(),
                        stdout: String::new(),
                        stderr: String::new(),
                    });
                }
                Ok(CommandOutput::default())
            }
            OutputMode::Capture => {
                let output = command.output().map_err(not_found)?;
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                if !output.status.success() {
                    debug!("command failed: {invocation}");
                    if !stdout.trim().is_empty() {
                        debug!("stdout:\n{}", stdout.trim_end());
                    }
                    return Err(XtaskError::CommandFailed {
                        command: invocation.to_string(),
                        code: output.status.code(),
                        stdout,
                        stderr,
                    });
                }
                Ok(CommandOutput { stdout, stderr })
            }
        }
    }
}

/// Looks `program` up in the directories of `PATH`.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_in_dirs(program, &path)
}

fn find_in_dirs(program: &str, path: &OsStr) -> Option<PathBuf> {
    if program.trim().is_empty() {
        return None;
    }
    for dir in std::env::split_paths(path) {
        let candidate = dir.join(program);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            for ext in ["exe", "cmd"] {
                let candidate = dir.join(format!("{program}.{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// First of `candidates` present on the search path, in priority order.
pub fn first_available<'a>(runner: &dyn Runner, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| runner.is_available(candidate))
}

/// A tool requirement: any one of the alternatives satisfies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement(pub Vec<&'static str>);

impl Requirement {
    pub fn tool(name: &'static str) -> Self {
        Self(vec![name])
    }

    pub fn any_of(names: &[&'static str]) -> Self {
        Self(names.to_vec())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" or "))
    }
}

/// Fails with every unmet requirement at once, before anything is spawned.
pub fn ensure_tools(runner: &dyn Runner, requirements: &[Requirement]) -> Result<(), XtaskError> {
    let mut missing: Vec<String> = vec![];
    for requirement in requirements {
        if first_available(runner, &requirement.0).is_none() {
            let name = requirement.to_string();
            if !missing.contains(&name) {
                missing.push(name);
            }
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        for tool in &missing {
            error!("  missing tool: {tool}");
        }
        Err(XtaskError::ToolMissing(missing))
    }
}
