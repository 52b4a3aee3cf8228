use {
    super::process::{first_available, Invocation, OutputMode, Runner},
    crate::types::error::XtaskError,
    std::{fmt, path::Path},
};

/// JavaScript package managers able to run the `build` script, fastest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageManager {
    Bun,
    Npm,
}

impl PackageManager {
    pub const CANDIDATES: [&'static str; 2] = ["bun", "npm"];

    pub fn detect(runner: &dyn Runner) -> Option<Self> {
        match first_available(runner, &Self::CANDIDATES)? {
            "bun" => Some(Self::Bun),
            _ => Some(Self::Npm),
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            Self::Bun => "bun",
            Self::Npm => "npm",
        }
    }

    pub fn run_script(
        self,
        runner: &dyn Runner,
        dir: &Path,
        script: &str,
        mode: OutputMode,
    ) -> Result<(), XtaskError> {
        let invocation = Invocation::new(self.program(), dir).args(["run", script]);
        runner.run(&invocation, mode)?;
        Ok(())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// The logged-in registry user, `None` when not logged in or npm is missing.
pub fn whoami(runner: &dyn Runner, dir: &Path) -> Option<String> {
    let invocation = Invocation::new("npm", dir).arg("whoami");
    let output = runner.run(&invocation, OutputMode::Capture).ok()?;
    let user = output.stdout.trim();
    (!user.is_empty()).then(|| user.to_string())
}

pub fn publish_invocation(dir: &Path, otp: Option<&str>, dry_run: bool) -> Invocation {
    let mut invocation = Invocation::new("npm", dir).arg("publish");
    if let Some(otp) = otp {
        invocation = invocation.args(["--otp", otp]);
    }
    if dry_run {
        invocation = invocation.arg("--dry-run");
    }
    invocation
}

pub fn publish(
    runner: &dyn Runner,
    dir: &Path,
    otp: Option<&str>,
    dry_run: bool,
) -> Result<(), XtaskError> {
    runner.run(&publish_invocation(dir, otp, dry_run), OutputMode::Stream)?;
    Ok(())
}
