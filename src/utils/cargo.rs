use {
    super::process::{Invocation, OutputMode, Runner},
    crate::types::error::XtaskError,
    std::path::Path,
};

pub fn build_invocation(root: &Path, release: bool, target: Option<&str>) -> Invocation {
    let mut invocation = Invocation::new("cargo", root).arg("build");
    if release {
        invocation = invocation.arg("--release");
    }
    if let Some(target) = target {
        invocation = invocation.args(["--target", target]);
    }
    invocation
}

/// Compiles the plugin crate.
pub fn build(
    runner: &dyn Runner,
    root: &Path,
    release: bool,
    target: Option<&str>,
    mode: OutputMode,
) -> Result<(), XtaskError> {
    runner.run(&build_invocation(root, release, target), mode)?;
    Ok(())
}
