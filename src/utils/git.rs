use {
    super::process::{Invocation, OutputMode, Runner},
    crate::types::error::XtaskError,
    log::warn,
    std::path::Path,
};

/// Whether `git status --porcelain` reports nothing.
///
/// A status check that cannot run is not a reason to stop a release, so it
/// counts as clean after a warning.
pub fn is_working_tree_clean(runner: &dyn Runner, root: &Path) -> bool {
    let status = Invocation::new("git", root).args(["status", "--porcelain"]);
    match runner.run(&status, OutputMode::Capture) {
        Ok(output) => output.stdout.trim().is_empty(),
        Err(e) => {
            warn!("could not check git status: {e}");
            true
        }
    }
}

pub fn tag_name(version: &str) -> String {
    format!("v{version}")
}

/// Creates the annotated tag `v<version>` at HEAD.
pub fn create_tag(runner: &dyn Runner, root: &Path, version: &str) -> Result<String, XtaskError> {
    let tag = tag_name(version);
    let invocation = Invocation::new("git", root).args([
        "tag".to_string(),
        "-a".to_string(),
        tag.clone(),
        "-m".to_string(),
        format!("Release {tag}"),
    ]);
    runner.run(&invocation, OutputMode::Capture)?;
    Ok(tag)
}
