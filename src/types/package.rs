use {
    super::{error::XtaskError, target::PackageSpec},
    crate::utils::{manifest::Manifest, version::next_version, BumpLevel},
    log::info,
    std::path::{Path, PathBuf},
};

/// A package selected for publishing, with its loaded manifest.
#[derive(Debug, Clone)]
pub struct PackageInfo {
    pub display_name: &'static str,
    pub path: PathBuf,
    manifest: Manifest,
}

impl PackageInfo {
    /// Loads the manifest; a package whose identity cannot be read is an error.
    pub fn load(spec: &PackageSpec) -> Result<Self, XtaskError> {
        Ok(Self {
            display_name: spec.display_name,
            path: spec.dir.clone(),
            manifest: Manifest::load(&spec.manifest_path)?,
        })
    }

    pub fn load_all(specs: &[PackageSpec]) -> Result<Vec<Self>, XtaskError> {
        specs.iter().map(Self::load).collect()
    }

    pub fn name(&self) -> &str {
        self.manifest.name()
    }

    pub fn version(&self) -> &str {
        self.manifest.version()
    }

    pub fn manifest_path(&self) -> &Path {
        self.manifest.path()
    }

    pub fn next_version(&self, level: BumpLevel) -> Result<String, XtaskError> {
        next_version(level, self.version())
    }

    /// Replaces the version and rewrites the manifest. A dry run only reports.
    pub fn update_version(&mut self, new_version: &str, dry_run: bool) -> Result<(), XtaskError> {
        if dry_run {
            info!(
                "DRY RUN: would update {} version to {new_version}",
                self.manifest_path().display()
            );
            return Ok(());
        }
        self.manifest.set_version(new_version);
        self.manifest.save()?;
        info!(
            "updated {} to version {new_version}",
            self.manifest_path().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::types::{layout::ProjectLayout, target::Target},
        pretty_assertions::assert_eq,
        std::fs,
    };

    fn setup(content: &str) -> (tempfile::TempDir, PackageSpec) {
        let root_dir = tempfile::tempdir().unwrap();
        fs::write(root_dir.path().join("package.json"), content).unwrap();
        let layout = ProjectLayout::new(root_dir.path());
        let spec = Target::Plugin.package_specs(&layout).remove(0);
        (root_dir, spec)
    }

    #[test]
    fn test_bump_minor_rewrites_manifest() {
        let (root_dir, spec) = setup(r#"{"name":"pkg","version":"1.2.3"}"#);
        let mut package = PackageInfo::load(&spec).unwrap();

        let new_version = package.next_version(BumpLevel::Minor).unwrap();
        assert_eq!(new_version, "1.3.0");
        package.update_version(&new_version, false).unwrap();
        assert_eq!(package.version(), "1.3.0");

        let written = fs::read_to_string(root_dir.path().join("package.json")).unwrap();
        assert_eq!(written, "{\n  \"name\": \"pkg\",\n  \"version\": \"1.3.0\"\n}\n");
    }

    #[test]
    fn test_dry_run_leaves_manifest_untouched() {
        let original = r#"{"name":"pkg","version":"1.2.3"}"#;
        let (root_dir, spec) = setup(original);
        let mut package = PackageInfo::load(&spec).unwrap();

        package.update_version("2.0.0", true).unwrap();

        assert_eq!(package.version(), "1.2.3");
        assert_eq!(
            fs::read_to_string(root_dir.path().join("package.json")).unwrap(),
            original
        );
    }

    #[test]
    fn test_missing_manifest_fails() {
        let root_dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(root_dir.path());
        let err = PackageInfo::load_all(&Target::All.package_specs(&layout)).unwrap_err();
        assert!(matches!(err, XtaskError::ManifestInvalid { .. }));
    }

    #[test]
    fn test_load_all_keeps_order() {
        let root_dir = tempfile::tempdir().unwrap();
        fs::write(
            root_dir.path().join("package.json"),
            r#"{"name":"tauri-plugin-mcp","version":"0.4.0"}"#,
        )
        .unwrap();
        fs::create_dir_all(root_dir.path().join("mcp-server-ts")).unwrap();
        fs::write(
            root_dir.path().join("mcp-server-ts/package.json"),
            r#"{"name":"tauri-mcp-server","version":"0.2.1"}"#,
        )
        .unwrap();

        let layout = ProjectLayout::new(root_dir.path());
        let packages = PackageInfo::load_all(&Target::All.package_specs(&layout)).unwrap();
        let names: Vec<_> = packages.iter().map(PackageInfo::name).collect();
        assert_eq!(names, vec!["tauri-plugin-mcp", "tauri-mcp-server"]);
    }
}
