use {
    crate::types::error::XtaskError,
    log::debug,
    serde_json::{Map, Value},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

pub const DEFAULT_NAME: &str = "unknown";
pub const DEFAULT_VERSION: &str = "0.0.0";

/// A `package.json` document. Key order is kept so a rewrite only touches
/// the version line.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, XtaskError> {
        let path = path.as_ref();
        let invalid = |reason: String| XtaskError::ManifestInvalid {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let document = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(document)) => document,
            Ok(_) => return Err(invalid("top level is not a JSON object".to_string())),
            Err(e) => return Err(invalid(e.to_string())),
        };

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or(DEFAULT_NAME)
    }

    pub fn version(&self) -> &str {
        self.str_field("version").unwrap_or(DEFAULT_VERSION)
    }

    pub fn set_version(&mut self, version: &str) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Rewrites the whole document with 2-space indentation and a trailing
    /// newline. The new content replaces the file through a rename.
    pub fn save(&self) -> Result<(), XtaskError> {
        let write_failed = |reason: String| XtaskError::ManifestInvalid {
            path: self.path.clone(),
            reason,
        };

        let mut content =
            serde_json::to_string_pretty(&self.document).map_err(|e| write_failed(e.to_string()))?;
        content.push('\n');

        let staging = self.path.with_extension("json.tmp");
        debug!("writing {}", self.path.display());
        fs::write(&staging, content).map_err(|e| write_failed(e.to_string()))?;
        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            write_failed(e.to_string())
        })
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.document.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq};

    fn write_manifest(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("package.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_name_and_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"name": "test-package", "version": "1.2.3", "description": "Test package"}"#,
        );

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.name(), "test-package");
        assert_eq!(manifest.version(), "1.2.3");
        assert_eq!(manifest.path(), path.as_path());
    }

    #[test]
    fn test_defaults_when_fields_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"private": true, "version": 3}"#);

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.name(), DEFAULT_NAME);
        assert_eq!(manifest.version(), DEFAULT_VERSION);
    }

    #[test]
    fn test_missing_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, XtaskError::ManifestInvalid { .. }));
    }

    #[test]
    fn test_malformed_json_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), "{ invalid json }");
        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, XtaskError::ManifestInvalid { .. }));
        assert!(err.to_string().starts_with("invalid manifest "));
    }

    #[test]
    fn test_non_object_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"["name", "version"]"#);
        let err = Manifest::load(&path).unwrap_err();
        assert!(err.to_string().ends_with("top level is not a JSON object"));
    }

    #[test]
    fn test_save_round_trip_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"name":"pkg","version":"1.2.3","scripts":{"build":"tsc"},"author":"Zoë","files":["dist"]}"#,
        );

        let mut manifest = Manifest::load(&path).unwrap();
        manifest.set_version("1.3.0");
        manifest.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"pkg\",\n  \"version\": \"1.3.0\",\n  \"scripts\": {\n    \"build\": \"tsc\"\n  },\n  \"author\": \"Zoë\",\n  \"files\": [\n    \"dist\"\n  ]\n}\n"
        );

        let reloaded = Manifest::load(&path).unwrap();
        assert_eq!(reloaded.version(), "1.3.0");
        assert_eq!(reloaded.name(), "pkg");
        assert!(!dir.path().join("package.json.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"name":"pkg","version":"1.2.3"}"#);
        let mut manifest = Manifest::load(&path).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir_all(path.join("node_modules")).unwrap();

        manifest.set_version("1.2.4");
        let err = manifest.save().unwrap_err();
        assert!(matches!(err, XtaskError::ManifestInvalid { .. }));
        assert!(!dir.path().join("package.json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_set_version_without_save_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let original = r#"{"name":"pkg","version":"1.2.3"}"#;
        let path = write_manifest(dir.path(), original);

        let mut manifest = Manifest::load(&path).unwrap();
        manifest.set_version("2.0.0");
        assert_eq!(manifest.version(), "2.0.0");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
