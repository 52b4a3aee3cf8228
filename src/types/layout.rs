use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";
pub const MCP_SERVER_DIR: &str = "mcp-server-ts";

/// Where the plugin and the MCP server live relative to the project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.root
    }

    pub fn plugin_manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn mcp_dir(&self) -> PathBuf {
        self.root.join(MCP_SERVER_DIR)
    }

    pub fn mcp_manifest(&self) -> PathBuf {
        self.mcp_dir().join(MANIFEST_FILE)
    }

    /// Cargo output of the plugin crate.
    pub fn target_dir(&self) -> PathBuf {
        self.root.join("target")
    }

    /// Generated JavaScript bindings of the plugin.
    pub fn dist_js_dir(&self) -> PathBuf {
        self.root.join("dist-js")
    }

    pub fn mcp_build_dir(&self) -> PathBuf {
        self.mcp_dir().join("build")
    }

    /// Renders `path` relative to the root, falling back to the full path.
    pub fn display_relative(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Ok(relative) => relative.display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }
}
