use {
    super::layout::ProjectLayout,
    clap::ValueEnum,
    std::{fmt, path::PathBuf},
};

pub const PLUGIN_DISPLAY_NAME: &str = "Tauri Plugin";
pub const MCP_DISPLAY_NAME: &str = "MCP Server";

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    #[value(help = "The Tauri plugin (Rust crate and JavaScript bindings)")]
    Plugin,
    #[value(help = "The TypeScript MCP server")]
    Mcp,
    #[value(help = "Plugin first, then the MCP server")]
    All,
}

impl Target {
    pub fn includes_plugin(self) -> bool {
        matches!(self, Self::Plugin | Self::All)
    }

    pub fn includes_mcp(self) -> bool {
        matches!(self, Self::Mcp | Self::All)
    }

    /// Packages selected by this target, plugin always ahead of the MCP server
    /// since the server may depend on the published plugin.
    pub fn package_specs(self, layout: &ProjectLayout) -> Vec<PackageSpec> {
        let mut specs = vec![];
        if self.includes_plugin() {
            specs.push(PackageSpec {
                display_name: PLUGIN_DISPLAY_NAME,
                dir: layout.plugin_dir().to_path_buf(),
                manifest_path: layout.plugin_manifest(),
            });
        }
        if self.includes_mcp() {
            specs.push(PackageSpec {
                display_name: MCP_DISPLAY_NAME,
                dir: layout.mcp_dir(),
                manifest_path: layout.mcp_manifest(),
            });
        }
        specs
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plugin => "plugin",
            Self::Mcp => "mcp",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// Location of a package before its manifest is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub display_name: &'static str,
    pub dir: PathBuf,
    pub manifest_path: PathBuf,
}
