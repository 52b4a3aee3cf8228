use {
    crate::{
        types::{error::XtaskError, layout::ProjectLayout, target::Target},
        utils::{
            cargo, ensure_tools, fs::clean_directory, npm::PackageManager, OutputMode,
            Requirement, Runner, SystemRunner,
        },
    },
    anyhow::{Context, Result},
    clap::Args,
    log::info,
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    #[arg(value_enum)]
    pub target: Target,

    #[arg(short, long, help = "Clean build artifacts before building")]
    pub clean: bool,

    #[arg(
        short,
        long,
        overrides_with = "no_release",
        help = "Build the plugin in release mode (default)"
    )]
    pub release: bool,

    #[arg(long, overrides_with = "release", help = "Build the plugin in debug mode")]
    pub no_release: bool,

    #[arg(
        short = 't',
        long = "target",
        value_name = "TRIPLE",
        help = "Rust target triple (e.g., x86_64-unknown-linux-gnu)"
    )]
    pub rust_target: Option<String>,
}

impl CommandArgs {
    pub fn release_mode(&self) -> bool {
        self.release || !self.no_release
    }
}

pub fn run(args: CommandArgs, layout: &ProjectLayout, verbose: bool) -> Result<()> {
    execute(&args, layout, verbose, &SystemRunner)
}

pub fn required_tools(target: Target) -> Vec<Requirement> {
    let mut requirements = vec![];
    if target.includes_plugin() {
        requirements.push(Requirement::tool("cargo"));
        requirements.push(Requirement::tool("rustc"));
    }
    requirements.push(Requirement::any_of(&PackageManager::CANDIDATES));
    requirements
}

pub fn execute(
    args: &CommandArgs,
    layout: &ProjectLayout,
    verbose: bool,
    runner: &dyn Runner,
) -> Result<()> {
    ensure_tools(runner, &required_tools(args.target)).context("build prerequisites failed")?;
    println!("{}", render_configuration(args, verbose));

    let package_manager = PackageManager::detect(runner).ok_or_else(|| {
        XtaskError::ToolMissing(vec![Requirement::any_of(&PackageManager::CANDIDATES).to_string()])
    })?;
    let mode = if verbose {
        OutputMode::Stream
    } else {
        OutputMode::Capture
    };

    if args.target.includes_plugin() {
        build_plugin(runner, layout, args, package_manager, mode)?;
    }
    if args.target.includes_mcp() {
        build_mcp(runner, layout, args.clean, package_manager, mode)?;
    }

    match args.target {
        Target::Plugin => info!("plugin build successful"),
        Target::Mcp => info!("MCP server build successful"),
        Target::All => info!("all builds successful"),
    }
    Ok(())
}

fn build_plugin(
    runner: &dyn Runner,
    layout: &ProjectLayout,
    args: &CommandArgs,
    package_manager: PackageManager,
    mode: OutputMode,
) -> Result<()> {
    info!("building Tauri plugin (Rust)");

    if args.clean {
        clean_directory(&layout.target_dir())?;
        clean_directory(&layout.dist_js_dir())?;
        info!("plugin artifacts cleaned");
    }

    info!("building Rust plugin...");
    cargo::build(
        runner,
        &layout.root,
        args.release_mode(),
        args.rust_target.as_deref(),
        mode,
    )
    .context("failed to build the Rust plugin")?;

    info!("building JavaScript bindings with {package_manager}...");
    package_manager
        .run_script(runner, &layout.root, "build", mode)
        .context("failed to build the JavaScript bindings")?;

    info!("plugin build complete");
    Ok(())
}

fn build_mcp(
    runner: &dyn Runner,
    layout: &ProjectLayout,
    clean: bool,
    package_manager: PackageManager,
    mode: OutputMode,
) -> Result<()> {
    info!("building MCP server (TypeScript)");

    let mcp_dir = layout.mcp_dir();
    if !mcp_dir.is_dir() {
        return Err(XtaskError::MissingDirectory(mcp_dir).into());
    }

    if clean {
        clean_directory(&layout.mcp_build_dir())?;
        info!("MCP artifacts cleaned");
    }

    info!("compiling TypeScript with {package_manager}...");
    package_manager
        .run_script(runner, &mcp_dir, "build", mode)
        .context("failed to build the MCP server")?;

    info!("MCP server build complete");
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn render_configuration(args: &CommandArgs, verbose: bool) -> String {
    let mut rows = vec![
        ("Targets", args.target.to_string()),
        ("Clean", yes_no(args.clean).to_string()),
        ("Verbose", yes_no(verbose).to_string()),
    ];
    if args.target.includes_plugin() {
        rows.push(("Release Mode", yes_no(args.release_mode()).to_string()));
        if let Some(triple) = &args.rust_target {
            rows.push(("Rust Target", triple.clone()));
        }
    }

    let mut out = String::from("Build Configuration\n");
    for (setting, value) in rows {
        out.push_str(&format!("  {setting:<14}{value}\n"));
    }
    out
}
