use {
    anyhow::Result,
    clap::{Args, Parser, Subcommand},
    log::{error, warn},
    mcp_xtask::types::{exit_code, ProjectLayout, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS},
    std::path::PathBuf,
};

#[derive(Parser)]
#[command(name = "xtask", about = "Build and publish the Tauri MCP packages", version)]
struct Xtask {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Build the plugin, the MCP server, or both")]
    Build(mcp_xtask::commands::build::CommandArgs),
    #[command(about = "Publish packages to npm")]
    Publish(mcp_xtask::commands::publish::CommandArgs),
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        env = "XTASK_PROJECT_ROOT",
        default_value = ".",
        help = "Directory holding the plugin's package.json"
    )]
    pub project_root: PathBuf,
}

#[tokio::main]
async fn main() {
    let xtask = Xtask::parse();

    let level = if xtask.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let code = tokio::select! {
        joined = tokio::task::spawn_blocking(move || try_main(xtask)) => match joined {
            Ok(result) => report(&result),
            Err(e) => {
                error!("Error: task failed: {e}");
                EXIT_FAILURE
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("interrupted by user");
            EXIT_INTERRUPTED
        }
    };
    std::process::exit(code);
}

fn report(result: &Result<()>) -> i32 {
    let code = exit_code(result);
    if let Err(err) = result {
        if code == EXIT_SUCCESS {
            warn!("{err}");
        } else {
            error!("Error: {err}");
            for (i, cause) in err.chain().skip(1).enumerate() {
                error!("  {}: {}", i.saturating_add(1), cause);
            }
        }
    }
    code
}

fn try_main(xtask: Xtask) -> Result<()> {
    let layout = ProjectLayout::new(xtask.global.project_root);

    match xtask.command {
        Commands::Build(args) => {
            mcp_xtask::commands::build::run(args, &layout, xtask.global.verbose)?;
        }
        Commands::Publish(args) => {
            mcp_xtask::commands::publish::run(args, &layout)?;
        }
    }

    Ok(())
}
