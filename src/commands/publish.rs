use {
    crate::{
        types::{error::XtaskError, layout::ProjectLayout, package::PackageInfo, target::Target},
        utils::{
            ensure_tools, git,
            npm::{self, PackageManager},
            onepassword::{self, OnePasswordItem, DEFAULT_ITEM, DEFAULT_VAULT},
            BumpLevel, OutputMode, Prompt, Requirement, Runner, SystemRunner, TerminalPrompt,
        },
    },
    anyhow::{Context, Result},
    clap::Args,
    log::{info, warn},
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    #[arg(value_enum)]
    pub target: Target,

    #[arg(short, long, value_enum, help = "Version bump type")]
    pub bump: Option<BumpLevel>,

    #[arg(short, long, help = "Report what would happen without writing or uploading")]
    pub dry_run: bool,

    #[arg(short, long, help = "Skip the build step")]
    pub skip_build: bool,

    #[arg(long, env = "XTASK_OP_VAULT", default_value = DEFAULT_VAULT, help = "1Password vault holding the npm OTP")]
    pub op_vault: String,

    #[arg(long, env = "XTASK_OP_ITEM", default_value = DEFAULT_ITEM, help = "1Password item holding the npm OTP")]
    pub op_item: String,
}

impl CommandArgs {
    fn secrets_item(&self) -> OnePasswordItem {
        OnePasswordItem {
            vault: self.op_vault.clone(),
            item: self.op_item.clone(),
        }
    }
}

pub fn run(args: CommandArgs, layout: &ProjectLayout) -> Result<()> {
    execute(&args, layout, &SystemRunner, &TerminalPrompt)
}

pub fn required_tools(args: &CommandArgs) -> Vec<Requirement> {
    let mut requirements = vec![Requirement::tool("npm")];
    if !args.dry_run {
        requirements.push(Requirement::tool("git"));
    }
    requirements
}

pub fn execute(
    args: &CommandArgs,
    layout: &ProjectLayout,
    runner: &dyn Runner,
    prompt: &dyn Prompt,
) -> Result<()> {
    ensure_tools(runner, &required_tools(args)).context("publish prerequisites failed")?;

    let mut packages = PackageInfo::load_all(&args.target.package_specs(layout))?;
    println!("{}", render_summary(&packages, args, layout)?);

    let otp = if args.dry_run {
        None
    } else {
        safety_checks(runner, prompt, layout)?;
        let otp = onepassword::fetch_otp(runner, &args.secrets_item(), &layout.root);
        if otp.is_none() {
            warn!("publishing without OTP, npm may prompt for it");
        }
        otp
    };

    let package_manager = PackageManager::detect(runner).unwrap_or(PackageManager::Npm);
    for package in &mut packages {
        info!("processing {}...", package.display_name);
        if let Some(level) = args.bump {
            bump_package(runner, layout, package, level, args.dry_run)?;
        }
        build_package(runner, package_manager, package, args)?;
        publish_package(runner, package, otp.as_deref(), args.dry_run)?;
    }

    if args.dry_run {
        info!("dry run completed successfully");
    } else {
        info!("all packages published successfully");
        info!("don't forget to push git tags: git push --tags");
    }
    Ok(())
}

/// A dirty tree can be overridden by the operator; a missing npm login cannot.
fn safety_checks(runner: &dyn Runner, prompt: &dyn Prompt, layout: &ProjectLayout) -> Result<()> {
    if !git::is_working_tree_clean(runner, &layout.root) {
        warn!("git working directory is not clean");
        if !prompt.confirm("Continue anyway?")? {
            return Err(XtaskError::UserDeclined("publish").into());
        }
    }

    match npm::whoami(runner, &layout.root) {
        Some(user) => info!("logged in to npm as: {user}"),
        None => return Err(XtaskError::NotLoggedIn.into()),
    }

    if !prompt.confirm("Proceed with publish?")? {
        return Err(XtaskError::UserDeclined("publish").into());
    }
    Ok(())
}

fn bump_package(
    runner: &dyn Runner,
    layout: &ProjectLayout,
    package: &mut PackageInfo,
    level: BumpLevel,
    dry_run: bool,
) -> Result<()> {
    let new_version = package.next_version(level)?;
    package
        .update_version(&new_version, dry_run)
        .with_context(|| format!("failed to update version of {}", package.display_name))?;

    if !dry_run {
        // Both packages can land on the same version, so an existing tag is not fatal.
        match git::create_tag(runner, &layout.root, &new_version) {
            Ok(tag) => info!("created git tag: {tag}"),
            Err(e) => warn!(
                "could not create git tag {}: {e}",
                git::tag_name(&new_version)
            ),
        }
    }
    Ok(())
}

fn build_package(
    runner: &dyn Runner,
    package_manager: PackageManager,
    package: &PackageInfo,
    args: &CommandArgs,
) -> Result<()> {
    if args.skip_build {
        info!("skipping build for {}", package.display_name);
        return Ok(());
    }
    if args.dry_run {
        info!("DRY RUN: would build {}", package.display_name);
        return Ok(());
    }

    info!("building {} with {package_manager}...", package.display_name);
    package_manager
        .run_script(runner, &package.path, "build", OutputMode::Stream)
        .with_context(|| format!("build failed for {}", package.display_name))?;
    info!("successfully built {}", package.display_name);
    Ok(())
}

fn publish_package(
    runner: &dyn Runner,
    package: &PackageInfo,
    otp: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        info!("DRY RUN: {}", npm::publish_invocation(&package.path, otp, dry_run));
    }
    info!("publishing {}...", package.name());
    npm::publish(runner, &package.path, otp, dry_run)
        .with_context(|| format!("failed to publish {}", package.name()))?;

    if dry_run {
        info!("dry run successful for {}", package.name());
    } else {
        info!("successfully published {}@{}", package.name(), package.version());
    }
    Ok(())
}

/// Table of what is about to be published, followed by the active flags.
pub fn render_summary(
    packages: &[PackageInfo],
    args: &CommandArgs,
    layout: &ProjectLayout,
) -> Result<String> {
    let header = ["Package", "Current Version", "New Version", "Path"];
    let mut rows = vec![header.map(String::from)];
    for package in packages {
        let new_version = match args.bump {
            Some(level) => package.next_version(level)?,
            None => "(no change)".to_string(),
        };
        rows.push([
            package.name().to_string(),
            package.version().to_string(),
            new_version,
            layout.display_relative(&package.path),
        ]);
    }

    let mut widths = [0usize; 4];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("Publish Summary\n");
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    let mut flags = vec![];
    if args.dry_run {
        flags.push("DRY RUN".to_string());
    }
    if args.skip_build {
        flags.push("SKIP BUILD".to_string());
    }
    if let Some(level) = args.bump {
        flags.push(format!("BUMP: {level}"));
    }
    if !flags.is_empty() {
        out.push('\n');
        out.push_str(&flags.join(" | "));
        out.push('\n');
    }
    Ok(out)
}
