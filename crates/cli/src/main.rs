mod cmd;
mod logging;

use clap::{Args, Parser};
use color_eyre::eyre::{bail, Result, WrapErr};
use fmcheck_core::config::ConfigLoader;
use fmcheck_core::files::DocumentWalker;
use fmcheck_core::reconcile::{PolicySet, Reconciler};
use fmcheck_core::template::load_template;
use std::path::PathBuf;
use tracing::{debug, warn};

use cmd::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "fmc",
    version,
    about = "Audit and repair markdown front matter against a template"
)]
struct Cli {
    /// Template file (JSON, or YAML for .yaml/.yml)
    #[arg(long)]
    template: PathBuf,

    /// Directory to scan recursively
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Comma-separated list of files
    #[arg(long, value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Config file (JSON, or TOML for .toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report deviations without changing any file
    #[arg(long)]
    analyze: bool,

    #[command(flatten)]
    policies: PolicyArgs,

    /// Key filled in by --gen-id (overrides config idKey)
    #[arg(long)]
    id_key: Option<String>,

    /// Show the planned edits without writing
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Log level for stderr (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Args)]
struct PolicyArgs {
    /// Enable every fix policy
    #[arg(long, alias = "fullConform")]
    full_conform: bool,

    /// Add template keys that are missing
    #[arg(long, alias = "allProps")]
    all_props: bool,

    /// Reorder keys to match the template
    #[arg(long, alias = "fixOrder")]
    fix_order: bool,

    /// Remove keys not in the template
    #[arg(long, alias = "removeExtraProps")]
    remove_extra_props: bool,

    /// Generate an identifier where it is missing or empty
    #[arg(long, alias = "genID")]
    gen_id: bool,
}

impl From<&PolicyArgs> for PolicySet {
    fn from(args: &PolicyArgs) -> Self {
        PolicySet {
            full_conform: args.full_conform,
            all_props: args.all_props,
            fix_order: args.fix_order,
            remove_extra_props: args.remove_extra_props,
            gen_id: args.gen_id,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = color_eyre::install() {
        eprintln!("Failed to install error handler: {e}");
    }

    let code = match run(cli) {
        Ok(code) => code,
        Err(report) => {
            eprintln!("Error: {report:?}");
            2
        }
    };

    logging::flush();
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).wrap_err("failed to load config")?;

    if let Some(key) = cli.id_key {
        if key.trim().is_empty() {
            bail!("--id-key must not be empty");
        }
        config.id_key = key;
    }

    logging::init(&config.logging, cli.log_level.as_deref())
        .wrap_err("failed to create log file")?;

    if let Some(source) = &config.source {
        debug!(config = %source.display(), "loaded config");
    }

    let schema = load_template(&cli.template)
        .wrap_err_with(|| format!("failed to load template {}", cli.template.display()))?;

    let policies = PolicySet::from(&cli.policies);
    let reconciler = Reconciler::from_config(schema, policies, &config);

    let walker = DocumentWalker::new(config.extensions.clone())
        .with_exclusions(config.excluded_folders.clone());
    let files = walker.discover(cli.dir.as_deref(), &cli.files)?;

    if cli.analyze {
        if !policies.is_empty() || cli.dry_run {
            warn!("fix options are ignored with --analyze");
        }
        return Ok(cmd::analyze::run(&reconciler, &files, cli.format));
    }

    if policies.is_empty() {
        warn!("no fix policy selected, nothing will change (use --analyze to report)");
    }
    Ok(cmd::fix::run(&reconciler, &files, cli.dry_run, cli.format))
}
