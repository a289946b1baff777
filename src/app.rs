//! Application orchestrator.
//! Loads/merges config, initializes logging, installs signal handlers, validates the root,
//! builds the operation context, and dispatches the subcommand.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use context_coder::cli::{Args, Command};
use context_coder::config::{load_config, load_config_from_xml_path, validate_and_normalize, CONFIG_ENV};
use context_coder::output as out;
use context_coder::sandbox::relative_display;
use context_coder::{
    default_config_path, relocate, shutdown, ContextCoderError, ControlFiles,
    OperationContext, RelocationRequest,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location(&args);
        return Ok(());
    }

    // Defaults -> XML file -> CLI flags.
    let mut cfg = match &args.config {
        Some(path) => load_config_from_xml_path(path)?,
        None => load_config()?.unwrap_or_default(),
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; a move already in progress will still complete.");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!("Starting context-coder: {:?}", args);

    let result = (|| -> Result<()> {
        validate_and_normalize(&mut cfg)?;
        let ctx = OperationContext::from_config(&cfg)?;
        match args.command_or_default() {
            Command::Move {
                source,
                destination,
            } => run_move(&ctx, source, destination),
            Command::Check { path } => run_check(&ctx, &path),
        }
    })();

    if let Err(e) = &result {
        report_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using --config (explicit):\n  {}\n", p.display()));
        return;
    }
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default context-coder config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet; built-in defaults are used. Example:\n\n<config>\n  <root>/path/to/project</root>\n  <log_level>normal</log_level>\n  <fallback>any-failure</fallback>\n</config>\n");
            }
        }
        Err(e) => {
            out::print_error(&format!("Could not determine a default config path: {e}"));
        }
    }
}

fn run_move(ctx: &OperationContext, source: String, destination: String) -> Result<()> {
    let outcome = relocate(ctx, &RelocationRequest::new(source, destination))?;
    info!(strategy = ?outcome.strategy, "Move completed");
    out::print_user(&outcome.message());
    Ok(())
}

fn run_check(ctx: &OperationContext, path: &str) -> Result<()> {
    let dir = ctx.resolve(path)?;
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let shown = relative_display(&dir, ctx.root().path());
    out::print_info(&format!("Checking {shown} under {}", ctx.root().path().display()));

    let control = ControlFiles::probe(&dir);
    for name in [&control.ignore, &control.minify].into_iter().flatten() {
        out::print_success(&format!("found {name}"));
    }
    for tip in control.startup_tips() {
        out::print_info(tip);
    }

    if !ctx.vcs().probe_available() {
        out::print_warn("git is not available; moves will use a plain rename.");
    } else if ctx.vcs().probe_tracked(ctx.root().path()) {
        out::print_success("root is inside a git work tree; moves will use git mv.");
    } else {
        out::print_info("root is not a git work tree; moves will use a plain rename.");
    }
    Ok(())
}

/// Emit a structured error event; the error itself is returned to main.
fn report_failure(e: &anyhow::Error) {
    if let Some(ce) = e.downcast_ref::<ContextCoderError>() {
        let code = ce.code();
        let kind = ce.kind();
        match ce {
            ContextCoderError::Filesystem { op, path, .. } => {
                error!(code, kind, op, path = %path.display(), error = %ce, "Operation failed")
            }
            ContextCoderError::InternalConsistency { root, resolved } => {
                error!(code, kind, root = %root.display(), resolved = %resolved.display(), "Sandbox consistency check failed")
            }
            ContextCoderError::Interrupted => {
                error!(code, kind, "Operation aborted by user")
            }
            _ => error!(code, kind, error = %ce, "Operation failed"),
        }
    } else {
        error!(error = ?e, "Operation failed");
    }
}
