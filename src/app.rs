//! Application orchestrator.
//! Merges config sources, fills in anything missing from the terminal, initializes
//! logging, runs the consolidation and prints the summary.

use anyhow::{anyhow, bail, Result};
use std::io;
use tracing::{debug, error, warn};

use consolidate::cli::{ask_policy, ask_root, Args};
use consolidate::output as out;
use consolidate::{Config, DuplicatePolicy, DuplicatePrompt, RunStats, StdinPrompt};

use crate::logging::init_tracing;

/// Run the CLI application. `Err` means the run never started.
pub fn run(args: Args) -> Result<RunStats> {
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);

    if args.resolved_root().is_none() {
        if !atty::is(atty::Stream::Stdin) {
            bail!("no ROOT given and stdin is not a terminal to ask for one");
        }
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt_out = io::stderr();
        cfg.root = ask_root(&mut input, &mut prompt_out)?.ok_or_else(|| anyhow!("no root folder given"))?;
        if args.effective_policy().is_none()
            && let Some(policy) = ask_policy(&mut input, &mut prompt_out)?
        {
            cfg.policy = policy;
        }
    }

    // Held until return so the file writer flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!(?args, "Starting consolidate");

    let mut terminal = (cfg.policy == DuplicatePolicy::Interactive).then(StdinPrompt::terminal);
    let prompt = terminal.as_mut().map(|p| p as &mut dyn DuplicatePrompt);

    let stats = consolidate::consolidate(&cfg, prompt).map_err(|e| {
        error!(code = e.code(), error = %e, "Run could not start");
        e
    })?;

    // The run is over at this point; a broken stdout only costs the summary.
    let printed = if args.summary_json {
        out::print_summary_json(&stats)
    } else {
        out::print_summary(&stats)
    };
    if let Err(e) = printed {
        warn!(error = %e, "Failed to print summary");
        out::print_warn(&format!("Failed to print summary: {e}"));
    }
    if cfg.dry_run {
        out::print_info("Dry run: nothing was moved.");
    }
    Ok(stats)
}
