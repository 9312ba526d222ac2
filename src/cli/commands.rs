//! Command handlers.

use crate::cli::{Cli, Commands, RunArgs};
use crate::client::EtlClient;
use crate::config::Config;
use crate::error::{PulseError, Result};
use crate::search::{Phase, SearchController};
use crate::{output, rank, tui};

pub async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let client = EtlClient::new(&config.backend)?;
    let controller = SearchController::new(client);

    match &cli.command {
        Commands::Run(args) => run_once(cli, &controller, args).await,
        Commands::Tui => tui::run_search_tui(controller),
    }
}

/// One-shot search: drive the controller through a full run and print
/// whatever the lifecycle ended with.
async fn run_once(cli: &Cli, controller: &SearchController, args: &RunArgs) -> Result<()> {
    if let Some(term) = &args.term {
        controller.set_term(term.clone());
    }

    let state = controller.snapshot();
    if state.term.trim().is_empty() {
        return Err(PulseError::Config("search term is empty".to_string()));
    }
    tracing::info!(term = %state.term.trim(), "running search");

    controller.run().await;

    let state = controller.snapshot();
    match state.phase {
        Phase::Succeeded => {
            let top = rank::top_n(&state.results, args.top);
            let all = rank::ranked_all(&state.results);
            if cli.json {
                println!("{}", output::render_json(state.search_id.as_deref(), &all)?);
            } else if !cli.quiet {
                print!(
                    "{}",
                    output::render_report(state.search_id.as_deref(), &top, &all)
                );
            }
            Ok(())
        }
        _ => Err(PulseError::SearchFailed(
            state
                .error_message
                .unwrap_or_else(|| "search did not complete".to_string()),
        )),
    }
}
