use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use herbal::config::Config;
use herbal::handlers::search::SearchHandler;
use herbal::prompt::QueryMode;
use herbal::{cli, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Diagnostics go to stderr; completion failures are recorded at error level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let cfg = Config::load();

    // Resolve model: CLI overrides config
    let effective_model = args
        .model
        .clone()
        .or_else(|| cfg.get("DEFAULT_MODEL"))
        .unwrap_or_else(|| "llama-3.3-70b-versatile".to_string());

    let mode = QueryMode::from_flags(args.disease);

    if args.interactive {
        return tui::run_tui(mode, &effective_model, args.temperature).await;
    }

    // Effective markdown switch with config default
    let md = if args.no_md {
        false
    } else if args.md {
        true
    } else {
        cfg.get_bool("PRETTIFY_MARKDOWN")
    };

    // stdin handling (pipe support)
    let mut query = args.query.unwrap_or_default();
    if query.is_empty() && !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        query = buf.trim().to_string();
    }

    SearchHandler::run(&query, mode, &effective_model, args.temperature, md).await
}
