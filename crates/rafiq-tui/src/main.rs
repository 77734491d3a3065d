mod input;
mod render;
mod runtime;
mod tracing_setup;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use rafiq_core::ai::AssistantClient;
use rafiq_core::config::CoreConfig;
use rafiq_core::store::AppStore;

use crate::runtime::run_app;
use crate::ui::App;

#[derive(Parser)]
#[command(name = "rafiq", about = "Islamic lifestyle companion for the terminal")]
struct Args {
    /// Directory for persisted state and logs.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// API key for the generative endpoint. Falls back to $GEMINI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Start with AI features disabled; no outbound AI request is issued.
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let api_key = args
        .api_key
        .or_else(|| std::env::var("GEMINI_API_KEY").ok());
    let config = CoreConfig::new(args.data_dir.unwrap_or_else(CoreConfig::default_data_dir))
        .with_api_key(api_key.clone())
        .with_offline(args.offline);

    tracing_setup::init_tracing(&config.data_dir);

    // Restore the terminal before the panic message prints.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ui::restore_terminal();
        eprintln!("\n{panic_info}");
        original_hook(panic_info);
    }));

    let store = AppStore::load(&config.data_dir);
    let assistant = Arc::new(AssistantClient::new(
        config.api_key.clone().unwrap_or_default(),
    ));
    assistant.set_offline(config.offline || config.api_key.is_none());

    let (events_tx, events_rx) = mpsc::channel(64);
    let mut app = App::new(store, assistant, api_key, events_tx);

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app, events_rx).await;
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}
