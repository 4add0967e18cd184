//! Quill binary entry point

use anyhow::Result;
use clap::Parser;
use quill::app::QuillApp;
use quill::config::QuillConfig;
use quill::editor::TextBuffer;
use quill::protocol::Workspace;
use quill::session::SessionState;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Terminal writing studio with panel-assisted drafting", long_about = None)]
struct Cli {
    /// Document to open
    file: Option<PathBuf>,

    /// Workspace directory shared with panels (defaults to ~/.quill)
    #[arg(long, env = "QUILL_DIR")]
    dir: Option<PathBuf>,

    /// Model override published for panels at startup
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to a file; stdout belongs to the TUI
    let log_path = std::env::temp_dir().join("quill.log");
    let log_file = std::fs::File::create(&log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config = QuillConfig::load()?;
    let root = cli.dir.clone().unwrap_or_else(Workspace::default_root);
    let workspace = Workspace::new(root)?;
    info!("Workspace: {}", workspace.root().display());

    let filename = cli
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[untitled]".to_string());

    let mut session = SessionState::new(workspace, config.clone(), filename);
    if let Some(model) = &cli.model {
        info!("{}", session.set_model(model));
    }

    // A path that does not exist yet still becomes the save target
    let buffer = TextBuffer::new(cli.file.clone());
    let mut app = QuillApp::new(config, buffer, session);
    if let Some(file) = cli.file {
        if file.exists() {
            app.load_file(file)?;
        }
    }

    app.run().await
}
