use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use jukebox::engine::JukeboxApp;
use jukebox::engine::core::JukeboxConfig;
use jukebox::engine::platform::PlatformLayer;

#[derive(Parser)]
#[command(name = "jukebox")]
#[command(about = "Plays one of three soundtrack channels at a time")]
struct Cli {
    /// RON config file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run without an audio device
    #[arg(long)]
    silent: bool,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => JukeboxConfig::load(path)?,
        None => JukeboxConfig::default(),
    };
    config.silent |= cli.silent;

    let mut app = JukeboxApp::new(config)?;
    app.run(&PlatformLayer::stdin())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
