use anyhow::Result;
use clap::{Parser, Subcommand};
use voice_notes::{client, http, Config};

#[derive(Parser)]
#[command(name = "voice-notes", version, about = "Record voice memos, transcribe them, and file formatted meeting notes")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(long, default_value = "config/voice-notes")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive recording loop: capture, transcribe, format, save
    Record,
    /// Run the Whisper transcription server
    Serve,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Record => client::run(&cfg),
        Command::Serve => tokio::runtime::Runtime::new()?.block_on(http::serve(cfg)),
    }
}
