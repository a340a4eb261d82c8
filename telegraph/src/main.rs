//! Telegraph binary entry point

use std::path::PathBuf;
use clap::Parser;

use shared::Component;
use shared::logging::{init_tracing_with_level, log_startup};
use telegraph::{
    Telegraph, TelegraphConfig,
    core::PollTiming,
    services::{signal_queue, Hardware, RealConnectionManager, ToneDriver, WebSocketDialer},
};

#[derive(Parser)]
#[command(name = "telegraph")]
#[command(about = "Internet telegraph: bridges a telegraph key and sounder to a shared channel")]
struct Args {
    /// Configuration file (defaults to $TELEGRAPH_CONFIG_PATH, then config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Use the virtual key and logging sounder even if GPIO is configured
    #[arg(long)]
    no_gpio: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing_with_level(Some(&args.log_level));

    log_startup(
        Component::KeyPoller,
        &format!("internet-telegraph version {}", env!("CARGO_PKG_VERSION")),
    );

    let mut config = TelegraphConfig::load(&TelegraphConfig::resolve_path(args.config));
    if args.no_gpio {
        config.gpio = false;
    }

    let hardware = Hardware::open(&config);

    // Tone driver owns the sounder pins for the life of the process
    let (signals, signal_rx) = signal_queue();
    let _tone_driver = ToneDriver::new(hardware.sounder, hardware.inverted_sounder).spawn(signal_rx);

    let connection = RealConnectionManager::new(config.channel_url(), WebSocketDialer::new(), signals.clone());
    let telegraph = Telegraph::new(hardware.key, connection, signals, PollTiming::default());

    telegraph.run().await;
    Ok(())
}
