// crates/dashboard/src/main.rs
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use helmview_dashboard::client::{self, ClientConfig};
use helmview_dashboard::{Dashboard, Settings};
use helmview_telemetry::{command, SwitchState};

#[derive(Debug, Parser)]
#[command(name = "helmview-dashboard", about = "Headless boat telemetry dashboard")]
struct Args {
    /// Relay WebSocket URL.
    #[arg(long, env = "HELMVIEW_RELAY_URL", default_value = "ws://127.0.0.1:3003/ws")]
    relay_url: String,

    /// Display name announced to the relay.
    #[arg(long, env = "HELMVIEW_USERNAME", default_value = "Helm Dashboard")]
    name: String,

    /// Settings file (defaults to the user config dir).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Flip the persisted silence flag and announce it on connect.
    #[arg(long)]
    toggle_silence: bool,

    /// Send an IO switch command on connect, e.g. `--switch 26=on`.
    #[arg(long, value_name = "PIN=STATE")]
    switch: Option<String>,
}

/// Parse `26=on` / `27=off` into a pin and state.
fn parse_switch(spec: &str) -> anyhow::Result<(u16, SwitchState)> {
    let Some((pin, state)) = spec.split_once('=') else {
        bail!("expected PIN=STATE, got {spec:?}");
    };
    let pin: u16 = pin.parse().with_context(|| format!("bad pin {pin:?}"))?;
    let state = match state {
        "on" => SwitchState::On,
        "off" => SwitchState::Off,
        other => bail!("expected on or off, got {other:?}"),
    };
    Ok((pin, state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,helmview_dashboard=info".into()),
        )
        .init();

    let args = Args::parse();

    let settings_path = match args.settings {
        Some(path) => path,
        None => Settings::default_path()?,
    };
    let settings = Settings::load(settings_path)?;
    let mut dashboard = Dashboard::new(settings);

    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
    if args.toggle_silence {
        let _ = cmd_tx.send(dashboard.toggle_silence());
    }
    if let Some(spec) = &args.switch {
        let (pin, state) = parse_switch(spec)?;
        // The motor controller answers for the "temp" device.
        let _ = cmd_tx.send(command::io_switch("temp", pin, state));
    }

    let config = ClientConfig {
        relay_url: args.relay_url,
        username: args.name,
        ..ClientConfig::default()
    };
    client::run(&mut dashboard, &config, &mut cmd_rx).await
}
