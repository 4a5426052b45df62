use anyhow::{Context as _, Result};
use clap::Parser as _;
use zbus::Connection;

use output::{Output as _, PlainText, WaybarCustomModule};

mod args;
mod dbus;
mod output;
mod player;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = args::Args::parse();
    args.init_tracing_subscriber()?;

    let connection = Connection::session()
        .await
        .context("Failed to connect to Session Bus")?;

    let player = args.bus_name();
    let state = player::fetch_playback_state(&connection, &player).await;
    tracing::debug!(
        %player,
        status = %state.status(),
        title = state.title(),
        art_url = state.art_url(),
        "Player state fetched"
    );

    let printed = if cfg!(feature = "plain-text") {
        PlainText::from(&state).print()
    } else {
        WaybarCustomModule::from(&state).print()
    };
    printed.context("Failed to write to stdout")
}
