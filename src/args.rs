use std::{fs::File, io, sync::Mutex};

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::dbus::MPRIS_BUS_PREFIX;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Player to query, either as a full D-Bus name or as the part after `org.mpris.MediaPlayer2.`
    #[clap(long, short, default_value = "org.mpris.MediaPlayer2.spotifyd")]
    player: String,
    /// File to write the log to. If not specified, logs will be written to stderr.
    #[clap(long, short)]
    log_file: Option<String>,
}

impl Args {
    /// Full D-Bus name of the player to query
    #[must_use]
    pub fn bus_name(&self) -> String {
        if self.player.starts_with(MPRIS_BUS_PREFIX) {
            self.player.clone()
        } else {
            format!("{MPRIS_BUS_PREFIX}{}", self.player)
        }
    }

    /// Build the tracing subscriber using parameters from the command line arguments
    ///
    /// # Errors
    ///
    /// This function will return an error if the log file cannot be created.
    pub fn init_tracing_subscriber(&self) -> Result<()> {
        let builder = tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(EnvFilter::from_default_env());

        match self.log_file.as_ref() {
            None => builder.with_writer(io::stderr).init(),
            Some(f) => builder
                .with_writer(Mutex::new(
                    File::create(f).with_context(|| format!("Failed to create log file {f}"))?,
                ))
                .init(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_player() {
        let args = Args::try_parse_from(["nowbar"]).unwrap();
        assert_eq!(args.bus_name(), "org.mpris.MediaPlayer2.spotifyd");
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn short_player_name() {
        let args = Args::try_parse_from(["nowbar", "-p", "vlc"]).unwrap();
        assert_eq!(args.bus_name(), "org.mpris.MediaPlayer2.vlc");
    }

    #[test]
    fn full_player_name() {
        let args = Args::try_parse_from([
            "nowbar",
            "--player",
            "org.mpris.MediaPlayer2.firefox.instance_1_42",
        ])
        .unwrap();
        assert_eq!(
            args.bus_name(),
            "org.mpris.MediaPlayer2.firefox.instance_1_42"
        );
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Args::try_parse_from(["nowbar", "spotifyd"]).is_err());
    }
}
