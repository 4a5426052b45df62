//! Rendering a [`PlaybackState`] for the terminal or for Waybar.

use serde::Serialize;
use std::io::{self, Write};

use crate::player::{PlaybackState, PlaybackStatus, NOT_PLAYING};

/// Class handed to Waybar. Substituted by the bar's own templating, never by us.
pub const CLASS_PLACEHOLDER: &str = "$class";
/// Tooltip shown while nothing is playing
pub const IDLE_TOOLTIP: &str = "It's quiet...";
const PLAYING_GLYPH: &str = "   \u{f04b}";
const PAUSED_GLYPH: &str = "   \u{f04c}";

/// Something that can be written to stdout as the program's only output.
pub trait Output {
    /// Write the output to the given writer.
    ///
    /// # Errors
    ///
    /// This function will return an error if writing to the given writer fails.
    fn format<T: Write>(&self, f: &mut T) -> io::Result<()>;

    /// Print the output to stdout.
    ///
    /// # Errors
    ///
    /// This function will return an error if writing to stdout fails.
    fn print(&self) -> io::Result<()> {
        self.format(&mut io::stdout().lock())
    }
}

/// The four labelled lines describing a track, without a trailing newline.
fn summary(state: &PlaybackState, artists: &[String]) -> String {
    format!(
        "Title:     {}\nAlbum:     {}\nArtist(s): {}\nPlayback:  {}",
        state.title(),
        state.album(),
        artists.join(", "),
        state.status()
    )
}

/// Human-readable block listing the album artists.
#[derive(Debug, PartialEq, Eq)]
pub struct PlainText(String);

impl From<&PlaybackState> for PlainText {
    fn from(state: &PlaybackState) -> Self {
        Self(summary(state, state.album_artists()))
    }
}

impl Output for PlainText {
    fn format<T: Write>(&self, f: &mut T) -> io::Result<()> {
        f.write_all(self.0.as_bytes())?;
        f.write_all(b"\n")
    }
}

/// A structure that can be serialized to JSON and parsed by Waybar.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct WaybarCustomModule {
    text: String,
    tooltip: String,
    class: String,
}

impl WaybarCustomModule {
    /// Create a new module with the given contents.
    ///
    /// `text` and `tooltip` are rendered as Pango markup by Waybar and get escaped; `class` is
    /// passed through as is.
    pub fn new(text: &str, tooltip: &str, class: &str) -> Self {
        Self {
            text: html_escape::encode_text(text).into_owned(),
            tooltip: html_escape::encode_text(tooltip).into_owned(),
            class: class.to_owned(),
        }
    }
}

impl From<&PlaybackState> for WaybarCustomModule {
    fn from(state: &PlaybackState) -> Self {
        let status = state.status();
        if *status == PlaybackStatus::Stopped {
            return Self::new(NOT_PLAYING, IDLE_TOOLTIP, CLASS_PLACEHOLDER);
        }

        let album_artist = state.album_artists().first().map_or_else(
            || {
                tracing::warn!(?state, "Player reported no album artist");
                ""
            },
            String::as_str,
        );
        let mut text = format!("{} • {album_artist}", state.title());
        match status {
            PlaybackStatus::Playing => text.push_str(PLAYING_GLYPH),
            PlaybackStatus::Paused => text.push_str(PAUSED_GLYPH),
            PlaybackStatus::Stopped | PlaybackStatus::Unknown(_) => {}
        }

        Self::new(&text, &summary(state, state.artists()), CLASS_PLACEHOLDER)
    }
}

impl Output for WaybarCustomModule {
    /// Format the module as JSON and write it to the given writer.
    ///
    /// # Panics
    ///
    /// This function will panic if serializing the module fails (which should never happen).
    fn format<T: Write>(&self, mut f: &mut T) -> io::Result<()> {
        serde_json::to_writer(&mut f, self)?;
        f.write_all(b"\n")?;
        Ok(())
    }
}
