//! Fetching the current player state and normalizing it into a [`PlaybackState`].


use std::{collections::HashMap, fmt, ops::Deref};

use zbus::zvariant::{OwnedValue, Value};

use crate::{
    dbus::{PropertySource, MPRIS_PATH, PLAYER_INTERFACE},
    utils::{extract_str, extract_str_list, unwrap_variant},
};

/// Title shown whenever nothing is playing
pub const NOT_PLAYING: &str = "Not Playing";
/// Placeholder for values a player is expected to report but didn't
pub const UNKNOWN: &str = "?";

/// Current playback status of a MPRIS-compliant player
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    /// Anything else the player reported, kept verbatim
    Unknown(String),
}
impl From<&str> for PlaybackStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_ref() {
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            "stopped" => Self::Stopped,
            _ => Self::Unknown(s.to_owned()),
        }
    }
}
impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playing => f.write_str("Playing"),
            Self::Paused => f.write_str("Paused"),
            Self::Stopped => f.write_str("Stopped"),
            Self::Unknown(s) => f.write_str(s),
        }
    }
}
impl PlaybackStatus {
    /// Whether a track is loaded, be it playing or paused.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }
}

/// Typed view over the `Metadata` dictionary of a player.
#[derive(Debug, Default)]
pub struct TrackMetadata<'a, 'b> {
    entries: HashMap<&'a str, &'a Value<'b>>,
}
impl<'a, 'b> TrackMetadata<'a, 'b> {
    /// Read a metadata dictionary, or return [`None`] if `v` isn't one.
    #[must_use]
    pub fn parse(v: &'a Value<'b>) -> Option<Self> {
        let Value::Dict(dict) = unwrap_variant(v) else {
            return None;
        };
        Some(Self {
            entries: dict
                .iter()
                .filter_map(|(k, v)| Some((extract_str(k)?, v)))
                .collect(),
        })
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    fn string(&self, key: &str) -> String {
        let Some(v) = self.entries.get(key) else {
            return String::new();
        };
        extract_str(v).map_or_else(
            || {
                tracing::warn!(key, value = ?v, "Metadata value is not a string");
                String::new()
            },
            ToOwned::to_owned,
        )
    }
    fn string_list(&self, key: &str) -> Vec<String> {
        let Some(v) = self.entries.get(key) else {
            return Vec::new();
        };
        extract_str_list(v).unwrap_or_else(|| {
            tracing::warn!(key, value = ?v, "Metadata value is not a list of strings");
            Vec::new()
        })
    }
    #[must_use]
    pub fn title(&self) -> String {
        self.string("xesam:title")
    }
    #[must_use]
    pub fn album(&self) -> String {
        self.string("xesam:album")
    }
    #[must_use]
    pub fn art_url(&self) -> String {
        self.string("mpris:artUrl")
    }
    #[must_use]
    pub fn artists(&self) -> Vec<String> {
        self.string_list("xesam:artist")
    }
    #[must_use]
    pub fn album_artists(&self) -> Vec<String> {
        self.string_list("xesam:albumArtist")
    }
}

/// What the player is doing right now, as shown to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    title: String,
    album: String,
    art_url: String,
    status: PlaybackStatus,
    artists: Vec<String>,
    album_artists: Vec<String>,
}
impl PlaybackState {
    /// Build the state from the reported status and track metadata.
    ///
    /// A stopped player always yields [`PlaybackState::not_playing`], whatever metadata it still
    /// advertises. An active player without metadata yields the [`UNKNOWN`] placeholder record.
    #[must_use]
    pub fn new(status: PlaybackStatus, metadata: &TrackMetadata<'_, '_>) -> Self {
        match status {
            PlaybackStatus::Stopped => Self::not_playing(),
            status if metadata.is_empty() => {
                if status.is_active() {
                    tracing::debug!(%status, "Player reports a track but no metadata");
                    Self::unknown_track(status)
                } else {
                    Self::not_playing()
                }
            }
            status => Self {
                title: metadata.title(),
                album: metadata.album(),
                art_url: metadata.art_url(),
                status,
                artists: metadata.artists(),
                album_artists: metadata.album_artists(),
            },
        }
    }

    /// The state used when no player is reachable or nothing is loaded.
    #[must_use]
    pub fn not_playing() -> Self {
        Self {
            title: NOT_PLAYING.to_owned(),
            album: String::new(),
            art_url: String::new(),
            status: PlaybackStatus::Stopped,
            artists: Vec::new(),
            album_artists: Vec::new(),
        }
    }

    fn unknown_track(status: PlaybackStatus) -> Self {
        Self {
            title: UNKNOWN.to_owned(),
            album: UNKNOWN.to_owned(),
            art_url: UNKNOWN.to_owned(),
            status,
            artists: vec![UNKNOWN.to_owned()],
            album_artists: vec![UNKNOWN.to_owned()],
        }
    }

    /// Normalize the result of a `GetAll` call on the MPRIS player interface.
    #[must_use]
    pub fn from_properties(properties: &HashMap<String, OwnedValue>) -> Self {
        let status = properties
            .get("PlaybackStatus")
            .map(Deref::deref)
            .and_then(extract_str)
            .map_or_else(
                || {
                    tracing::debug!("Player did not report a playback status");
                    PlaybackStatus::Unknown(String::new())
                },
                PlaybackStatus::from,
            );
        let metadata = match properties.get("Metadata").map(Deref::deref) {
            None => TrackMetadata::default(),
            Some(v) => TrackMetadata::parse(v).unwrap_or_else(|| {
                tracing::warn!(value = ?v, "Player metadata is not a dictionary");
                TrackMetadata::default()
            }),
        };
        Self::new(status, &metadata)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
    #[must_use]
    pub fn album(&self) -> &str {
        &self.album
    }
    #[must_use]
    pub fn art_url(&self) -> &str {
        &self.art_url
    }
    #[must_use]
    pub const fn status(&self) -> &PlaybackStatus {
        &self.status
    }
    #[must_use]
    pub fn artists(&self) -> &[String] {
        &self.artists
    }
    #[must_use]
    pub fn album_artists(&self) -> &[String] {
        &self.album_artists
    }
}

/// Query `player` for its current state.
///
/// Failing to reach the player is not an error: it is reported as [`PlaybackState::not_playing`].
pub async fn fetch_playback_state(source: &impl PropertySource, player: &str) -> PlaybackState {
    match source.get_all(player, MPRIS_PATH, PLAYER_INTERFACE).await {
        Ok(properties) => PlaybackState::from_properties(&properties),
        Err(e) => {
            tracing::debug!(?e, %player, "Player is unreachable");
            PlaybackState::not_playing()
        }
    }
}
