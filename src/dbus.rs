use std::collections::HashMap;

use anyhow::{Context as _, Result};
use zbus::{proxy, proxy::CacheProperties, zvariant::OwnedValue, Connection};

/// Object path every MPRIS player exposes itself at
pub const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";
/// Interface holding playback status and track metadata
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";
/// Prefix shared by the bus names of all MPRIS players
pub const MPRIS_BUS_PREFIX: &str = "org.mpris.MediaPlayer2.";

#[proxy(
    interface = "org.freedesktop.DBus.Properties",
    default_path = "/org/mpris/MediaPlayer2",
    gen_blocking = false
)]
trait MprisProperties {
    /// GetAll method
    fn get_all(&self, interface_name: &str) -> zbus::Result<HashMap<String, OwnedValue>>;
}

/// Something that can hand out every property of a remote object's interface.
pub trait PropertySource {
    /// Fetch all properties of `interface` on the object at `path` owned by `destination`.
    async fn get_all(
        &self,
        destination: &str,
        path: &str,
        interface: &str,
    ) -> Result<HashMap<String, OwnedValue>>;
}

impl PropertySource for Connection {
    async fn get_all(
        &self,
        destination: &str,
        path: &str,
        interface: &str,
    ) -> Result<HashMap<String, OwnedValue>> {
        let proxy = MprisPropertiesProxy::builder(self)
            .destination(destination)
            .context("Invalid player bus name")?
            .path(path)
            .context("Invalid object path")?
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .context("Failed to create Properties proxy")?;
        proxy
            .get_all(interface)
            .await
            .with_context(|| format!("Failed to get properties of {interface} from {destination}"))
    }
}
