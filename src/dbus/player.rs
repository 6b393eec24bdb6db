use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use zbus::object_server::SignalEmitter;
use zbus::zvariant::{ObjectPath, OwnedValue};
use zbus::{fdo, interface};

use crate::server::Server;

/// `org.mpris.MediaPlayer2.Player`: playback surface.
pub(super) struct PlayerInterface {
    server: Arc<Mutex<Server>>,
}

impl PlayerInterface {
    pub(super) fn new(server: Arc<Mutex<Server>>) -> Self {
        Self { server }
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerInterface {
    async fn next(&self) -> fdo::Result<()> {
        self.server.lock().await.next().map_err(fdo::Error::from)
    }

    async fn previous(&self) -> fdo::Result<()> {
        self.server.lock().await.previous().map_err(fdo::Error::from)
    }

    async fn pause(&self) -> fdo::Result<()> {
        self.server.lock().await.pause().map_err(fdo::Error::from)
    }

    async fn play_pause(&self) -> fdo::Result<()> {
        self.server
            .lock()
            .await
            .play_pause()
            .map_err(fdo::Error::from)
    }

    async fn stop(&self) -> fdo::Result<()> {
        self.server.lock().await.stop().map_err(fdo::Error::from)
    }

    async fn play(&self) -> fdo::Result<()> {
        self.server.lock().await.play().map_err(fdo::Error::from)
    }

    async fn seek(&self, offset: i64) -> fdo::Result<()> {
        self.server
            .lock()
            .await
            .seek(offset)
            .map_err(fdo::Error::from)
    }

    async fn set_position(&self, track_id: ObjectPath<'_>, position: i64) -> fdo::Result<()> {
        self.server
            .lock()
            .await
            .set_position(track_id.as_str(), position)
            .map_err(fdo::Error::from)
    }

    async fn open_uri(&self, uri: String) {
        self.server.lock().await.open_uri(&uri);
    }

    /// Position changed discontinuously; carries the new absolute position
    /// in microseconds.
    #[zbus(signal)]
    pub(super) async fn seeked(emitter: &SignalEmitter<'_>, position: i64) -> zbus::Result<()>;

    #[zbus(property)]
    async fn playback_status(&self) -> String {
        self.server
            .lock()
            .await
            .player()
            .state()
            .playback_status()
            .as_str()
            .to_owned()
    }

    // Writable properties suppress the macro's emission on Set; the change
    // notification comes from the emission task, once, and only for writes
    // that were actually applied.
    #[zbus(property(emits_changed_signal = "false"))]
    async fn loop_status(&self) -> String {
        self.server
            .lock()
            .await
            .player()
            .state()
            .loop_status()
            .as_str()
            .to_owned()
    }

    #[zbus(property)]
    async fn set_loop_status(&self, value: String) -> zbus::Result<()> {
        self.server
            .lock()
            .await
            .set_loop_status_remote(&value)
            .map_err(|e| fdo::Error::from(e).into())
    }

    #[zbus(property(emits_changed_signal = "false"))]
    async fn rate(&self) -> f64 {
        self.server.lock().await.player().state().rate()
    }

    #[zbus(property)]
    async fn set_rate(&self, value: f64) {
        self.server.lock().await.set_rate_remote(value);
    }

    #[zbus(property(emits_changed_signal = "false"))]
    async fn shuffle(&self) -> bool {
        self.server.lock().await.player().state().shuffle()
    }

    #[zbus(property)]
    async fn set_shuffle(&self, value: bool) -> zbus::Result<()> {
        self.server
            .lock()
            .await
            .set_shuffle_remote(value)
            .map_err(|e| fdo::Error::from(e).into())
    }

    #[zbus(property)]
    async fn metadata(&self) -> HashMap<String, OwnedValue> {
        let server = self.server.lock().await;
        let mut map = HashMap::new();

        for (key, value) in server.player().state().metadata() {
            // Entries that cannot be put on the wire (malformed object
            // paths, values that fail to convert) are skipped rather than
            // failing the whole property read.
            let Some(value) = value.to_value() else {
                debug!(key = *key, "dropping metadata entry with invalid object path");
                continue;
            };
            if let Ok(owned) = value.try_to_owned() {
                map.insert((*key).to_owned(), owned);
            }
        }

        map
    }

    #[zbus(property(emits_changed_signal = "false"))]
    async fn volume(&self) -> f64 {
        self.server.lock().await.player().state().volume()
    }

    #[zbus(property)]
    async fn set_volume(&self, value: f64) -> zbus::Result<()> {
        self.server
            .lock()
            .await
            .set_volume_remote(value)
            .map_err(|e| fdo::Error::from(e).into())
    }

    #[zbus(property)]
    async fn position(&self) -> i64 {
        self.server.lock().await.player().state().position()
    }

    #[zbus(property)]
    async fn minimum_rate(&self) -> f64 {
        self.server.lock().await.player().state().minimum_rate()
    }

    #[zbus(property)]
    async fn maximum_rate(&self) -> f64 {
        self.server.lock().await.player().state().maximum_rate()
    }

    #[zbus(property)]
    async fn can_go_next(&self) -> bool {
        self.server.lock().await.can_go_next()
    }

    #[zbus(property)]
    async fn can_go_previous(&self) -> bool {
        self.server.lock().await.can_go_previous()
    }

    #[zbus(property)]
    async fn can_play(&self) -> bool {
        self.server.lock().await.can_play()
    }

    #[zbus(property)]
    async fn can_pause(&self) -> bool {
        self.server.lock().await.can_pause()
    }

    #[zbus(property)]
    async fn can_seek(&self) -> bool {
        self.server.lock().await.can_seek()
    }

    #[zbus(property)]
    async fn can_control(&self) -> bool {
        self.server.lock().await.can_control()
    }
}
