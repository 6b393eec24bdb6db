use std::sync::Arc;

use tokio::sync::Mutex;
use zbus::interface;

use crate::server::Server;

/// `org.mpris.MediaPlayer2`: application-level surface.
pub(super) struct RootInterface {
    server: Arc<Mutex<Server>>,
}

impl RootInterface {
    pub(super) fn new(server: Arc<Mutex<Server>>) -> Self {
        Self { server }
    }
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootInterface {
    async fn raise(&self) {
        self.server.lock().await.raise();
    }

    async fn quit(&self) {
        self.server.lock().await.quit();
    }

    #[zbus(property)]
    async fn can_quit(&self) -> bool {
        self.server.lock().await.can_quit()
    }

    #[zbus(property)]
    async fn can_raise(&self) -> bool {
        self.server.lock().await.can_raise()
    }

    #[zbus(property)]
    async fn can_set_fullscreen(&self) -> bool {
        self.server.lock().await.can_set_fullscreen()
    }

    // Emission on Set is suppressed so the emission task stays the single
    // source of change notifications for writable properties.
    #[zbus(property(emits_changed_signal = "false"))]
    async fn fullscreen(&self) -> bool {
        self.server.lock().await.player().state().fullscreen()
    }

    #[zbus(property)]
    async fn set_fullscreen(&self, value: bool) -> zbus::Result<()> {
        self.server
            .lock()
            .await
            .set_fullscreen_remote(value)
            .map_err(|e| zbus::fdo::Error::from(e).into())
    }

    #[zbus(property)]
    async fn has_track_list(&self) -> bool {
        self.server.lock().await.player().state().has_track_list()
    }

    #[zbus(property)]
    async fn identity(&self) -> String {
        self.server.lock().await.player().state().identity().to_owned()
    }

    #[zbus(property)]
    async fn desktop_entry(&self) -> String {
        self.server
            .lock()
            .await
            .player()
            .state()
            .desktop_entry()
            .to_owned()
    }

    #[zbus(property)]
    async fn supported_uri_schemes(&self) -> Vec<String> {
        self.server
            .lock()
            .await
            .player()
            .state()
            .supported_uri_schemes()
            .to_vec()
    }

    #[zbus(property)]
    async fn supported_mime_types(&self) -> Vec<String> {
        self.server
            .lock()
            .await
            .player()
            .state()
            .supported_mime_types()
            .to_vec()
    }
}
