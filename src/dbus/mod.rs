//! zbus transport adapter.
//!
//! Serves the two MPRIS interfaces on the session bus and bridges them to
//! the core: inbound calls lock the [`Server`] and run through its dispatch
//! entry points; outbound notifications travel over a channel to a
//! background task that emits `PropertiesChanged` and `Seeked` signals, so
//! the synchronous core never awaits the bus.

/// Signal emission task and the channel-backed event sink.
mod emitter;
/// `org.mpris.MediaPlayer2.Player` interface implementation.
mod player;
/// `org.mpris.MediaPlayer2` (root) interface implementation.
mod root;

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use zbus::Connection;

use crate::error::Result;
use crate::server::Server;

use emitter::ChannelSink;
use player::PlayerInterface;
use root::RootInterface;

/// Well-known bus name prefix every hosted player registers under.
pub const BUS_NAME_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Fixed object path both interfaces are served at.
pub const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

/// A [`Server`] being served on the session bus.
///
/// Owns the bus connection and the shared lock that serializes inbound
/// remote calls against host-side mutation.
#[derive(Clone)]
pub struct MprisService {
    server: Arc<Mutex<Server>>,
    connection: Connection,
}

impl MprisService {
    /// Connect to the session bus, serve `server` at the MPRIS object path,
    /// and request `org.mpris.MediaPlayer2.<player_name>`.
    ///
    /// The name is requested last so controllers never see it resolve to an
    /// object-less connection.
    ///
    /// # Errors
    /// Returns [`crate::Error::Connection`] if the session bus is
    /// unreachable or the name is taken.
    pub async fn start(server: Server, player_name: &str) -> Result<Self> {
        let connection = zbus::connection::Builder::session()?.build().await?;
        let service = Self::attach(server, connection).await?;
        service
            .connection
            .request_name(format!("{BUS_NAME_PREFIX}{player_name}"))
            .await?;
        Ok(service)
    }

    /// Serve `server` on an existing connection.
    ///
    /// Attaches the signal-emission sink to the server (replacing any sink
    /// installed before), registers both MPRIS interfaces at the object
    /// path, and spawns the emission task. [`start`](Self::start) is this
    /// plus session-bus setup and the well-known name request; call this
    /// directly when the host already owns a connection, for instance a
    /// peer-to-peer one.
    ///
    /// # Errors
    /// Returns [`crate::Error::Connection`] if interface registration
    /// fails.
    pub async fn attach(mut server: Server, connection: Connection) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        server.set_event_sink(Box::new(ChannelSink::new(tx)));

        let server = Arc::new(Mutex::new(server));

        let object_server = connection.object_server();
        object_server
            .at(OBJECT_PATH, RootInterface::new(Arc::clone(&server)))
            .await?;
        object_server
            .at(OBJECT_PATH, PlayerInterface::new(Arc::clone(&server)))
            .await?;

        emitter::spawn(connection.clone(), Arc::clone(&server), rx);

        Ok(Self { server, connection })
    }

    /// Run `f` with exclusive access to the server.
    ///
    /// This is how the host mutates state while serving: position ticks,
    /// metadata updates on track change, late handler registration.
    pub async fn update<R>(&self, f: impl FnOnce(&mut Server) -> R) -> R {
        let mut server = self.server.lock().await;
        f(&mut server)
    }

    /// The shared server handle.
    pub fn server(&self) -> Arc<Mutex<Server>> {
        Arc::clone(&self.server)
    }

    /// The underlying bus connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl std::fmt::Debug for MprisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MprisService").finish_non_exhaustive()
    }
}
