//! mpris-host - Host-side MPRIS integration for media players.
//!
//! Lets a media-playing application expose itself on the D-Bus session bus
//! as `org.mpris.MediaPlayer2.<name>`, so desktop controllers (media keys,
//! shell widgets, `playerctl`) can see and drive it. The application
//! registers handlers for the commands it actually supports; capability
//! flags like `CanPlay` and `CanSeek` are derived from what is wired up and
//! recomputed on every read.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mpris_host::{MprisService, PlaybackStatus, Server};
//!
//! # async fn run() -> mpris_host::Result<()> {
//! let mut server = Server::new();
//! server.player_mut().set_identity("A generic player");
//!
//! server
//!     .controls_mut()
//!     .on_stop(|p| p.set_playback_status(PlaybackStatus::Stopped))
//!     .on_loop_status_changed(|_, _| {})
//!     .on_shuffle_changed(|_, _| {})
//!     .on_volume_changed(|_, _| {});
//!
//! let _service = MprisService::start(server, "genericplayer").await?;
//! # Ok(())
//! # }
//! ```

/// Handler registration and derived capability flags.
pub mod controls;

/// zbus transport adapter: interface serving and signal emission.
pub mod dbus;

/// Remote command and property-write entry points.
pub mod dispatch;

/// Error types and result alias.
pub mod error;

/// Change notification and the transport seam.
pub mod notify;

/// The mutable player view handed to handlers and the host.
pub mod player;

/// The hosted player session.
pub mod server;

/// Player state container and attribute setters.
pub mod state;

/// Enums, metadata keys, and canonical wire names.
pub mod types;

pub use controls::PlayerControls;
pub use dbus::{BUS_NAME_PREFIX, MprisService, OBJECT_PATH};
pub use error::{Error, Result};
pub use notify::{ChangeNotifier, EventSink, NullSink};
pub use player::Player;
pub use server::Server;
pub use state::PlayerState;
pub use types::{Field, Interface, LoopStatus, MetadataValue, PlaybackStatus, Prop};
