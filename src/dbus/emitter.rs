use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::warn;
use zbus::Connection;
use zbus::fdo::Properties;
use zbus::names::InterfaceName;
use zbus::object_server::SignalEmitter;
use zbus::zvariant::Value;

use crate::notify::EventSink;
use crate::server::Server;
use crate::types::{Interface, Prop};

use super::OBJECT_PATH;
use super::player::PlayerInterface;
use super::root::RootInterface;

/// An outbound notification queued for emission.
#[derive(Debug)]
pub(super) enum Event {
    Changed {
        interface: Interface,
        props: Vec<Prop>,
    },
    Seeked {
        position: i64,
    },
}

/// [`EventSink`] that forwards notifications to the emission task.
///
/// Sending never blocks; if the task is gone (connection shut down) the
/// event is dropped, which is exactly the fire-and-forget contract.
pub(super) struct ChannelSink {
    tx: UnboundedSender<Event>,
}

impl ChannelSink {
    pub(super) fn new(tx: UnboundedSender<Event>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn properties_changed(&self, interface: Interface, props: &[Prop]) {
        let _ = self.tx.send(Event::Changed {
            interface,
            props: props.to_vec(),
        });
    }

    fn seeked(&self, position: i64) {
        let _ = self.tx.send(Event::Seeked { position });
    }
}

/// Spawn the task that turns queued events into bus signals.
///
/// This task is the only place `PropertiesChanged` originates: the writable
/// properties disable the interface macro's emission on Set, so a remote
/// write signals once, here, and only after it actually changed state.
pub(super) fn spawn(
    connection: Connection,
    server: Arc<Mutex<Server>>,
    mut rx: UnboundedReceiver<Event>,
) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Err(e) = emit(&connection, &server, event).await {
                warn!(error = %e, "failed to emit signal");
            }
        }
    });
}

async fn emit(connection: &Connection, server: &Mutex<Server>, event: Event) -> zbus::Result<()> {
    let object_server = connection.object_server();

    match event {
        Event::Seeked { position } => {
            let iface_ref = object_server
                .interface::<_, PlayerInterface>(OBJECT_PATH)
                .await?;
            PlayerInterface::seeked(iface_ref.signal_emitter(), position).await
        }
        Event::Changed {
            interface: Interface::Root,
            props,
        } => {
            let iface_ref = object_server
                .interface::<_, RootInterface>(OBJECT_PATH)
                .await?;
            let iface = iface_ref.get().await;
            let emitter = iface_ref.signal_emitter();

            for prop in props {
                match prop {
                    Prop::Fullscreen => {
                        changed_with_value(emitter, server, Interface::Root, prop).await?;
                    }
                    Prop::HasTrackList => iface.has_track_list_changed(emitter).await?,
                    Prop::Identity => iface.identity_changed(emitter).await?,
                    Prop::DesktopEntry => iface.desktop_entry_changed(emitter).await?,
                    Prop::SupportedUriSchemes => {
                        iface.supported_uri_schemes_changed(emitter).await?;
                    }
                    Prop::SupportedMimeTypes => {
                        iface.supported_mime_types_changed(emitter).await?;
                    }
                    _ => {}
                }
            }

            Ok(())
        }
        Event::Changed {
            interface: Interface::Player,
            props,
        } => {
            let iface_ref = object_server
                .interface::<_, PlayerInterface>(OBJECT_PATH)
                .await?;
            let iface = iface_ref.get().await;
            let emitter = iface_ref.signal_emitter();

            for prop in props {
                match prop {
                    Prop::PlaybackStatus => iface.playback_status_changed(emitter).await?,
                    Prop::LoopStatus | Prop::Rate | Prop::Shuffle | Prop::Volume => {
                        changed_with_value(emitter, server, Interface::Player, prop).await?;
                    }
                    Prop::Metadata => iface.metadata_changed(emitter).await?,
                    Prop::Position => iface.position_changed(emitter).await?,
                    Prop::MinimumRate => iface.minimum_rate_changed(emitter).await?,
                    Prop::MaximumRate => iface.maximum_rate_changed(emitter).await?,
                    _ => {}
                }
            }

            Ok(())
        }
    }
}

/// Emit `PropertiesChanged` for a writable property.
///
/// These have no macro-generated `*_changed` helper (emission on Set is
/// disabled for them), so the signal is built here from the current value,
/// read under the server lock.
async fn changed_with_value(
    emitter: &SignalEmitter<'_>,
    server: &Mutex<Server>,
    interface: Interface,
    prop: Prop,
) -> zbus::Result<()> {
    let value = {
        let server = server.lock().await;
        let state = server.player().state();
        match prop {
            Prop::Fullscreen => Value::from(state.fullscreen()),
            Prop::LoopStatus => Value::from(state.loop_status().as_str()),
            Prop::Rate => Value::from(state.rate()),
            Prop::Shuffle => Value::from(state.shuffle()),
            Prop::Volume => Value::from(state.volume()),
            _ => return Ok(()),
        }
    };

    let mut changed = HashMap::new();
    changed.insert(prop.name(), value);

    Properties::properties_changed(
        emitter,
        InterfaceName::from_static_str_unchecked(interface.name()),
        changed,
        Cow::Borrowed(&[]),
    )
    .await
}
