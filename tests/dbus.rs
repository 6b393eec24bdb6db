//! Bus-level tests of the zbus adapter, run over a private peer-to-peer
//! connection pair so no session bus is needed.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::os::unix::net::UnixStream;
use std::time::Duration;

use futures::StreamExt;
use tokio::time::timeout;
use zbus::zvariant::{OwnedValue, Value};
use zbus::{Connection, Guid, Proxy};

use mpris_host::{
    Field, MetadataValue, MprisService, OBJECT_PATH, PlaybackStatus, Server,
};

const PLAYER_IFACE: &str = "org.mpris.MediaPlayer2.Player";
const PROPERTIES_IFACE: &str = "org.freedesktop.DBus.Properties";

/// Body of `org.freedesktop.DBus.Properties.PropertiesChanged`.
type ChangedBody = (String, HashMap<String, OwnedValue>, Vec<String>);

async fn connection_pair() -> (Connection, Connection) {
    let (host, remote) = UnixStream::pair().unwrap();

    let host = zbus::connection::Builder::async_io_unix_stream(host)
        .server(Guid::generate())
        .unwrap()
        .p2p()
        .build();
    let remote = zbus::connection::Builder::async_io_unix_stream(remote)
        .p2p()
        .build();

    tokio::try_join!(host, remote).unwrap()
}

/// Register the four handlers `CanControl` derives from.
fn controllable_server() -> Server {
    let mut server = Server::new();
    server
        .controls_mut()
        .on_loop_status_changed(|_, _| {})
        .on_shuffle_changed(|_, _| {})
        .on_volume_changed(|_, _| {})
        .on_stop(|p| p.set_playback_status(PlaybackStatus::Stopped));
    server
}

async fn proxy(remote: &Connection, interface: &'static str) -> Proxy<'static> {
    // The destination is only a header field here; a peer-to-peer server
    // answers regardless.
    Proxy::new(remote, "org.mpris.MediaPlayer2.test", OBJECT_PATH, interface)
        .await
        .unwrap()
}

async fn next_changed(changes: &mut zbus::proxy::SignalStream<'_>) -> ChangedBody {
    let signal = timeout(Duration::from_secs(5), changes.next())
        .await
        .unwrap()
        .unwrap();
    signal.body().deserialize::<ChangedBody>().unwrap()
}

mod property_writes {
    use super::*;

    #[tokio::test]
    async fn ignored_loop_status_write_emits_no_properties_changed() {
        let (host, remote) = connection_pair().await;
        let _service = MprisService::attach(controllable_server(), host)
            .await
            .unwrap();

        let props = proxy(&remote, PROPERTIES_IFACE).await;
        let mut changes = props.receive_signal("PropertiesChanged").await.unwrap();

        props
            .call::<_, _, ()>("Set", &(PLAYER_IFACE, "LoopStatus", Value::from("Bogus")))
            .await
            .unwrap();
        // A valid write afterwards acts as a fence: had the ignored write
        // produced a signal, it would arrive first.
        props
            .call::<_, _, ()>("Set", &(PLAYER_IFACE, "LoopStatus", Value::from("Track")))
            .await
            .unwrap();

        let (interface, changed, invalidated) = next_changed(&mut changes).await;
        assert_eq!(interface, PLAYER_IFACE);
        assert!(invalidated.is_empty());
        assert_eq!(
            **changed.get("LoopStatus").unwrap(),
            Value::from("Track"),
            "first signal on the wire must be the accepted write"
        );
    }

    #[tokio::test]
    async fn accepted_write_emits_exactly_one_properties_changed() {
        let (host, remote) = connection_pair().await;
        let _service = MprisService::attach(controllable_server(), host)
            .await
            .unwrap();

        let props = proxy(&remote, PROPERTIES_IFACE).await;
        let mut changes = props.receive_signal("PropertiesChanged").await.unwrap();

        props
            .call::<_, _, ()>("Set", &(PLAYER_IFACE, "Volume", Value::from(0.5)))
            .await
            .unwrap();

        let (interface, changed, _) = next_changed(&mut changes).await;
        assert_eq!(interface, PLAYER_IFACE);
        assert_eq!(**changed.get("Volume").unwrap(), Value::from(0.5));

        // No duplicate for the same write.
        assert!(
            timeout(Duration::from_millis(500), changes.next())
                .await
                .is_err(),
            "a single property write must signal once"
        );
    }
}

mod host_emissions {
    use super::*;

    #[tokio::test]
    async fn host_side_setter_reaches_the_bus() {
        let (host, remote) = connection_pair().await;
        let service = MprisService::attach(controllable_server(), host)
            .await
            .unwrap();

        let props = proxy(&remote, PROPERTIES_IFACE).await;
        let mut changes = props.receive_signal("PropertiesChanged").await.unwrap();

        service
            .update(|s| s.player_mut().set_playback_status(PlaybackStatus::Playing))
            .await;

        let (interface, changed, _) = next_changed(&mut changes).await;
        assert_eq!(interface, PLAYER_IFACE);
        assert_eq!(
            **changed.get("PlaybackStatus").unwrap(),
            Value::from("Playing")
        );
    }

    #[tokio::test]
    async fn explicit_seeked_reaches_the_bus() {
        let (host, remote) = connection_pair().await;
        let service = MprisService::attach(controllable_server(), host)
            .await
            .unwrap();

        let player = proxy(&remote, PLAYER_IFACE).await;
        let mut seeks = player.receive_signal("Seeked").await.unwrap();

        service.update(|s| s.player().seeked(321)).await;

        let signal = timeout(Duration::from_secs(5), seeks.next())
            .await
            .unwrap()
            .unwrap();
        let position: i64 = signal.body().deserialize().unwrap();
        assert_eq!(position, 321);
    }
}

mod commands {
    use super::*;

    #[tokio::test]
    async fn denied_command_surfaces_as_access_denied() {
        let (host, remote) = connection_pair().await;
        let _service = MprisService::attach(Server::new(), host).await.unwrap();

        let player = proxy(&remote, PLAYER_IFACE).await;
        let err = player.call::<_, _, ()>("Next", &()).await.unwrap_err();

        assert!(matches!(
            err,
            zbus::Error::MethodError(ref name, _, _)
                if name.as_str() == "org.freedesktop.DBus.Error.AccessDenied"
        ));
    }
}

mod metadata {
    use super::*;

    #[tokio::test]
    async fn invalid_track_id_is_dropped_from_the_metadata_read() {
        let (host, remote) = connection_pair().await;
        let mut server = controllable_server();
        server.player_mut().set_metadata(HashMap::from([
            (Field::TrackId, MetadataValue::ObjectPath("not a path".to_owned())),
            (Field::Title, MetadataValue::from("still readable")),
        ]));
        let _service = MprisService::attach(server, host).await.unwrap();

        let player = proxy(&remote, PLAYER_IFACE).await;
        let metadata: HashMap<String, OwnedValue> =
            player.get_property("Metadata").await.unwrap();

        assert!(!metadata.contains_key("mpris:trackid"));
        assert_eq!(
            **metadata.get("xesam:title").unwrap(),
            Value::from("still readable")
        );
    }
}
