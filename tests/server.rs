//! Integration tests for the hosted player core, driven through the public
//! API with a recording notification sink in place of the bus.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mpris_host::{
    Error, EventSink, Interface, LoopStatus, PlaybackStatus, Prop, Server,
};

/// Everything the core asked the transport to deliver.
#[derive(Debug, Clone, PartialEq)]
enum Recorded {
    Changed(Interface, Vec<Prop>),
    Seeked(i64),
}

#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn properties_changed(&self, interface: Interface, props: &[Prop]) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Changed(interface, props.to_vec()));
    }

    fn seeked(&self, position: i64) {
        self.events.lock().unwrap().push(Recorded::Seeked(position));
    }
}

fn recording_server() -> (Server, RecordingSink) {
    let mut server = Server::new();
    let sink = RecordingSink::default();
    server.set_event_sink(Box::new(sink.clone()));
    (server, sink)
}

/// Register the four handlers `CanControl` derives from.
fn make_controllable(server: &mut Server) {
    server
        .controls_mut()
        .on_loop_status_changed(|_, _| {})
        .on_shuffle_changed(|_, _| {})
        .on_volume_changed(|_, _| {})
        .on_stop(|_| {});
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let reader = {
        let count = Arc::clone(&count);
        move || count.load(Ordering::SeqCst)
    };
    (count, reader)
}

mod commands {
    use super::*;

    #[test]
    fn seek_without_capability_is_denied_with_no_side_effects() {
        let (mut server, sink) = recording_server();
        let (invocations, invoked) = counter();

        // Seek handler present, but CanControl is false, so CanSeek is too.
        server.controls_mut().on_seek({
            let invocations = Arc::clone(&invocations);
            move |_, _| {
                invocations.fetch_add(1, Ordering::SeqCst);
            }
        });

        let result = server.seek(5_000_000);

        assert!(matches!(result, Err(Error::PermissionDenied(_))));
        assert_eq!(invoked(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn pause_invokes_handler_once_and_leaves_status_alone() {
        let (mut server, sink) = recording_server();
        make_controllable(&mut server);
        let (invocations, invoked) = counter();

        server
            .controls_mut()
            .on_play_pause(|_| {})
            .on_pause({
                let invocations = Arc::clone(&invocations);
                move |_| {
                    invocations.fetch_add(1, Ordering::SeqCst);
                }
            });

        server.pause().unwrap();

        assert_eq!(invoked(), 1);
        assert_eq!(
            server.player().state().playback_status(),
            PlaybackStatus::Stopped
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn pause_status_change_comes_from_the_handler() {
        let (mut server, sink) = recording_server();
        make_controllable(&mut server);

        server
            .controls_mut()
            .on_play_pause(|_| {})
            .on_pause(|p| p.set_playback_status(PlaybackStatus::Paused));

        server.pause().unwrap();

        assert_eq!(
            server.player().state().playback_status(),
            PlaybackStatus::Paused
        );
        assert_eq!(
            sink.take(),
            vec![Recorded::Changed(
                Interface::Player,
                vec![Prop::PlaybackStatus]
            )]
        );
    }

    #[test]
    fn pause_requires_both_pause_and_play_pause_handlers() {
        let (mut server, _sink) = recording_server();
        make_controllable(&mut server);
        server.controls_mut().on_pause(|_| {});

        assert!(matches!(
            server.pause(),
            Err(Error::PermissionDenied("CanPause is false"))
        ));
    }

    #[test]
    fn play_pause_accepts_when_either_capability_holds() {
        let (mut server, _sink) = recording_server();
        make_controllable(&mut server);
        let (invocations, invoked) = counter();

        server
            .controls_mut()
            .on_play(|_| {})
            .on_play_pause({
                let invocations = Arc::clone(&invocations);
                move |_| {
                    invocations.fetch_add(1, Ordering::SeqCst);
                }
            });

        server.play_pause().unwrap();

        assert_eq!(invoked(), 1);
    }

    #[test]
    fn play_pause_is_denied_without_either_capability() {
        let (mut server, _sink) = recording_server();

        assert!(matches!(
            server.play_pause(),
            Err(Error::PermissionDenied(_))
        ));
    }

    #[test]
    fn stop_is_gated_by_can_control() {
        let (mut server, _sink) = recording_server();
        assert!(matches!(
            server.stop(),
            Err(Error::PermissionDenied("CanControl is false"))
        ));

        make_controllable(&mut server);
        server.stop().unwrap();
    }

    #[test]
    fn raise_and_quit_without_handlers_are_quiet_no_ops() {
        let (mut server, sink) = recording_server();

        server.raise();
        server.quit();

        assert!(sink.is_empty());
    }

    #[test]
    fn seek_handler_owns_position_and_the_seeked_event() {
        let (mut server, sink) = recording_server();
        make_controllable(&mut server);

        server.controls_mut().on_seek(|p, offset| {
            let position = p.state().position() + offset;
            p.set_position(position);
            p.seeked(position);
        });
        server.player_mut().set_position(10);
        sink.take();

        server.seek(5).unwrap();

        assert_eq!(server.player().state().position(), 15);
        assert_eq!(
            sink.take(),
            vec![
                Recorded::Changed(Interface::Player, vec![Prop::Position]),
                Recorded::Seeked(15),
            ]
        );
    }

    #[test]
    fn set_position_forwards_track_id_and_position_uncompared() {
        let (mut server, _sink) = recording_server();
        make_controllable(&mut server);
        let seen = Arc::new(Mutex::new(None));

        server.controls_mut().on_seek(|_, _| {}).on_set_position({
            let seen = Arc::clone(&seen);
            move |_, track_id, position| {
                *seen.lock().unwrap() = Some((track_id.to_owned(), position));
            }
        });

        // Track id does not match any current track; forwarded anyway.
        server.set_position("/org/mpris/track/99", 30).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            Some(("/org/mpris/track/99".to_owned(), 30))
        );
    }

    #[test]
    fn open_uri_is_gated_only_by_handler_presence() {
        let (mut server, sink) = recording_server();
        let seen = Arc::new(Mutex::new(None));

        // No handler: quiet no-op.
        server.open_uri("file:///tmp/a.flac");
        assert!(sink.is_empty());

        server.controls_mut().on_open_uri({
            let seen = Arc::clone(&seen);
            move |_, uri| {
                *seen.lock().unwrap() = Some(uri.to_owned());
            }
        });
        server.open_uri("file:///tmp/a.flac");

        assert_eq!(*seen.lock().unwrap(), Some("file:///tmp/a.flac".to_owned()));
    }
}

mod property_writes {
    use super::*;

    #[test]
    fn bogus_loop_status_is_silently_ignored() {
        let (mut server, sink) = recording_server();
        let (invocations, invoked) = counter();

        server
            .controls_mut()
            .on_loop_status_changed({
                let invocations = Arc::clone(&invocations);
                move |_, _| {
                    invocations.fetch_add(1, Ordering::SeqCst);
                }
            })
            .on_shuffle_changed(|_, _| {})
            .on_volume_changed(|_, _| {})
            .on_stop(|_| {});
        assert!(server.can_control());

        server.set_loop_status_remote("Bogus").unwrap();

        assert_eq!(server.player().state().loop_status(), LoopStatus::None);
        assert_eq!(invoked(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn valid_loop_status_applies_then_notifies() {
        let (mut server, sink) = recording_server();
        let seen = Arc::new(Mutex::new(None));

        server
            .controls_mut()
            .on_loop_status_changed({
                let seen = Arc::clone(&seen);
                move |_, status| {
                    *seen.lock().unwrap() = Some(status);
                }
            })
            .on_shuffle_changed(|_, _| {})
            .on_volume_changed(|_, _| {})
            .on_stop(|_| {});

        server.set_loop_status_remote("Track").unwrap();

        assert_eq!(server.player().state().loop_status(), LoopStatus::Track);
        assert_eq!(*seen.lock().unwrap(), Some(LoopStatus::Track));
        assert_eq!(
            sink.take(),
            vec![Recorded::Changed(Interface::Player, vec![Prop::LoopStatus])]
        );
    }

    #[test]
    fn shuffle_write_without_control_is_denied_and_unapplied() {
        let (mut server, sink) = recording_server();

        let result = server.set_shuffle_remote(true);

        assert!(matches!(
            result,
            Err(Error::PermissionDenied("CanControl is false"))
        ));
        assert!(!server.player().state().shuffle());
        assert!(sink.is_empty());
    }

    #[test]
    fn volume_write_with_control_applies_invokes_and_notifies() {
        let (mut server, sink) = recording_server();
        let seen = Arc::new(Mutex::new(None));

        server
            .controls_mut()
            .on_loop_status_changed(|_, _| {})
            .on_shuffle_changed(|_, _| {})
            .on_volume_changed({
                let seen = Arc::clone(&seen);
                move |_, volume| {
                    *seen.lock().unwrap() = Some(volume);
                }
            })
            .on_stop(|_| {});

        server.set_volume_remote(0.4).unwrap();

        assert_eq!(server.player().state().volume(), 0.4);
        assert_eq!(*seen.lock().unwrap(), Some(0.4));
        assert_eq!(
            sink.take(),
            vec![Recorded::Changed(Interface::Player, vec![Prop::Volume])]
        );
    }

    #[test]
    fn rate_write_is_never_gated() {
        let (mut server, sink) = recording_server();

        // No handlers registered at all; the write still lands.
        server.set_rate_remote(1.5);

        assert_eq!(server.player().state().rate(), 1.5);
        assert_eq!(
            sink.take(),
            vec![Recorded::Changed(Interface::Player, vec![Prop::Rate])]
        );
    }

    #[test]
    fn rate_callback_runs_only_when_registered() {
        let (mut server, _sink) = recording_server();
        let (invocations, invoked) = counter();

        server.set_rate_remote(1.5);
        assert_eq!(invoked(), 0);

        server.controls_mut().on_rate_changed({
            let invocations = Arc::clone(&invocations);
            move |_, _| {
                invocations.fetch_add(1, Ordering::SeqCst);
            }
        });
        server.set_rate_remote(0.5);

        assert_eq!(invoked(), 1);
    }

    #[test]
    fn fullscreen_write_requires_its_handler() {
        let (mut server, sink) = recording_server();

        assert!(matches!(
            server.set_fullscreen_remote(true),
            Err(Error::PermissionDenied("CanSetFullscreen is false"))
        ));
        assert!(sink.is_empty());

        server.controls_mut().on_fullscreen_changed(|_, _| {});
        server.set_fullscreen_remote(true).unwrap();

        assert!(server.player().state().fullscreen());
        assert_eq!(
            sink.take(),
            vec![Recorded::Changed(Interface::Root, vec![Prop::Fullscreen])]
        );
    }
}

mod notifications {
    use super::*;

    #[test]
    fn every_host_setter_names_its_attribute() {
        let (mut server, sink) = recording_server();

        server.player_mut().set_volume(0.9);
        server.player_mut().set_identity("demo");
        server.player_mut().set_shuffle(true);

        assert_eq!(
            sink.take(),
            vec![
                Recorded::Changed(Interface::Player, vec![Prop::Volume]),
                Recorded::Changed(Interface::Root, vec![Prop::Identity]),
                Recorded::Changed(Interface::Player, vec![Prop::Shuffle]),
            ]
        );
    }

    #[test]
    fn position_updates_do_not_imply_seeked() {
        let (mut server, sink) = recording_server();

        server.player_mut().set_position(1_000_000);
        server.player_mut().set_position(2_000_000);

        let events = sink.take();
        assert!(events.iter().all(|e| !matches!(e, Recorded::Seeked(_))));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn seeked_carries_the_exact_requested_position() {
        let (server, sink) = recording_server();

        server.player().seeked(123_456_789);

        assert_eq!(sink.take(), vec![Recorded::Seeked(123_456_789)]);
    }

    #[test]
    fn metadata_replacement_notifies_once_with_wire_named_entries() {
        use mpris_host::{Field, MetadataValue};
        use std::collections::HashMap;

        let (mut server, sink) = recording_server();
        server.player_mut().set_metadata(HashMap::from([(
            Field::Album,
            MetadataValue::from("gone soon"),
        )]));
        sink.take();

        server.player_mut().set_metadata(HashMap::from([
            (Field::Title, MetadataValue::from("X")),
            (Field::Artist, MetadataValue::from(vec!["Y".to_owned()])),
        ]));

        let metadata = server.player().state().metadata();
        assert_eq!(metadata.len(), 2);
        assert!(metadata.contains_key("xesam:title"));
        assert!(metadata.contains_key("xesam:artist"));
        assert!(!metadata.contains_key("xesam:album"));
        assert_eq!(
            sink.take(),
            vec![Recorded::Changed(Interface::Player, vec![Prop::Metadata])]
        );
    }
}

mod capabilities {
    use super::*;

    #[test]
    fn flags_flip_as_their_handlers_arrive() {
        let (mut server, _sink) = recording_server();
        assert!(!server.can_control());
        assert!(!server.can_seek());

        make_controllable(&mut server);
        assert!(server.can_control());
        assert!(!server.can_seek());

        server.controls_mut().on_seek(|_, _| {});
        assert!(server.can_seek());
    }

    #[test]
    fn reads_are_idempotent_between_mutations() {
        let (mut server, _sink) = recording_server();
        make_controllable(&mut server);

        assert_eq!(server.can_control(), server.can_control());
        assert_eq!(server.can_play(), server.can_play());
        assert!(!server.can_play());
    }
}
