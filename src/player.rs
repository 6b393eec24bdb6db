use std::collections::HashMap;

use crate::notify::{ChangeNotifier, EventSink};
use crate::state::PlayerState;
use crate::types::{Field, LoopStatus, MetadataValue, PlaybackStatus, Prop};

/// Mutable view of the hosted player: state plus change notification.
///
/// This is what the host application mutates directly (advancing position,
/// flipping playback status from its own handlers) and what every registered
/// handler receives. Each `set_*` applies the [`PlayerState`] setter and
/// immediately emits a property-changed notification naming that attribute,
/// so host-side mutation and remote visibility stay in lockstep.
///
/// Not internally thread-safe; the embedding application (or the bus
/// adapter) serializes access.
#[derive(Debug, Default)]
pub struct Player {
    state: PlayerState,
    notifier: ChangeNotifier,
}

impl Player {
    /// Create a player with default state and no attached transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the underlying state.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Direct state access for flows that must defer notification.
    ///
    /// Used by the dispatcher's property-set path, which applies the setter,
    /// runs the application callback, and only then notifies.
    pub(crate) fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// Emit a property-changed notification for `props`.
    pub(crate) fn notify(&self, props: &[Prop]) {
        self.notifier.prop_changed(props);
    }

    /// Attach the transport's notification sink.
    pub fn set_event_sink(&mut self, sink: Box<dyn EventSink>) {
        self.notifier.set_sink(sink);
    }

    /// Request the dedicated seeked notification for `position` (µs).
    ///
    /// Never sent automatically; a seek handler that moved the position
    /// discontinuously calls this itself.
    pub fn seeked(&self, position: i64) {
        self.notifier.seeked(position);
    }

    /// Set the player name shown by controllers.
    pub fn set_identity(&mut self, value: impl Into<String>) {
        let prop = self.state.set_identity(value);
        self.notify(&[prop]);
    }

    /// Set the desktop entry basename.
    pub fn set_desktop_entry(&mut self, value: impl Into<String>) {
        let prop = self.state.set_desktop_entry(value);
        self.notify(&[prop]);
    }

    /// Set the URI schemes the player can open.
    pub fn set_supported_uri_schemes(&mut self, value: Vec<String>) {
        let prop = self.state.set_supported_uri_schemes(value);
        self.notify(&[prop]);
    }

    /// Set the mime types the player can open.
    pub fn set_supported_mime_types(&mut self, value: Vec<String>) {
        let prop = self.state.set_supported_mime_types(value);
        self.notify(&[prop]);
    }

    /// Set the fullscreen flag.
    pub fn set_fullscreen(&mut self, value: bool) {
        let prop = self.state.set_fullscreen(value);
        self.notify(&[prop]);
    }

    /// Set whether the player implements a track list.
    pub fn set_has_track_list(&mut self, value: bool) {
        let prop = self.state.set_has_track_list(value);
        self.notify(&[prop]);
    }

    /// Set the playback status.
    pub fn set_playback_status(&mut self, value: PlaybackStatus) {
        let prop = self.state.set_playback_status(value);
        self.notify(&[prop]);
    }

    /// Set the loop mode.
    pub fn set_loop_status(&mut self, value: LoopStatus) {
        let prop = self.state.set_loop_status(value);
        self.notify(&[prop]);
    }

    /// Set the playback rate. Not clamped.
    pub fn set_rate(&mut self, value: f64) {
        let prop = self.state.set_rate(value);
        self.notify(&[prop]);
    }

    /// Set the minimum playback rate.
    pub fn set_minimum_rate(&mut self, value: f64) {
        let prop = self.state.set_minimum_rate(value);
        self.notify(&[prop]);
    }

    /// Set the maximum playback rate.
    pub fn set_maximum_rate(&mut self, value: f64) {
        let prop = self.state.set_maximum_rate(value);
        self.notify(&[prop]);
    }

    /// Set the shuffle flag.
    pub fn set_shuffle(&mut self, value: bool) {
        let prop = self.state.set_shuffle(value);
        self.notify(&[prop]);
    }

    /// Set the volume.
    pub fn set_volume(&mut self, value: f64) {
        let prop = self.state.set_volume(value);
        self.notify(&[prop]);
    }

    /// Set the playback position in microseconds.
    ///
    /// This covers natural progression; for jumps, follow up with
    /// [`Player::seeked`].
    pub fn set_position(&mut self, value: i64) {
        let prop = self.state.set_position(value);
        self.notify(&[prop]);
    }

    /// Replace the track metadata wholesale.
    pub fn set_metadata(&mut self, metadata: HashMap<Field, MetadataValue>) {
        let prop = self.state.set_metadata(metadata);
        self.notify(&[prop]);
    }
}
