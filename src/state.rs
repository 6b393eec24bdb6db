use std::collections::HashMap;

use crate::types::{Field, LoopStatus, MetadataValue, PlaybackStatus, Prop};

/// Mutable state container for one hosted player session.
///
/// Holds everything the two MPRIS interfaces read: identity, playback
/// attributes, and track metadata. Setters update in place and report which
/// property changed so the caller can hand the record to the
/// [`ChangeNotifier`](crate::notify::ChangeNotifier); no setter validates or
/// clamps its input (rate bounds and volume range are the caller's
/// responsibility).
///
/// Capability flags are not stored here; they are derived from handler
/// presence in [`PlayerControls`](crate::controls::PlayerControls) on every
/// read.
#[derive(Debug, Default)]
pub struct PlayerState {
    identity: String,
    desktop_entry: String,
    supported_uri_schemes: Vec<String>,
    supported_mime_types: Vec<String>,
    fullscreen: bool,
    has_track_list: bool,
    playback_status: PlaybackStatus,
    loop_status: LoopStatus,
    rate: f64,
    minimum_rate: f64,
    maximum_rate: f64,
    shuffle: bool,
    volume: f64,
    position: i64,
    metadata: HashMap<&'static str, MetadataValue>,
}

impl PlayerState {
    /// Create a fresh state: all booleans false, numerics zero, collections
    /// empty, playback stopped, no looping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable player name.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Set the player name. Always allowed.
    pub fn set_identity(&mut self, value: impl Into<String>) -> Prop {
        self.identity = value.into();
        Prop::Identity
    }

    /// Desktop entry basename, without the `.desktop` suffix.
    pub fn desktop_entry(&self) -> &str {
        &self.desktop_entry
    }

    /// Set the desktop entry. Always allowed.
    pub fn set_desktop_entry(&mut self, value: impl Into<String>) -> Prop {
        self.desktop_entry = value.into();
        Prop::DesktopEntry
    }

    /// URI schemes the player claims to open.
    pub fn supported_uri_schemes(&self) -> &[String] {
        &self.supported_uri_schemes
    }

    /// Set the supported URI schemes. Host-only; remote callers cannot
    /// write this.
    pub fn set_supported_uri_schemes(&mut self, value: Vec<String>) -> Prop {
        self.supported_uri_schemes = value;
        Prop::SupportedUriSchemes
    }

    /// Mime types the player claims to open.
    pub fn supported_mime_types(&self) -> &[String] {
        &self.supported_mime_types
    }

    /// Set the supported mime types. Host-only; remote callers cannot
    /// write this.
    pub fn set_supported_mime_types(&mut self, value: Vec<String>) -> Prop {
        self.supported_mime_types = value;
        Prop::SupportedMimeTypes
    }

    /// Whether the player is fullscreen.
    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Set the fullscreen flag.
    pub fn set_fullscreen(&mut self, value: bool) -> Prop {
        self.fullscreen = value;
        Prop::Fullscreen
    }

    /// Whether the player implements a track list.
    pub fn has_track_list(&self) -> bool {
        self.has_track_list
    }

    /// Set the track list flag.
    pub fn set_has_track_list(&mut self, value: bool) -> Prop {
        self.has_track_list = value;
        Prop::HasTrackList
    }

    /// Current playback status.
    pub fn playback_status(&self) -> PlaybackStatus {
        self.playback_status
    }

    /// Set the playback status.
    ///
    /// The dispatcher never calls this on behalf of Play/Pause/Stop; the
    /// application's handler owns status transitions.
    pub fn set_playback_status(&mut self, value: PlaybackStatus) -> Prop {
        self.playback_status = value;
        Prop::PlaybackStatus
    }

    /// Current loop mode.
    pub fn loop_status(&self) -> LoopStatus {
        self.loop_status
    }

    /// Set the loop mode.
    pub fn set_loop_status(&mut self, value: LoopStatus) -> Prop {
        self.loop_status = value;
        Prop::LoopStatus
    }

    /// Current playback rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Set the playback rate. Not clamped against the rate bounds.
    pub fn set_rate(&mut self, value: f64) -> Prop {
        self.rate = value;
        Prop::Rate
    }

    /// Lowest rate the player advertises.
    pub fn minimum_rate(&self) -> f64 {
        self.minimum_rate
    }

    /// Set the minimum rate.
    pub fn set_minimum_rate(&mut self, value: f64) -> Prop {
        self.minimum_rate = value;
        Prop::MinimumRate
    }

    /// Highest rate the player advertises.
    pub fn maximum_rate(&self) -> f64 {
        self.maximum_rate
    }

    /// Set the maximum rate.
    pub fn set_maximum_rate(&mut self, value: f64) -> Prop {
        self.maximum_rate = value;
        Prop::MaximumRate
    }

    /// Whether shuffle is enabled.
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Set the shuffle flag.
    pub fn set_shuffle(&mut self, value: bool) -> Prop {
        self.shuffle = value;
        Prop::Shuffle
    }

    /// Current volume. Zero or greater by convention, not enforced.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Set the volume.
    pub fn set_volume(&mut self, value: f64) -> Prop {
        self.volume = value;
        Prop::Volume
    }

    /// Playback position in microseconds.
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Set the playback position. Monotonicity is not enforced.
    pub fn set_position(&mut self, value: i64) -> Prop {
        self.position = value;
        Prop::Position
    }

    /// Track metadata, keyed by canonical wire name.
    pub fn metadata(&self) -> &HashMap<&'static str, MetadataValue> {
        &self.metadata
    }

    /// Replace the track metadata wholesale.
    ///
    /// Keys are converted to their canonical wire names on store. The
    /// previous mapping is discarded, never merged into.
    pub fn set_metadata(&mut self, metadata: HashMap<Field, MetadataValue>) -> Prop {
        self.metadata = metadata
            .into_iter()
            .map(|(field, value)| (field.wire_name(), value))
            .collect();
        Prop::Metadata
    }
}
