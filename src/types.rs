use std::fmt;

/// Playback state of the hosted player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player is stopped
    #[default]
    Stopped,
}

impl PlaybackStatus {
    /// Canonical wire string for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
        }
    }

    /// Parse a canonical wire string.
    ///
    /// Returns `None` for anything that is not one of the three canonical
    /// names; remote writes carrying such values are dropped silently.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Playing" => Some(Self::Playing),
            "Paused" => Some(Self::Paused),
            "Stopped" => Some(Self::Stopped),
            _ => None,
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loop mode of the hosted player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopStatus {
    /// No looping
    #[default]
    None,

    /// Loop the current track
    Track,

    /// Loop the entire playlist
    Playlist,
}

impl LoopStatus {
    /// Canonical wire string for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Track => "Track",
            Self::Playlist => "Playlist",
        }
    }

    /// Parse a canonical wire string.
    ///
    /// Returns `None` for unrecognized values, which remote writes treat as
    /// a silent no-op.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "None" => Some(Self::None),
            "Track" => Some(Self::Track),
            "Playlist" => Some(Self::Playlist),
            _ => None,
        }
    }
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata keys understood by the `Metadata` property.
///
/// The key set is closed: every key maps to exactly one canonical wire name
/// and unknown keys cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// D-Bus path uniquely identifying the track within the player
    TrackId,
    /// Track length in microseconds
    Length,
    /// URL of an image associated with the track
    ArtUrl,
    /// Album name
    Album,
    /// Album artist(s)
    AlbumArtist,
    /// Track artist(s)
    Artist,
    /// Track lyrics
    AsText,
    /// Speed of the music in beats per minute
    AudioBPM,
    /// An automatically generated rating
    AutoRating,
    /// A (list of) freeform comment(s)
    Comment,
    /// Composer(s)
    Composer,
    /// When the track was created
    ContentCreated,
    /// The disc number on the album this track is from
    DiscNumber,
    /// When the track was first played
    FirstUsed,
    /// Genre(s) of the track
    Genre,
    /// When the track was last played
    LastUsed,
    /// Lyricist(s)
    Lyricist,
    /// Track title
    Title,
    /// The track number on the album disc
    TrackNumber,
    /// Location of the media file
    Url,
    /// Number of times the track has been played
    UseCount,
    /// A user-specified rating
    UserRating,
}

impl Field {
    /// Canonical wire name for this metadata key.
    ///
    /// These strings are a hard external contract; controllers match them
    /// byte-for-byte.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::TrackId => "mpris:trackid",
            Self::Length => "mpris:length",
            Self::ArtUrl => "mpris:artUrl",
            Self::Album => "xesam:album",
            Self::AlbumArtist => "xesam:albumArtist",
            Self::Artist => "xesam:artist",
            Self::AsText => "xesam:asText",
            Self::AudioBPM => "xesam:audioBPM",
            Self::AutoRating => "xesam:autoRating",
            Self::Comment => "xesam:comment",
            Self::Composer => "xesam:composer",
            Self::ContentCreated => "xesam:contentCreated",
            Self::DiscNumber => "xesam:discNumber",
            Self::FirstUsed => "xesam:firstUsed",
            Self::Genre => "xesam:genre",
            Self::LastUsed => "xesam:lastUsed",
            Self::Lyricist => "xesam:lyricist",
            Self::Title => "xesam:title",
            Self::TrackNumber => "xesam:trackNumber",
            Self::Url => "xesam:url",
            Self::UseCount => "xesam:useCount",
            Self::UserRating => "xesam:userRating",
        }
    }
}

/// A metadata value, mirroring the D-Bus variant types MPRIS metadata uses.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// A UTF-8 string (titles, URLs, dates)
    Text(String),

    /// A list of strings (artists, genres, comments)
    TextList(Vec<String>),

    /// A 32-bit integer (track numbers, BPM)
    Int(i32),

    /// A 64-bit integer (track length in microseconds)
    Int64(i64),

    /// A floating point value (ratings)
    Float(f64),

    /// A D-Bus object path (track ids)
    ///
    /// Validated on conversion; a syntactically invalid path never reaches
    /// the bus.
    ObjectPath(String),
}

impl MetadataValue {
    /// Borrow this value as a D-Bus variant for wire serialization.
    ///
    /// Returns `None` for an [`ObjectPath`](Self::ObjectPath) that does not
    /// hold a valid D-Bus object path; callers drop such entries instead of
    /// putting malformed paths on the wire.
    pub fn to_value(&self) -> Option<zbus::zvariant::Value<'_>> {
        use zbus::zvariant::{ObjectPath, Value};

        Some(match self {
            Self::Text(s) => Value::from(s.as_str()),
            Self::TextList(list) => Value::from(list.clone()),
            Self::Int(n) => Value::from(*n),
            Self::Int64(n) => Value::from(*n),
            Self::Float(n) => Value::from(*n),
            Self::ObjectPath(path) => Value::from(ObjectPath::try_from(path.as_str()).ok()?),
        })
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(value: Vec<String>) -> Self {
        Self::TextList(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// The two MPRIS interfaces a property can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    /// `org.mpris.MediaPlayer2`
    Root,

    /// `org.mpris.MediaPlayer2.Player`
    Player,
}

impl Interface {
    /// Full D-Bus interface name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "org.mpris.MediaPlayer2",
            Self::Player => "org.mpris.MediaPlayer2.Player",
        }
    }
}

/// Exposed properties, the unit of change tracking and of
/// `PropertiesChanged` emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    /// `Fullscreen` on the root interface
    Fullscreen,
    /// `HasTrackList` on the root interface
    HasTrackList,
    /// `Identity` on the root interface
    Identity,
    /// `DesktopEntry` on the root interface
    DesktopEntry,
    /// `SupportedUriSchemes` on the root interface
    SupportedUriSchemes,
    /// `SupportedMimeTypes` on the root interface
    SupportedMimeTypes,
    /// `PlaybackStatus` on the player interface
    PlaybackStatus,
    /// `LoopStatus` on the player interface
    LoopStatus,
    /// `Rate` on the player interface
    Rate,
    /// `Shuffle` on the player interface
    Shuffle,
    /// `Metadata` on the player interface
    Metadata,
    /// `Volume` on the player interface
    Volume,
    /// `Position` on the player interface
    Position,
    /// `MinimumRate` on the player interface
    MinimumRate,
    /// `MaximumRate` on the player interface
    MaximumRate,
}

impl Prop {
    /// Wire name of the property.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fullscreen => "Fullscreen",
            Self::HasTrackList => "HasTrackList",
            Self::Identity => "Identity",
            Self::DesktopEntry => "DesktopEntry",
            Self::SupportedUriSchemes => "SupportedUriSchemes",
            Self::SupportedMimeTypes => "SupportedMimeTypes",
            Self::PlaybackStatus => "PlaybackStatus",
            Self::LoopStatus => "LoopStatus",
            Self::Rate => "Rate",
            Self::Shuffle => "Shuffle",
            Self::Metadata => "Metadata",
            Self::Volume => "Volume",
            Self::Position => "Position",
            Self::MinimumRate => "MinimumRate",
            Self::MaximumRate => "MaximumRate",
        }
    }

    /// Interface the property lives on.
    pub const fn interface(self) -> Interface {
        match self {
            Self::Fullscreen
            | Self::HasTrackList
            | Self::Identity
            | Self::DesktopEntry
            | Self::SupportedUriSchemes
            | Self::SupportedMimeTypes => Interface::Root,
            _ => Interface::Player,
        }
    }
}
