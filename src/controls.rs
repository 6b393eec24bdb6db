use tracing::debug;

use crate::player::Player;
use crate::types::LoopStatus;

type Command = Box<dyn FnMut(&mut Player) + Send>;
type SeekHandler = Box<dyn FnMut(&mut Player, i64) + Send>;
type SetPositionHandler = Box<dyn FnMut(&mut Player, &str, i64) + Send>;
type OpenUriHandler = Box<dyn FnMut(&mut Player, &str) + Send>;
type LoopStatusHandler = Box<dyn FnMut(&mut Player, LoopStatus) + Send>;
type BoolHandler = Box<dyn FnMut(&mut Player, bool) + Send>;
type FloatHandler = Box<dyn FnMut(&mut Player, f64) + Send>;

/// The application's handler set: one optional slot per remote command and
/// per remotely writable attribute.
///
/// Capability flags are pure functions over slot presence, recomputed on
/// every read. A flag flips to true the moment its dependent handlers are
/// registered and is never cached, so controllers always see the wired-up
/// feature set.
///
/// Handlers receive the mutable [`Player`] view and run on the transport's
/// dispatch task; a handler that blocks stalls command delivery, so long
/// work belongs on the application's own tasks.
#[derive(Default)]
pub struct PlayerControls {
    raise: Option<Command>,
    quit: Option<Command>,
    next: Option<Command>,
    previous: Option<Command>,
    pause: Option<Command>,
    play_pause: Option<Command>,
    stop: Option<Command>,
    play: Option<Command>,
    seek: Option<SeekHandler>,
    set_position: Option<SetPositionHandler>,
    open_uri: Option<OpenUriHandler>,
    fullscreen_changed: Option<BoolHandler>,
    loop_status_changed: Option<LoopStatusHandler>,
    rate_changed: Option<FloatHandler>,
    shuffle_changed: Option<BoolHandler>,
    volume_changed: Option<FloatHandler>,
}

impl PlayerControls {
    /// Create an empty handler set; every capability starts out false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the Raise handler.
    pub fn on_raise(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.raise = Some(Box::new(f));
        self
    }

    /// Register the Quit handler.
    pub fn on_quit(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.quit = Some(Box::new(f));
        self
    }

    /// Register the Next handler.
    pub fn on_next(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.next = Some(Box::new(f));
        self
    }

    /// Register the Previous handler.
    pub fn on_previous(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.previous = Some(Box::new(f));
        self
    }

    /// Register the Pause handler.
    ///
    /// The handler owns the resulting status change; the dispatcher never
    /// sets `PlaybackStatus` on its behalf.
    pub fn on_pause(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.pause = Some(Box::new(f));
        self
    }

    /// Register the PlayPause handler.
    pub fn on_play_pause(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.play_pause = Some(Box::new(f));
        self
    }

    /// Register the Stop handler.
    pub fn on_stop(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.stop = Some(Box::new(f));
        self
    }

    /// Register the Play handler.
    pub fn on_play(&mut self, f: impl FnMut(&mut Player) + Send + 'static) -> &mut Self {
        self.play = Some(Box::new(f));
        self
    }

    /// Register the Seek handler.
    ///
    /// Receives the relative offset in microseconds. Combining it with the
    /// current position, storing the result, and requesting the seeked
    /// notification are all up to the handler.
    pub fn on_seek(&mut self, f: impl FnMut(&mut Player, i64) + Send + 'static) -> &mut Self {
        self.seek = Some(Box::new(f));
        self
    }

    /// Register the SetPosition handler.
    ///
    /// Receives the track id path and the absolute position in
    /// microseconds. The handler validates that the track id matches the
    /// current track; mismatches are ignored by convention, not errors.
    pub fn on_set_position(
        &mut self,
        f: impl FnMut(&mut Player, &str, i64) + Send + 'static,
    ) -> &mut Self {
        self.set_position = Some(Box::new(f));
        self
    }

    /// Register the OpenUri handler.
    ///
    /// Scheme validation against `SupportedUriSchemes` is left to the
    /// handler.
    pub fn on_open_uri(&mut self, f: impl FnMut(&mut Player, &str) + Send + 'static) -> &mut Self {
        self.open_uri = Some(Box::new(f));
        self
    }

    /// Register the callback for remote `Fullscreen` writes.
    ///
    /// Registering this is what makes `CanSetFullscreen` true.
    pub fn on_fullscreen_changed(
        &mut self,
        f: impl FnMut(&mut Player, bool) + Send + 'static,
    ) -> &mut Self {
        self.fullscreen_changed = Some(Box::new(f));
        self
    }

    /// Register the callback for remote `LoopStatus` writes.
    pub fn on_loop_status_changed(
        &mut self,
        f: impl FnMut(&mut Player, LoopStatus) + Send + 'static,
    ) -> &mut Self {
        self.loop_status_changed = Some(Box::new(f));
        self
    }

    /// Register the callback for remote `Rate` writes.
    pub fn on_rate_changed(
        &mut self,
        f: impl FnMut(&mut Player, f64) + Send + 'static,
    ) -> &mut Self {
        self.rate_changed = Some(Box::new(f));
        self
    }

    /// Register the callback for remote `Shuffle` writes.
    pub fn on_shuffle_changed(
        &mut self,
        f: impl FnMut(&mut Player, bool) + Send + 'static,
    ) -> &mut Self {
        self.shuffle_changed = Some(Box::new(f));
        self
    }

    /// Register the callback for remote `Volume` writes.
    pub fn on_volume_changed(
        &mut self,
        f: impl FnMut(&mut Player, f64) + Send + 'static,
    ) -> &mut Self {
        self.volume_changed = Some(Box::new(f));
        self
    }

    /// Whether the player accepts control commands at all.
    ///
    /// True iff the loop-status, shuffle and volume callbacks plus the Stop
    /// handler are all registered.
    pub fn can_control(&self) -> bool {
        self.loop_status_changed.is_some()
            && self.shuffle_changed.is_some()
            && self.volume_changed.is_some()
            && self.stop.is_some()
    }

    /// Whether Next is supported.
    pub fn can_go_next(&self) -> bool {
        self.can_control() && self.next.is_some()
    }

    /// Whether Previous is supported.
    pub fn can_go_previous(&self) -> bool {
        self.can_control() && self.previous.is_some()
    }

    /// Whether Play is supported (requires both Play and PlayPause).
    pub fn can_play(&self) -> bool {
        self.can_control() && self.play.is_some() && self.play_pause.is_some()
    }

    /// Whether Pause is supported (requires both Pause and PlayPause).
    pub fn can_pause(&self) -> bool {
        self.can_control() && self.pause.is_some() && self.play_pause.is_some()
    }

    /// Whether Seek and SetPosition are supported.
    pub fn can_seek(&self) -> bool {
        self.can_control() && self.seek.is_some()
    }

    /// Whether Quit is supported. Not gated on `can_control`.
    pub fn can_quit(&self) -> bool {
        self.quit.is_some()
    }

    /// Whether Raise is supported. Not gated on `can_control`.
    pub fn can_raise(&self) -> bool {
        self.raise.is_some()
    }

    /// Whether remote `Fullscreen` writes are supported.
    pub fn can_set_fullscreen(&self) -> bool {
        self.fullscreen_changed.is_some()
    }

    fn call(slot: &mut Option<Command>, name: &str, player: &mut Player) {
        match slot {
            Some(f) => f(player),
            None => debug!(command = name, "not implemented"),
        }
    }

    pub(crate) fn call_raise(&mut self, player: &mut Player) {
        Self::call(&mut self.raise, "Raise", player);
    }

    pub(crate) fn call_quit(&mut self, player: &mut Player) {
        Self::call(&mut self.quit, "Quit", player);
    }

    pub(crate) fn call_next(&mut self, player: &mut Player) {
        Self::call(&mut self.next, "Next", player);
    }

    pub(crate) fn call_previous(&mut self, player: &mut Player) {
        Self::call(&mut self.previous, "Previous", player);
    }

    pub(crate) fn call_pause(&mut self, player: &mut Player) {
        Self::call(&mut self.pause, "Pause", player);
    }

    pub(crate) fn call_play_pause(&mut self, player: &mut Player) {
        Self::call(&mut self.play_pause, "PlayPause", player);
    }

    pub(crate) fn call_stop(&mut self, player: &mut Player) {
        Self::call(&mut self.stop, "Stop", player);
    }

    pub(crate) fn call_play(&mut self, player: &mut Player) {
        Self::call(&mut self.play, "Play", player);
    }

    pub(crate) fn call_seek(&mut self, player: &mut Player, offset: i64) {
        match &mut self.seek {
            Some(f) => f(player, offset),
            None => debug!(command = "Seek", "not implemented"),
        }
    }

    pub(crate) fn call_set_position(&mut self, player: &mut Player, track_id: &str, position: i64) {
        match &mut self.set_position {
            Some(f) => f(player, track_id, position),
            None => debug!(command = "SetPosition", "not implemented"),
        }
    }

    pub(crate) fn call_open_uri(&mut self, player: &mut Player, uri: &str) {
        match &mut self.open_uri {
            Some(f) => f(player, uri),
            None => debug!(command = "OpenUri", "not implemented"),
        }
    }

    pub(crate) fn call_fullscreen_changed(&mut self, player: &mut Player, value: bool) {
        if let Some(f) = &mut self.fullscreen_changed {
            f(player, value);
        }
    }

    pub(crate) fn call_loop_status_changed(&mut self, player: &mut Player, value: LoopStatus) {
        if let Some(f) = &mut self.loop_status_changed {
            f(player, value);
        }
    }

    pub(crate) fn call_rate_changed(&mut self, player: &mut Player, value: f64) {
        if let Some(f) = &mut self.rate_changed {
            f(player, value);
        }
    }

    pub(crate) fn call_shuffle_changed(&mut self, player: &mut Player, value: bool) {
        if let Some(f) = &mut self.shuffle_changed {
            f(player, value);
        }
    }

    pub(crate) fn call_volume_changed(&mut self, player: &mut Player, value: f64) {
        if let Some(f) = &mut self.volume_changed {
            f(player, value);
        }
    }
}

impl std::fmt::Debug for PlayerControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerControls")
            .field("can_control", &self.can_control())
            .field("can_go_next", &self.can_go_next())
            .field("can_go_previous", &self.can_go_previous())
            .field("can_play", &self.can_play())
            .field("can_pause", &self.can_pause())
            .field("can_seek", &self.can_seek())
            .field("can_quit", &self.can_quit())
            .field("can_raise", &self.can_raise())
            .field("can_set_fullscreen", &self.can_set_fullscreen())
            .finish_non_exhaustive()
    }
}
