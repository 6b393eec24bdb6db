//! Remote entry points: inbound commands and property writes.
//!
//! Every method validates the capability gate first; a failed gate returns
//! [`Error::PermissionDenied`] and performs no mutation and no handler
//! invocation. On success the registered handler runs with the mutable
//! [`Player`](crate::player::Player) view. The dispatcher never mutates
//! `PlaybackStatus` on the handler's behalf — Play, Pause, Stop and
//! PlayPause leave status transitions entirely to the application, so there
//! is exactly one source of status notifications.

use tracing::debug;

use crate::error::{Error, Result};
use crate::server::Server;
use crate::types::LoopStatus;

impl Server {
    /// Remote `Raise`.
    ///
    /// Gated only by handler presence: an unregistered handler is a logged
    /// no-op, not an error.
    pub fn raise(&mut self) {
        let (player, controls) = self.parts();
        controls.call_raise(player);
    }

    /// Remote `Quit`.
    ///
    /// Gated only by handler presence, like [`Server::raise`].
    pub fn quit(&mut self) {
        let (player, controls) = self.parts();
        controls.call_quit(player);
    }

    /// Remote `Next`.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanGoNext` is false.
    pub fn next(&mut self) -> Result<()> {
        if !self.controls().can_go_next() {
            return Err(Error::PermissionDenied("CanGoNext is false"));
        }

        let (player, controls) = self.parts();
        controls.call_next(player);
        Ok(())
    }

    /// Remote `Previous`.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanGoPrevious` is false.
    pub fn previous(&mut self) -> Result<()> {
        if !self.controls().can_go_previous() {
            return Err(Error::PermissionDenied("CanGoPrevious is false"));
        }

        let (player, controls) = self.parts();
        controls.call_previous(player);
        Ok(())
    }

    /// Remote `Pause`.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanPause` is false.
    pub fn pause(&mut self) -> Result<()> {
        if !self.controls().can_pause() {
            return Err(Error::PermissionDenied("CanPause is false"));
        }

        let (player, controls) = self.parts();
        controls.call_pause(player);
        Ok(())
    }

    /// Remote `PlayPause`.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when both `CanPlay` and `CanPause` are
    /// false.
    pub fn play_pause(&mut self) -> Result<()> {
        if !self.controls().can_play() && !self.controls().can_pause() {
            return Err(Error::PermissionDenied("CanPlay and CanPause are false"));
        }

        let (player, controls) = self.parts();
        controls.call_play_pause(player);
        Ok(())
    }

    /// Remote `Stop`.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanControl` is false.
    pub fn stop(&mut self) -> Result<()> {
        if !self.controls().can_control() {
            return Err(Error::PermissionDenied("CanControl is false"));
        }

        let (player, controls) = self.parts();
        controls.call_stop(player);
        Ok(())
    }

    /// Remote `Play`.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanPlay` is false.
    pub fn play(&mut self) -> Result<()> {
        if !self.controls().can_play() {
            return Err(Error::PermissionDenied("CanPlay is false"));
        }

        let (player, controls) = self.parts();
        controls.call_play(player);
        Ok(())
    }

    /// Remote `Seek` with a relative offset in microseconds.
    ///
    /// The handler combines the offset with the current position, stores
    /// the result, and requests the seeked notification itself.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanSeek` is false.
    pub fn seek(&mut self, offset: i64) -> Result<()> {
        if !self.controls().can_seek() {
            return Err(Error::PermissionDenied("CanSeek is false"));
        }

        let (player, controls) = self.parts();
        controls.call_seek(player, offset);
        Ok(())
    }

    /// Remote `SetPosition` with a track id path and an absolute position
    /// in microseconds.
    ///
    /// The track id is forwarded without comparison against the current
    /// track; the handler ignores mismatches by convention.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanSeek` is false.
    pub fn set_position(&mut self, track_id: &str, position: i64) -> Result<()> {
        if !self.controls().can_seek() {
            return Err(Error::PermissionDenied("CanSeek is false"));
        }

        let (player, controls) = self.parts();
        controls.call_set_position(player, track_id, position);
        Ok(())
    }

    /// Remote `OpenUri`.
    ///
    /// Gated only by handler presence; no scheme validation against
    /// `SupportedUriSchemes` happens here.
    pub fn open_uri(&mut self, uri: &str) {
        let (player, controls) = self.parts();
        controls.call_open_uri(player, uri);
    }

    /// Remote `Fullscreen` write.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanSetFullscreen` is false.
    pub fn set_fullscreen_remote(&mut self, value: bool) -> Result<()> {
        if !self.controls().can_set_fullscreen() {
            return Err(Error::PermissionDenied("CanSetFullscreen is false"));
        }

        let (player, controls) = self.parts();
        let prop = player.state_mut().set_fullscreen(value);
        controls.call_fullscreen_changed(player, value);
        player.notify(&[prop]);
        Ok(())
    }

    /// Remote `LoopStatus` write, from its wire string.
    ///
    /// Unrecognized values are dropped silently: no state change, no
    /// callback, no notification. Liberal parsing is part of the protocol
    /// contract.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanControl` is false.
    pub fn set_loop_status_remote(&mut self, value: &str) -> Result<()> {
        if !self.controls().can_control() {
            return Err(Error::PermissionDenied("CanControl is false"));
        }

        let Some(status) = LoopStatus::parse(value) else {
            debug!(value, "ignoring unrecognized LoopStatus");
            return Ok(());
        };

        let (player, controls) = self.parts();
        let prop = player.state_mut().set_loop_status(status);
        controls.call_loop_status_changed(player, status);
        player.notify(&[prop]);
        Ok(())
    }

    /// Remote `Rate` write. Always allowed; the rate-changed callback runs
    /// only if registered.
    pub fn set_rate_remote(&mut self, value: f64) {
        let (player, controls) = self.parts();
        let prop = player.state_mut().set_rate(value);
        controls.call_rate_changed(player, value);
        player.notify(&[prop]);
    }

    /// Remote `Shuffle` write.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanControl` is false.
    pub fn set_shuffle_remote(&mut self, value: bool) -> Result<()> {
        if !self.controls().can_control() {
            return Err(Error::PermissionDenied("CanControl is false"));
        }

        let (player, controls) = self.parts();
        let prop = player.state_mut().set_shuffle(value);
        controls.call_shuffle_changed(player, value);
        player.notify(&[prop]);
        Ok(())
    }

    /// Remote `Volume` write.
    ///
    /// # Errors
    /// [`Error::PermissionDenied`] when `CanControl` is false.
    pub fn set_volume_remote(&mut self, value: f64) -> Result<()> {
        if !self.controls().can_control() {
            return Err(Error::PermissionDenied("CanControl is false"));
        }

        let (player, controls) = self.parts();
        let prop = player.state_mut().set_volume(value);
        controls.call_volume_changed(player, value);
        player.notify(&[prop]);
        Ok(())
    }

    /// Capability snapshot for the player interface.
    ///
    /// Recomputed from handler presence on each call, never cached.
    pub fn can_control(&self) -> bool {
        self.controls().can_control()
    }

    /// Whether `Next` would be accepted.
    pub fn can_go_next(&self) -> bool {
        self.controls().can_go_next()
    }

    /// Whether `Previous` would be accepted.
    pub fn can_go_previous(&self) -> bool {
        self.controls().can_go_previous()
    }

    /// Whether `Play` would be accepted.
    pub fn can_play(&self) -> bool {
        self.controls().can_play()
    }

    /// Whether `Pause` would be accepted.
    pub fn can_pause(&self) -> bool {
        self.controls().can_pause()
    }

    /// Whether `Seek` and `SetPosition` would be accepted.
    pub fn can_seek(&self) -> bool {
        self.controls().can_seek()
    }

    /// Whether `Quit` has a registered handler.
    pub fn can_quit(&self) -> bool {
        self.controls().can_quit()
    }

    /// Whether `Raise` has a registered handler.
    pub fn can_raise(&self) -> bool {
        self.controls().can_raise()
    }

    /// Whether remote `Fullscreen` writes would be accepted.
    pub fn can_set_fullscreen(&self) -> bool {
        self.controls().can_set_fullscreen()
    }
}
