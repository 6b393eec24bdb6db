use crate::controls::PlayerControls;
use crate::notify::EventSink;
use crate::player::Player;

/// One hosted player session: the mutable [`Player`] view plus the
/// application's [`PlayerControls`].
///
/// The remote entry points — commands and property writes arriving from the
/// bus — live in [`crate::dispatch`] as further methods on this type; each
/// checks the relevant capability flag before touching state or invoking a
/// handler.
///
/// The server is a plain owned value with no global state. It is not
/// internally thread-safe: the bus adapter holds it behind a lock and
/// serializes inbound calls against host-side mutation.
#[derive(Debug, Default)]
pub struct Server {
    player: Player,
    controls: PlayerControls,
}

impl Server {
    /// Create a server with default state and no registered handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The player view: state reads and host-side mutation.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player view for host-side updates (position ticks, metadata
    /// on track change, ...). Every mutation notifies the transport.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The registered handler set.
    pub fn controls(&self) -> &PlayerControls {
        &self.controls
    }

    /// Register or replace handlers. Capability flags reflect the new set
    /// immediately.
    pub fn controls_mut(&mut self) -> &mut PlayerControls {
        &mut self.controls
    }

    /// Attach the transport's notification sink.
    pub fn set_event_sink(&mut self, sink: Box<dyn EventSink>) {
        self.player.set_event_sink(sink);
    }

    /// Split borrow for dispatch: handlers borrow the player mutably while
    /// the controls invoke them.
    pub(crate) fn parts(&mut self) -> (&mut Player, &mut PlayerControls) {
        (&mut self.player, &mut self.controls)
    }
}
