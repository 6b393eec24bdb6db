use tracing::debug;

use crate::types::{Interface, Prop};

/// Transport seam for outbound notifications.
///
/// Implementations forward to the bus (or record, in tests). Both calls are
/// synchronous and fire-and-forget: no acknowledgement, no retry, no
/// queueing at this layer. A transport that cannot deliver immediately must
/// own its own buffering and never block the caller.
pub trait EventSink: Send {
    /// One or more properties on `interface` now hold new values.
    fn properties_changed(&self, interface: Interface, props: &[Prop]);

    /// Playback position changed discontinuously to `position` (µs).
    fn seeked(&self, position: i64);
}

/// An [`EventSink`] that discards everything.
///
/// Installed by default until a transport attaches its own sink, and handy
/// for driving the core without a bus.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn properties_changed(&self, _interface: Interface, _props: &[Prop]) {}

    fn seeked(&self, _position: i64) {}
}

/// Tracks which attributes changed and emits the matching notifications.
///
/// Property changes are batched per call: all changed props belonging to one
/// interface go out as a single notification, so a logical operation that
/// touches several attributes produces at most one event per interface.
pub struct ChangeNotifier {
    sink: Box<dyn EventSink>,
}

impl ChangeNotifier {
    /// Create a notifier that discards events until a sink is attached.
    pub fn new() -> Self {
        Self {
            sink: Box::new(NullSink),
        }
    }

    /// Replace the notification target.
    pub fn set_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sink = sink;
    }

    /// Emit a property-changed notification for `props`, grouped per
    /// interface in the order given.
    pub fn prop_changed(&self, props: &[Prop]) {
        for interface in [Interface::Root, Interface::Player] {
            let changed: Vec<Prop> = props
                .iter()
                .copied()
                .filter(|prop| prop.interface() == interface)
                .collect();

            if !changed.is_empty() {
                debug!(interface = interface.name(), ?changed, "properties changed");
                self.sink.properties_changed(interface, &changed);
            }
        }
    }

    /// Emit the dedicated seeked notification.
    ///
    /// Only ever sent on explicit request; natural playback progression
    /// goes through position updates alone.
    pub fn seeked(&self, position: i64) {
        debug!(position, "seeked");
        self.sink.seeked(position);
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier").finish_non_exhaustive()
    }
}
