//! In-process broadcast channel for desktop-wide requests.
//!
//! Launchers, desktop icons, apps, and the system tray never touch the window registry or the
//! sound player directly; they publish a [`DesktopEvent`] and whoever subscribed reacts.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::model::OpenWindowRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DesktopTopic {
    OpenWindow,
    Shutdown,
    VolumeChange,
    MuteChange,
}

impl DesktopTopic {
    pub const ALL: [Self; 4] = [
        Self::OpenWindow,
        Self::Shutdown,
        Self::VolumeChange,
        Self::MuteChange,
    ];

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::OpenWindow => "openWindow",
            Self::Shutdown => "shutdown",
            Self::VolumeChange => "volumeChange",
            Self::MuteChange => "muteChange",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.wire_name() == name)
    }
}

impl fmt::Display for DesktopTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DesktopEvent {
    OpenWindow(OpenWindowRequest),
    Shutdown,
    /// Volume in percent, `0..=100`.
    VolumeChange {
        volume: u8,
    },
    MuteChange {
        muted: bool,
    },
}

#[derive(Debug, Error)]
pub enum BusError {
    #[error("unknown desktop topic `{0}`")]
    UnknownTopic(String),
    #[error("malformed `{topic}` payload: {source}")]
    MalformedPayload {
        topic: DesktopTopic,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct VolumeWire {
    volume: f64,
}

#[derive(Deserialize)]
struct MuteWire {
    muted: bool,
}

impl DesktopEvent {
    pub fn topic(&self) -> DesktopTopic {
        match self {
            Self::OpenWindow(_) => DesktopTopic::OpenWindow,
            Self::Shutdown => DesktopTopic::Shutdown,
            Self::VolumeChange { .. } => DesktopTopic::VolumeChange,
            Self::MuteChange { .. } => DesktopTopic::MuteChange,
        }
    }

    /// Encodes the event as `(topic name, JSON payload)`.
    pub fn to_wire(&self) -> (&'static str, Value) {
        let payload = match self {
            Self::OpenWindow(req) => serde_json::to_value(req).unwrap_or(Value::Null),
            Self::Shutdown => Value::Null,
            Self::VolumeChange { volume } => json!({ "volume": volume }),
            Self::MuteChange { muted } => json!({ "muted": muted }),
        };
        (self.topic().wire_name(), payload)
    }

    /// Decodes a wire event. Volumes outside `0..=100` are clamped.
    pub fn from_wire(topic: &str, payload: Value) -> Result<Self, BusError> {
        let topic = DesktopTopic::from_wire_name(topic)
            .ok_or_else(|| BusError::UnknownTopic(topic.to_string()))?;
        let malformed = |source| BusError::MalformedPayload { topic, source };
        Ok(match topic {
            DesktopTopic::OpenWindow => {
                Self::OpenWindow(serde_json::from_value(payload).map_err(malformed)?)
            }
            DesktopTopic::Shutdown => Self::Shutdown,
            DesktopTopic::VolumeChange => {
                let wire: VolumeWire = serde_json::from_value(payload).map_err(malformed)?;
                Self::VolumeChange {
                    volume: clamp_volume_percent(wire.volume),
                }
            }
            DesktopTopic::MuteChange => {
                let wire: MuteWire = serde_json::from_value(payload).map_err(malformed)?;
                Self::MuteChange { muted: wire.muted }
            }
        })
    }
}

/// Rounds a raw slider or wire volume into `0..=100`. `NaN` reads as silence.
pub fn clamp_volume_percent(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

type Handler = Rc<dyn Fn(&DesktopEvent)>;

#[derive(Default)]
struct BusState {
    next_subscription: u64,
    handlers: BTreeMap<DesktopTopic, Vec<(u64, Handler)>>,
}

/// Handle returned by [`EventBus::subscribe`]; pass it to [`EventBus::unsubscribe`] to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
    topic: DesktopTopic,
}

impl Subscription {
    pub fn topic(&self) -> DesktopTopic {
        self.topic
    }
}

/// Cheaply cloneable handle to a shared set of topic subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusState>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        let counts: BTreeMap<_, _> = state
            .handlers
            .iter()
            .map(|(topic, handlers)| (topic.wire_name(), handlers.len()))
            .collect();
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        topic: DesktopTopic,
        handler: impl Fn(&DesktopEvent) + 'static,
    ) -> Subscription {
        let mut state = self.inner.borrow_mut();
        state.next_subscription += 1;
        let id = state.next_subscription;
        state
            .handlers
            .entry(topic)
            .or_default()
            .push((id, Rc::new(handler)));
        Subscription { id, topic }
    }

    /// Detaches a handler. Returns `false` when it was already gone.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut state = self.inner.borrow_mut();
        let Some(handlers) = state.handlers.get_mut(&subscription.topic) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription.id);
        before != handlers.len()
    }

    /// Delivers `event` synchronously to every subscriber of its topic, in subscription order.
    ///
    /// Handlers may publish, subscribe, or unsubscribe while being called; those changes apply to
    /// the next publish. Returns the number of handlers invoked.
    pub fn publish(&self, event: DesktopEvent) -> usize {
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .get(&event.topic())
            .map(|handlers| handlers.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default();
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Decodes a JSON broadcast and publishes it. Undecodable broadcasts reach no handler.
    pub fn publish_wire(&self, topic: &str, payload: Value) -> Result<usize, BusError> {
        match DesktopEvent::from_wire(topic, payload) {
            Ok(event) => Ok(self.publish(event)),
            Err(err) => {
                leptos::logging::warn!("dropping broadcast: {err}");
                Err(err)
            }
        }
    }

    pub fn subscriber_count(&self, topic: DesktopTopic) -> usize {
        self.inner
            .borrow()
            .handlers
            .get(&topic)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn publish_reaches_only_matching_topic() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(DesktopTopic::OpenWindow, move |event| {
            sink.borrow_mut().push(event.clone())
        });

        assert_eq!(bus.publish(DesktopEvent::Shutdown), 0);
        assert_eq!(
            bus.publish(DesktopEvent::OpenWindow(OpenWindowRequest::new("Notepad"))),
            1
        );
        assert_eq!(
            *seen.borrow(),
            vec![DesktopEvent::OpenWindow(OpenWindowRequest::new("Notepad"))]
        );
    }

    #[test]
    fn unsubscribe_detaches_once() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let sub = bus.subscribe(DesktopTopic::Shutdown, move |_| counter.set(counter.get() + 1));
        bus.publish(DesktopEvent::Shutdown);
        assert!(bus.unsubscribe(&sub));
        assert!(!bus.unsubscribe(&sub));
        bus.publish(DesktopEvent::Shutdown);
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.subscriber_count(DesktopTopic::Shutdown), 0);
    }

    #[test]
    fn handlers_may_publish_and_subscribe_reentrantly() {
        let bus = EventBus::new();
        let mutes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&mutes);
        bus.subscribe(DesktopTopic::MuteChange, move |_| counter.set(counter.get() + 1));

        let inner_bus = bus.clone();
        bus.subscribe(DesktopTopic::VolumeChange, move |event| {
            if let DesktopEvent::VolumeChange { volume: 0 } = event {
                inner_bus.publish(DesktopEvent::MuteChange { muted: true });
                inner_bus.subscribe(DesktopTopic::VolumeChange, |_| {});
            }
        });

        assert_eq!(bus.publish(DesktopEvent::VolumeChange { volume: 0 }), 1);
        assert_eq!(mutes.get(), 1);
        assert_eq!(bus.subscriber_count(DesktopTopic::VolumeChange), 2);
    }

    #[test]
    fn wire_events_decode_and_clamp() {
        assert_eq!(
            DesktopEvent::from_wire("openWindow", json!({ "title": "Calculator" })).expect("open"),
            DesktopEvent::OpenWindow(OpenWindowRequest::new("Calculator"))
        );
        assert_eq!(
            DesktopEvent::from_wire("volumeChange", json!({ "volume": 150 })).expect("volume"),
            DesktopEvent::VolumeChange { volume: 100 }
        );
        assert_eq!(
            DesktopEvent::from_wire("volumeChange", json!({ "volume": -3.4 })).expect("volume"),
            DesktopEvent::VolumeChange { volume: 0 }
        );
        assert_eq!(
            DesktopEvent::from_wire("shutdown", Value::Null).expect("shutdown"),
            DesktopEvent::Shutdown
        );
        assert!(matches!(
            DesktopEvent::from_wire("reboot", Value::Null),
            Err(BusError::UnknownTopic(name)) if name == "reboot"
        ));
        assert!(matches!(
            DesktopEvent::from_wire("muteChange", json!({ "muted": "yes" })),
            Err(BusError::MalformedPayload {
                topic: DesktopTopic::MuteChange,
                ..
            })
        ));
    }

    #[test]
    fn events_encode_to_wire_names() {
        assert_eq!(
            DesktopEvent::MuteChange { muted: true }.to_wire(),
            ("muteChange", json!({ "muted": true }))
        );
        assert_eq!(
            DesktopEvent::OpenWindow(OpenWindowRequest::new("Notepad")).to_wire(),
            ("openWindow", json!({ "title": "Notepad" }))
        );
    }
}
