use etcd_proto::mvccpb::event::EventType;
use serde::{Deserialize, Serialize};

use crate::error::ProtocolViolation;
use crate::KeyValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// The key was created or overwritten.
    Put,
    /// The key was removed.
    Delete,
}

impl From<EventKind> for EventType {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Put => EventType::Put,
            EventKind::Delete => EventType::Delete,
        }
    }
}

impl TryFrom<i32> for EventKind {
    type Error = ProtocolViolation;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match EventType::from_i32(value) {
            Some(EventType::Put) => Ok(EventKind::Put),
            Some(EventType::Delete) => Ok(EventKind::Delete),
            None => Err(ProtocolViolation::UnknownEventType(value)),
        }
    }
}

/// One mutation observed by a watch.
///
/// For a delete, `current` holds the removed key with its modification
/// revision set to the revision of the deletion. `previous` is only present
/// when the watch asked for previous values and the server had one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: EventKind,
    pub current: KeyValue,
    pub previous: Option<KeyValue>,
}

impl ChangeEvent {
    pub fn put(current: KeyValue) -> Self {
        Self {
            kind: EventKind::Put,
            current,
            previous: None,
        }
    }

    pub fn delete(current: KeyValue) -> Self {
        Self {
            kind: EventKind::Delete,
            current,
            previous: None,
        }
    }

    pub fn with_previous(mut self, previous: KeyValue) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Whether this put created the key rather than overwriting it.
    pub fn is_create(&self) -> bool {
        self.kind == EventKind::Put && self.current.version == 1
    }
}

impl TryFrom<etcd_proto::mvccpb::Event> for ChangeEvent {
    type Error = ProtocolViolation;

    fn try_from(
        etcd_proto::mvccpb::Event {
            r#type,
            kv,
            prev_kv,
        }: etcd_proto::mvccpb::Event,
    ) -> Result<Self, Self::Error> {
        let kind = EventKind::try_from(r#type)?;
        let current = KeyValue::from(kv.ok_or(ProtocolViolation::MissingKeyValue)?);
        let previous = prev_kv.map(KeyValue::from);
        if let Some(previous) = &previous {
            if previous.key != current.key {
                return Err(ProtocolViolation::MismatchedPreviousKey);
            }
        }
        Ok(ChangeEvent {
            kind,
            current,
            previous,
        })
    }
}

impl From<ChangeEvent> for etcd_proto::mvccpb::Event {
    fn from(event: ChangeEvent) -> Self {
        etcd_proto::mvccpb::Event {
            r#type: EventType::from(event.kind) as i32,
            kv: Some(event.current.into()),
            prev_kv: event.previous.map(Into::into),
        }
    }
}
