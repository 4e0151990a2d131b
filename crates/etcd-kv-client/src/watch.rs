//! The watch protocol, seen from the client.
//!
//! A [`WatchStream`] is created by sending one create frame and then moves
//! through three states:
//!
//! - awaiting the acknowledgement, which must carry no events;
//! - active, yielding one batch per data frame until the server cancels;
//! - closed, after which every pull returns `None` without touching the
//!   underlying call.
//!
//! Nothing is buffered in the background. A frame is only read while the
//! caller is polling for the next batch.

use std::{
    fmt,
    pin::Pin,
    task::{ready, Context, Poll},
};

use etcd_proto::etcdserverpb::watch_request::RequestUnion;
use etcd_proto::etcdserverpb::WatchCreateRequest;
use etcd_proto::etcdserverpb::WatchRequest;
use etcd_proto::etcdserverpb::WatchResponse;
use futures::Stream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ProtocolViolation;
use crate::prefix_range_end;
use crate::req_resp::{deserialize_range_end, range_end_from_wire, range_end_to_wire};
use crate::ChangeEvent;
use crate::Result;
use crate::Transport;
use crate::WatchFrames;

/// What a watch subscribes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchQuery {
    pub key: Vec<u8>,
    #[serde(default, deserialize_with = "deserialize_range_end")]
    range_end: Option<Vec<u8>>,
    /// Ask the server to attach the previous key-value to each event.
    pub prev_kv: bool,
    /// First revision to deliver, zero for changes from now on.
    pub start_revision: i64,
    /// Ask for periodic empty frames while idle.
    pub progress_notify: bool,
    /// Allow the server to split large batches over several frames.
    pub fragment: bool,
}

impl WatchQuery {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn prefix(prefix: impl Into<Vec<u8>>) -> Self {
        let key = prefix.into();
        let range_end = prefix_range_end(&key);
        Self::new(key).with_range_end(range_end)
    }

    pub fn with_range_end(mut self, range_end: impl Into<Vec<u8>>) -> Self {
        self.range_end = range_end_from_wire(range_end.into());
        self
    }

    /// End of the half-open range `[key, range_end)`, `None` for just `key`.
    pub fn range_end(&self) -> Option<&[u8]> {
        self.range_end.as_deref()
    }

    pub fn with_prev_kv(mut self) -> Self {
        self.prev_kv = true;
        self
    }

    pub fn with_start_revision(mut self, revision: i64) -> Self {
        self.start_revision = revision;
        self
    }

    pub fn with_progress_notify(mut self) -> Self {
        self.progress_notify = true;
        self
    }

    pub fn with_fragment(mut self) -> Self {
        self.fragment = true;
        self
    }
}

impl From<WatchQuery> for WatchRequest {
    fn from(query: WatchQuery) -> Self {
        WatchRequest {
            request_union: Some(RequestUnion::CreateRequest(WatchCreateRequest {
                key: query.key,
                range_end: range_end_to_wire(query.range_end),
                start_revision: query.start_revision,
                progress_notify: query.progress_notify,
                filters: Vec::new(),
                prev_kv: query.prev_kv,
                watch_id: 0,
                fragment: query.fragment,
            })),
        }
    }
}

/// Why a [`WatchStream`] stopped yielding batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The server cancelled the watch. A non-zero `compact_revision` means the
    /// requested start revision has already been compacted away.
    Cancelled {
        reason: String,
        compact_revision: i64,
    },
    /// The server finished the call without cancelling the watch.
    StreamEnded,
    /// The caller closed the watch.
    Closed,
    /// A transport error or protocol violation was returned.
    Failed,
}

enum State {
    AwaitingAck(WatchFrames),
    Active(WatchFrames),
    Closed,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::AwaitingAck(_) => "awaiting_ack",
            State::Active(_) => "active",
            State::Closed => "closed",
        }
    }
}

/// A live watch, yielding batches of events in the order the server sent
/// them.
///
/// The stream is not restartable: once it has returned `None` it keeps doing
/// so. Dropping it, or calling [`close`](WatchStream::close), closes the
/// underlying call.
pub struct WatchStream {
    state: State,
    watch_id: Option<i64>,
    last_revision: i64,
    fragments: Vec<ChangeEvent>,
    termination: Option<Termination>,
}

impl fmt::Debug for WatchStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchStream")
            .field("state", &self.state.name())
            .field("watch_id", &self.watch_id)
            .field("last_revision", &self.last_revision)
            .field("termination", &self.termination)
            .finish()
    }
}

impl WatchStream {
    /// Opens a watch call on `transport` and sends the create frame for
    /// `query`.
    pub(crate) async fn open<T: Transport>(transport: &T, query: WatchQuery) -> Result<Self> {
        debug!(
            key = %String::from_utf8_lossy(&query.key),
            start_revision = query.start_revision,
            prev_kv = query.prev_kv,
            "Opening watch"
        );
        let frames = transport.watch(query.into()).await.map_err(|status| {
            warn!(%status, "Failed to open watch");
            status
        })?;
        Ok(Self::new(frames))
    }

    /// Wraps the frames of a call whose create frame has already been sent.
    pub fn new(frames: WatchFrames) -> Self {
        Self {
            state: State::AwaitingAck(frames),
            watch_id: None,
            last_revision: 0,
            fragments: Vec::new(),
            termination: None,
        }
    }

    /// Server assigned id, known once the watch has been acknowledged.
    pub fn watch_id(&self) -> Option<i64> {
        self.watch_id
    }

    /// Highest store revision seen in any frame header.
    pub fn last_revision(&self) -> i64 {
        self.last_revision
    }

    /// Set once the stream has ended.
    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// Stops the watch and releases the underlying call without waiting on
    /// any outstanding read.
    pub fn close(&mut self) {
        if !self.is_closed() {
            debug!(watch_id = ?self.watch_id, "Closing watch");
        }
        self.finish(Termination::Closed);
    }

    /// Waits for the next batch, `None` once the watch has ended.
    pub async fn message(&mut self) -> Result<Option<Vec<ChangeEvent>>> {
        self.next().await.transpose()
    }

    fn finish(&mut self, termination: Termination) {
        self.state = State::Closed;
        self.fragments.clear();
        if self.termination.is_none() {
            self.termination = Some(termination);
        }
    }

    fn cancelled(&mut self, frame: WatchResponse) {
        debug!(
            watch_id = frame.watch_id,
            reason = %frame.cancel_reason,
            compact_revision = frame.compact_revision,
            "Watch cancelled by server"
        );
        self.finish(Termination::Cancelled {
            reason: frame.cancel_reason,
            compact_revision: frame.compact_revision,
        });
    }

    /// Applies one frame, returning a batch when one is complete.
    fn handle(
        &mut self,
        frame: WatchResponse,
    ) -> std::result::Result<Option<Vec<ChangeEvent>>, ProtocolViolation> {
        if let Some(header) = &frame.header {
            self.last_revision = self.last_revision.max(header.revision);
        }
        match self.state {
            State::AwaitingAck(_) => {
                if frame.created {
                    if !frame.events.is_empty() {
                        return Err(ProtocolViolation::CreatedWithEvents {
                            watch_id: frame.watch_id,
                            count: frame.events.len(),
                        });
                    }
                    self.watch_id = Some(frame.watch_id);
                    if frame.canceled {
                        // creation refused, e.g. start revision compacted
                        self.cancelled(frame);
                        return Ok(None);
                    }
                    debug!(watch_id = frame.watch_id, "Watch acknowledged");
                    if let State::AwaitingAck(frames) =
                        std::mem::replace(&mut self.state, State::Closed)
                    {
                        self.state = State::Active(frames);
                    }
                    Ok(None)
                } else if frame.canceled {
                    self.cancelled(frame);
                    Ok(None)
                } else if !frame.events.is_empty() {
                    Err(ProtocolViolation::EventsBeforeCreated {
                        count: frame.events.len(),
                    })
                } else {
                    Ok(None)
                }
            }
            State::Active(_) => {
                if frame.created {
                    return Err(ProtocolViolation::DuplicateCreated {
                        watch_id: frame.watch_id,
                    });
                }
                if frame.canceled {
                    self.cancelled(frame);
                    return Ok(None);
                }
                for event in frame.events {
                    self.fragments.push(ChangeEvent::try_from(event)?);
                }
                if frame.fragment || self.fragments.is_empty() {
                    // more fragments to come, or a progress notification
                    return Ok(None);
                }
                Ok(Some(std::mem::take(&mut self.fragments)))
            }
            State::Closed => Ok(None),
        }
    }
}

impl Stream for WatchStream {
    type Item = Result<Vec<ChangeEvent>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            let frames = match &mut this.state {
                State::AwaitingAck(frames) | State::Active(frames) => frames,
                State::Closed => return Poll::Ready(None),
            };
            let frame = match ready!(frames.as_mut().poll_next(cx)) {
                Some(Ok(frame)) => frame,
                Some(Err(status)) => {
                    warn!(watch_id = ?this.watch_id, %status, "Watch failed to read frame");
                    this.finish(Termination::Failed);
                    return Poll::Ready(Some(Err(status.into())));
                }
                None => {
                    debug!(watch_id = ?this.watch_id, "Watch call ended");
                    this.finish(Termination::StreamEnded);
                    return Poll::Ready(None);
                }
            };
            match this.handle(frame) {
                Ok(Some(batch)) => return Poll::Ready(Some(Ok(batch))),
                Ok(None) => continue,
                Err(violation) => {
                    warn!(watch_id = ?this.watch_id, %violation, "Watch protocol violation");
                    this.finish(Termination::Failed);
                    return Poll::Ready(Some(Err(violation.into())));
                }
            }
        }
    }
}
