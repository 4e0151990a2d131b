//! An in-memory store speaking the same messages as etcd, enough to drive the
//! client end to end.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use etcd_kv_client::proto::etcdserverpb::watch_request::RequestUnion;
use etcd_kv_client::proto::etcdserverpb::DeleteRangeRequest;
use etcd_kv_client::proto::etcdserverpb::DeleteRangeResponse;
use etcd_kv_client::proto::etcdserverpb::PutRequest;
use etcd_kv_client::proto::etcdserverpb::PutResponse;
use etcd_kv_client::proto::etcdserverpb::RangeRequest;
use etcd_kv_client::proto::etcdserverpb::RangeResponse;
use etcd_kv_client::proto::etcdserverpb::ResponseHeader;
use etcd_kv_client::proto::etcdserverpb::WatchRequest;
use etcd_kv_client::proto::etcdserverpb::WatchResponse;
use etcd_kv_client::proto::mvccpb;
use etcd_kv_client::proto::mvccpb::event::EventType;
use etcd_kv_client::Transport;
use etcd_kv_client::WatchFrames;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tonic::async_trait;
use tonic::Status;

type FrameSender = mpsc::UnboundedSender<Result<WatchResponse, Status>>;

struct Watcher {
    id: i64,
    key: Vec<u8>,
    range_end: Vec<u8>,
    prev_kv: bool,
    sender: FrameSender,
}

#[derive(Default)]
struct Inner {
    revision: i64,
    kvs: BTreeMap<Vec<u8>, mvccpb::KeyValue>,
    watchers: Vec<Watcher>,
    next_watch_id: i64,
    watch_requests: Vec<WatchRequest>,
}

fn in_range(key: &[u8], start: &[u8], end: &[u8]) -> bool {
    if end.is_empty() {
        key == start
    } else if end == [0] {
        key >= start
    } else {
        key >= start && key < end
    }
}

impl Inner {
    fn header(&self) -> Option<ResponseHeader> {
        Some(ResponseHeader {
            cluster_id: 1,
            member_id: 1,
            revision: self.revision,
            raft_term: 1,
        })
    }

    fn notify(&mut self, events: Vec<(mvccpb::KeyValue, Option<mvccpb::KeyValue>, EventType)>) {
        let header = self.header();
        self.watchers.retain(|watcher| {
            let events: Vec<mvccpb::Event> = events
                .iter()
                .filter(|(kv, _, _)| in_range(&kv.key, &watcher.key, &watcher.range_end))
                .map(|(kv, prev, ty)| mvccpb::Event {
                    r#type: *ty as i32,
                    kv: Some(kv.clone()),
                    prev_kv: if watcher.prev_kv { prev.clone() } else { None },
                })
                .collect();
            if events.is_empty() {
                return !watcher.sender.is_closed();
            }
            watcher
                .sender
                .send(Ok(WatchResponse {
                    header: header.clone(),
                    watch_id: watcher.id,
                    events,
                    ..Default::default()
                }))
                .is_ok()
        });
    }
}

/// Shared in-memory store, every clone sees the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn revision(&self) -> i64 {
        self.inner.lock().unwrap().revision
    }

    /// Watchers whose client side is still open.
    pub fn open_watchers(&self) -> usize {
        let mut inner = self.inner.lock().unwrap();
        inner.watchers.retain(|w| !w.sender.is_closed());
        inner.watchers.len()
    }

    pub fn watch_requests(&self) -> Vec<WatchRequest> {
        self.inner.lock().unwrap().watch_requests.clone()
    }

    /// Cancels every watch as the server would after a compaction.
    pub fn cancel_watches(&self, reason: &str, compact_revision: i64) {
        let mut inner = self.inner.lock().unwrap();
        let header = inner.header();
        for watcher in inner.watchers.drain(..) {
            let _ = watcher.sender.send(Ok(WatchResponse {
                header: header.clone(),
                watch_id: watcher.id,
                canceled: true,
                cancel_reason: reason.to_owned(),
                compact_revision,
                ..Default::default()
            }));
        }
    }

    /// Fails every open watch with `status`.
    pub fn break_watches(&self, status: Status) {
        let mut inner = self.inner.lock().unwrap();
        for watcher in inner.watchers.drain(..) {
            let _ = watcher.sender.send(Err(status.clone()));
        }
    }
}

#[async_trait]
impl Transport for MemoryStore {
    async fn range(&self, request: RangeRequest) -> Result<RangeResponse, Status> {
        let inner = self.inner.lock().unwrap();
        let matching: Vec<mvccpb::KeyValue> = inner
            .kvs
            .values()
            .filter(|kv| in_range(&kv.key, &request.key, &request.range_end))
            .cloned()
            .collect();
        let count = matching.len() as i64;
        let limit = if request.limit > 0 {
            request.limit as usize
        } else {
            matching.len()
        };
        let more = matching.len() > limit;
        let kvs = if request.count_only {
            Vec::new()
        } else {
            matching.into_iter().take(limit).collect()
        };
        Ok(RangeResponse {
            header: inner.header(),
            kvs,
            more,
            count,
        })
    }

    async fn put(&self, request: PutRequest) -> Result<PutResponse, Status> {
        if request.key.is_empty() {
            return Err(Status::invalid_argument("etcdserver: key is not provided"));
        }
        let mut inner = self.inner.lock().unwrap();
        inner.revision += 1;
        let revision = inner.revision;
        let prev = inner.kvs.get(&request.key).cloned();
        let kv = mvccpb::KeyValue {
            key: request.key.clone(),
            create_revision: prev.as_ref().map_or(revision, |p| p.create_revision),
            mod_revision: revision,
            version: prev.as_ref().map_or(1, |p| p.version + 1),
            value: request.value,
            lease: request.lease,
        };
        inner.kvs.insert(request.key, kv.clone());
        inner.notify(vec![(kv, prev.clone(), EventType::Put)]);
        Ok(PutResponse {
            header: inner.header(),
            prev_kv: if request.prev_kv { prev } else { None },
        })
    }

    async fn delete_range(
        &self,
        request: DeleteRangeRequest,
    ) -> Result<DeleteRangeResponse, Status> {
        let mut inner = self.inner.lock().unwrap();
        let keys: Vec<Vec<u8>> = inner
            .kvs
            .keys()
            .filter(|k| in_range(k, &request.key, &request.range_end))
            .cloned()
            .collect();
        if keys.is_empty() {
            return Ok(DeleteRangeResponse {
                header: inner.header(),
                deleted: 0,
                prev_kvs: Vec::new(),
            });
        }
        inner.revision += 1;
        let revision = inner.revision;
        let mut prev_kvs = Vec::new();
        let mut events = Vec::new();
        for key in keys {
            if let Some(prev) = inner.kvs.remove(&key) {
                let tombstone = mvccpb::KeyValue {
                    key,
                    mod_revision: revision,
                    ..Default::default()
                };
                events.push((tombstone, Some(prev.clone()), EventType::Delete));
                prev_kvs.push(prev);
            }
        }
        inner.notify(events);
        Ok(DeleteRangeResponse {
            header: inner.header(),
            deleted: prev_kvs.len() as i64,
            prev_kvs: if request.prev_kv { prev_kvs } else { Vec::new() },
        })
    }

    async fn watch(&self, request: WatchRequest) -> Result<WatchFrames, Status> {
        let mut inner = self.inner.lock().unwrap();
        inner.watch_requests.push(request.clone());
        let Some(RequestUnion::CreateRequest(create)) = request.request_union else {
            return Err(Status::invalid_argument("first watch frame must create"));
        };
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = inner.next_watch_id;
        inner.next_watch_id += 1;
        let header = inner.header();
        let _ = sender.send(Ok(WatchResponse {
            header,
            watch_id: id,
            created: true,
            ..Default::default()
        }));
        inner.watchers.push(Watcher {
            id,
            key: create.key,
            range_end: create.range_end,
            prev_kv: create.prev_kv,
            sender,
        });
        Ok(Box::pin(UnboundedReceiverStream::new(receiver)))
    }
}
