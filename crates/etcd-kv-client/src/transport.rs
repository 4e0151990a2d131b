use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use etcd_proto::etcdserverpb::kv_client::KvClient;
use etcd_proto::etcdserverpb::watch_client::WatchClient;
use etcd_proto::etcdserverpb::{
    DeleteRangeRequest, DeleteRangeResponse, PutRequest, PutResponse, RangeRequest,
    RangeResponse, WatchRequest, WatchResponse,
};
use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{async_trait, transport::Channel, Request, Status};
use tracing::debug;

/// Frames pushed by the server for one watch call.
pub type WatchFrames = Pin<Box<dyn Stream<Item = Result<WatchResponse, Status>> + Send>>;

/// The RPC channel the client issues its calls over.
///
/// Implementations must be cheap to clone; every clone talks to the same
/// store.
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    async fn range(&self, request: RangeRequest) -> Result<RangeResponse, Status>;

    async fn put(&self, request: PutRequest) -> Result<PutResponse, Status>;

    async fn delete_range(&self, request: DeleteRangeRequest)
        -> Result<DeleteRangeResponse, Status>;

    /// Opens a watch call and sends `request` as its only frame.
    ///
    /// The request half stays open while the returned frames are alive and is
    /// closed when they are dropped.
    async fn watch(&self, request: WatchRequest) -> Result<WatchFrames, Status>;
}

/// [`Transport`] over a tonic channel to a real etcd cluster.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    kv_client: KvClient<Channel>,
    watch_client: WatchClient<Channel>,
    timeout: Option<Duration>,
}

impl GrpcTransport {
    pub fn new(channel: Channel) -> Self {
        Self {
            kv_client: KvClient::new(channel.clone()),
            watch_client: WatchClient::new(channel),
            timeout: None,
        }
    }

    /// Sets a deadline for every unary call. Watches are not bounded.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn unary<R>(&self, message: R) -> Request<R> {
        let mut request = Request::new(message);
        if let Some(timeout) = self.timeout {
            request.set_timeout(timeout);
        }
        request
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn range(&self, request: RangeRequest) -> Result<RangeResponse, Status> {
        let request = self.unary(request);
        let response = self.kv_client.clone().range(request).await?;
        Ok(response.into_inner())
    }

    async fn put(&self, request: PutRequest) -> Result<PutResponse, Status> {
        let request = self.unary(request);
        let response = self.kv_client.clone().put(request).await?;
        Ok(response.into_inner())
    }

    async fn delete_range(
        &self,
        request: DeleteRangeRequest,
    ) -> Result<DeleteRangeResponse, Status> {
        let request = self.unary(request);
        let response = self.kv_client.clone().delete_range(request).await?;
        Ok(response.into_inner())
    }

    async fn watch(&self, request: WatchRequest) -> Result<WatchFrames, Status> {
        let (sender, receiver) = mpsc::channel(1);
        sender
            .try_send(request)
            .map_err(|_| Status::internal("watch request channel rejected the create frame"))?;
        let frames = self
            .watch_client
            .clone()
            .watch(ReceiverStream::new(receiver))
            .await?
            .into_inner();
        debug!("Opened watch call");
        Ok(Box::pin(GrpcWatchFrames {
            frames: Box::pin(frames),
            _requests: sender,
        }))
    }
}

/// Keeps the request half of the call open for as long as frames are read.
struct GrpcWatchFrames {
    frames: WatchFrames,
    _requests: mpsc::Sender<WatchRequest>,
}

impl Stream for GrpcWatchFrames {
    type Item = Result<WatchResponse, Status>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.frames.as_mut().poll_next(cx)
    }
}
