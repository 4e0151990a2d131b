use etcd_proto::etcdserverpb::PutRequest;
use tracing::{debug, warn};

use crate::ClientOptions;
use crate::DeleteQuery;
use crate::DeleteResult;
use crate::Error;
use crate::GrpcTransport;
use crate::Header;
use crate::RangeQuery;
use crate::RangeResult;
use crate::Result;
use crate::Transport;
use crate::WatchQuery;
use crate::WatchStream;

fn failed(operation: &'static str) -> impl FnOnce(tonic::Status) -> Error {
    move |status| {
        warn!(operation, %status, "Request failed");
        Error::from(status)
    }
}

/// Handle to an etcd cluster.
///
/// Every call other than [`watch`](Client::watch) is a single request and
/// keeps no state between calls. Clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct Client<T = GrpcTransport> {
    transport: T,
}

impl Client<GrpcTransport> {
    pub async fn connect(options: &ClientOptions) -> Result<Self> {
        let channel = options.channel().await?;
        let transport = GrpcTransport::new(channel).with_timeout(options.timeout());
        Ok(Self::new(transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Creates `key` or overwrites its value.
    pub async fn set(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<Header> {
        let request = PutRequest {
            key: key.as_ref().to_vec(),
            value: value.as_ref().to_vec(),
            ..Default::default()
        };
        debug!(key = %String::from_utf8_lossy(&request.key), "Put");
        let response = self.transport.put(request).await.map_err(failed("put"))?;
        Ok(Header::from_optional(response.header))
    }

    /// Same as [`set`](Client::set).
    pub async fn put(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<Header> {
        self.set(key, value).await
    }

    /// Value of `key`, `None` when it does not exist.
    pub async fn get(&self, key: impl AsRef<[u8]>) -> Result<Option<Vec<u8>>> {
        self.get_range(&RangeQuery::new(key.as_ref())).await
    }

    /// Value of the first key matched by `query`.
    pub async fn get_range(&self, query: &RangeQuery) -> Result<Option<Vec<u8>>> {
        let result = self.range(query).await?;
        Ok(result.kvs.into_iter().next().map(|kv| kv.value))
    }

    pub async fn range(&self, query: &RangeQuery) -> Result<RangeResult> {
        debug!(
            key = %String::from_utf8_lossy(&query.key),
            range_end = ?query.range_end().map(String::from_utf8_lossy),
            revision = query.revision,
            "Range"
        );
        let response = self
            .transport
            .range(query.clone().into())
            .await
            .map_err(failed("range"))?;
        Ok(response.into())
    }

    /// Removes `key`. Deleting a missing key is not an error.
    pub async fn delete(&self, key: impl AsRef<[u8]>) -> Result<()> {
        self.delete_range(&DeleteQuery::new(key.as_ref())).await?;
        Ok(())
    }

    pub async fn delete_range(&self, query: &DeleteQuery) -> Result<DeleteResult> {
        debug!(
            key = %String::from_utf8_lossy(&query.key),
            range_end = ?query.range_end().map(String::from_utf8_lossy),
            "Delete range"
        );
        let response = self
            .transport
            .delete_range(query.clone().into())
            .await
            .map_err(failed("delete_range"))?;
        Ok(response.into())
    }

    /// Watches `key` for changes made from now on.
    pub async fn watch(&self, key: impl AsRef<[u8]>) -> Result<WatchStream> {
        self.watch_with(WatchQuery::new(key.as_ref())).await
    }

    pub async fn watch_with(&self, query: WatchQuery) -> Result<WatchStream> {
        WatchStream::open(&self.transport, query).await
    }
}
