//! A client for the etcd v3 key-value and watch APIs.
//!
//! ```no_run
//! # async fn run() -> etcd_kv_client::Result<()> {
//! use etcd_kv_client::{Client, ClientOptions};
//!
//! let client = Client::connect(&ClientOptions::default()).await?;
//! client.set("foo", "bar").await?;
//! assert_eq!(client.get("foo").await?, Some(b"bar".to_vec()));
//!
//! let mut watch = client.watch("foo").await?;
//! while let Some(batch) = watch.message().await? {
//!     for event in batch {
//!         println!("{:?} {:?}", event.kind, event.current);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod address;
mod client;
mod error;
mod event;
mod kv;
mod options;
mod req_resp;
mod transport;
mod watch;

pub use address::Address;
pub use address::Scheme;
pub use client::Client;
pub use error::Error;
pub use error::ProtocolViolation;
pub use error::Result;
pub use event::ChangeEvent;
pub use event::EventKind;
pub use kv::Header;
pub use kv::KeyValue;
pub use options::ClientOptions;
pub use req_resp::prefix_range_end;
pub use req_resp::DeleteQuery;
pub use req_resp::DeleteResult;
pub use req_resp::RangeQuery;
pub use req_resp::RangeResult;
pub use req_resp::SortOrder;
pub use req_resp::SortTarget;
pub use transport::GrpcTransport;
pub use transport::Transport;
pub use transport::WatchFrames;
pub use watch::Termination;
pub use watch::WatchQuery;
pub use watch::WatchStream;

pub use etcd_proto as proto;
