//! Protobuf messages and gRPC client stubs for the etcd v3 `KV` and `Watch`
//! services.
//!
//! The modules are generated from `rpc.proto` and `kv.proto` and checked in so
//! that building does not need `protoc`. Only the messages used by the client
//! are kept.

#[allow(clippy::all)]
pub mod etcdserverpb;
#[allow(clippy::all)]
pub mod mvccpb;
