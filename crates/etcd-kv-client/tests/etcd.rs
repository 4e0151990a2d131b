//! Runs against a real etcd listening on 127.0.0.1:2379.
//!
//! Start one with `etcd` and run `cargo test -- --ignored`.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use etcd_kv_client::Client;
use etcd_kv_client::ClientOptions;
use etcd_kv_client::EventKind;
use etcd_kv_client::WatchQuery;
use pretty_assertions::assert_eq;
use test_log::test;

static KEY_COUNT: AtomicUsize = AtomicUsize::new(0);

fn key() -> String {
    let i = KEY_COUNT.fetch_add(1, Ordering::SeqCst);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("etcd-kv-client-test/{now}/{i}")
}

#[test(tokio::test)]
#[ignore]
async fn set_get_watch_delete() {
    let client = Client::connect(&ClientOptions::default()).await.unwrap();
    let key = key();

    client.set(&key, "bar").await.unwrap();
    assert_eq!(client.get(&key).await.unwrap(), Some(b"bar".to_vec()));

    let mut watch = client
        .watch_with(WatchQuery::new(key.as_str()).with_prev_kv())
        .await
        .unwrap();
    client.put(&key, "bar2").await.unwrap();
    let batch = watch.message().await.unwrap().unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].current.value, b"bar2".to_vec());
    assert_eq!(batch[0].previous.as_ref().map(|kv| kv.value.clone()), Some(b"bar".to_vec()));

    client.delete(&key).await.unwrap();
    let batch = watch.message().await.unwrap().unwrap();
    assert_eq!(batch[0].kind, EventKind::Delete);
    assert_eq!(client.get(&key).await.unwrap(), None);
    watch.close();
}
