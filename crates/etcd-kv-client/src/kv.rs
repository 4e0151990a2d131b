use serde::Deserialize;
use serde::Serialize;

/// One stored entry, as returned by a range or carried in a watch event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    /// Revision at which the key was last created.
    pub create_revision: i64,
    /// Revision of the last modification of the key.
    pub mod_revision: i64,
    /// Incremented on every modification, reset to zero on deletion.
    pub version: i64,
    /// Attached lease, zero for none.
    pub lease: i64,
}

impl KeyValue {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_revisions(mut self, create_revision: i64, mod_revision: i64, version: i64) -> Self {
        self.create_revision = create_revision;
        self.mod_revision = mod_revision;
        self.version = version;
        self
    }

    pub fn with_lease(mut self, lease: i64) -> Self {
        self.lease = lease;
        self
    }

    pub fn lease_id(&self) -> Option<i64> {
        if self.lease == 0 {
            None
        } else {
            Some(self.lease)
        }
    }
}

impl From<etcd_proto::mvccpb::KeyValue> for KeyValue {
    fn from(
        etcd_proto::mvccpb::KeyValue {
            key,
            create_revision,
            mod_revision,
            version,
            value,
            lease,
        }: etcd_proto::mvccpb::KeyValue,
    ) -> Self {
        KeyValue {
            key,
            value,
            create_revision,
            mod_revision,
            version,
            lease,
        }
    }
}

impl From<KeyValue> for etcd_proto::mvccpb::KeyValue {
    fn from(kv: KeyValue) -> Self {
        etcd_proto::mvccpb::KeyValue {
            key: kv.key,
            create_revision: kv.create_revision,
            mod_revision: kv.mod_revision,
            version: kv.version,
            value: kv.value,
            lease: kv.lease,
        }
    }
}

/// Metadata the server attaches to every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    pub cluster_id: u64,
    pub member_id: u64,
    pub revision: i64,
    pub raft_term: u64,
}

impl From<etcd_proto::etcdserverpb::ResponseHeader> for Header {
    fn from(h: etcd_proto::etcdserverpb::ResponseHeader) -> Self {
        Header {
            cluster_id: h.cluster_id,
            member_id: h.member_id,
            revision: h.revision,
            raft_term: h.raft_term,
        }
    }
}

impl Header {
    pub(crate) fn from_optional(header: Option<etcd_proto::etcdserverpb::ResponseHeader>) -> Self {
        header.map(Header::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn key_value_from_wire_is_verbatim() {
        let wire = etcd_proto::mvccpb::KeyValue {
            key: b"foo".to_vec(),
            create_revision: 2,
            mod_revision: i64::MAX,
            version: 9,
            value: b"bar".to_vec(),
            lease: 1234,
        };
        let kv = KeyValue::from(wire.clone());
        assert_eq!(
            kv,
            KeyValue::new("foo", "bar")
                .with_revisions(2, i64::MAX, 9)
                .with_lease(1234)
        );
        assert_eq!(etcd_proto::mvccpb::KeyValue::from(kv), wire);
    }

    #[test]
    fn zero_lease_is_no_lease() {
        assert_eq!(KeyValue::new("a", "b").lease_id(), None);
        assert_eq!(KeyValue::new("a", "b").with_lease(3).lease_id(), Some(3));
    }

    #[test]
    fn missing_header_defaults() {
        assert_eq!(Header::from_optional(None), Header::default());
        let header = Header::from_optional(Some(etcd_proto::etcdserverpb::ResponseHeader {
            cluster_id: 1,
            member_id: 2,
            revision: 3,
            raft_term: 4,
        }));
        assert_eq!(header.revision, 3);
        assert_eq!(header.raft_term, 4);
    }
}
