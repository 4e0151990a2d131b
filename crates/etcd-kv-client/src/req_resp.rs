use etcd_proto::etcdserverpb::range_request;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Header;
use crate::KeyValue;

/// Computes the range end that selects every key starting with `prefix`.
///
/// The last byte below 0xff is incremented and everything after it dropped. A
/// prefix made only of 0xff bytes (or an empty one) has no upper bound, which
/// the server spells as `\0`.
pub fn prefix_range_end(prefix: &[u8]) -> Vec<u8> {
    match prefix.iter().rposition(|b| *b < 0xff) {
        Some(i) => {
            let mut end = prefix[..=i].to_vec();
            end[i] += 1;
            end
        }
        None => vec![0],
    }
}

/// Empty bytes on the wire mean "no range end".
pub(crate) fn range_end_to_wire(range_end: Option<Vec<u8>>) -> Vec<u8> {
    range_end.unwrap_or_default()
}

pub(crate) fn range_end_from_wire(range_end: Vec<u8>) -> Option<Vec<u8>> {
    if range_end.is_empty() {
        None
    } else {
        Some(range_end)
    }
}

pub(crate) fn deserialize_range_end<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let range_end = Option::<Vec<u8>>::deserialize(deserializer)?;
    Ok(range_end.and_then(range_end_from_wire))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    None,
    Ascend,
    Descend,
}

impl From<SortOrder> for range_request::SortOrder {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::None => range_request::SortOrder::None,
            SortOrder::Ascend => range_request::SortOrder::Ascend,
            SortOrder::Descend => range_request::SortOrder::Descend,
        }
    }
}

impl SortOrder {
    // unknown orders fall back to unsorted, matching the server
    fn from_wire(value: i32) -> Self {
        match range_request::SortOrder::from_i32(value) {
            Some(range_request::SortOrder::Ascend) => SortOrder::Ascend,
            Some(range_request::SortOrder::Descend) => SortOrder::Descend,
            Some(range_request::SortOrder::None) | None => SortOrder::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortTarget {
    #[default]
    Key,
    Version,
    CreateRevision,
    ModRevision,
    Value,
}

impl From<SortTarget> for range_request::SortTarget {
    fn from(target: SortTarget) -> Self {
        match target {
            SortTarget::Key => range_request::SortTarget::Key,
            SortTarget::Version => range_request::SortTarget::Version,
            SortTarget::CreateRevision => range_request::SortTarget::Create,
            SortTarget::ModRevision => range_request::SortTarget::Mod,
            SortTarget::Value => range_request::SortTarget::Value,
        }
    }
}

impl SortTarget {
    fn from_wire(value: i32) -> Self {
        match range_request::SortTarget::from_i32(value) {
            Some(range_request::SortTarget::Version) => SortTarget::Version,
            Some(range_request::SortTarget::Create) => SortTarget::CreateRevision,
            Some(range_request::SortTarget::Mod) => SortTarget::ModRevision,
            Some(range_request::SortTarget::Value) => SortTarget::Value,
            Some(range_request::SortTarget::Key) | None => SortTarget::Key,
        }
    }
}

/// A read of a single key or of the half-open range `[key, range_end)`.
///
/// Numeric options left at zero are disabled. The range end is never empty:
/// setting an empty one leaves just `key` selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    pub key: Vec<u8>,
    #[serde(default, deserialize_with = "deserialize_range_end")]
    range_end: Option<Vec<u8>>,
    pub limit: i64,
    /// Read as of this revision, zero for the latest.
    pub revision: i64,
    pub sort_order: SortOrder,
    pub sort_target: SortTarget,
    /// Allow a member-local, possibly stale, read.
    pub serializable: bool,
    pub keys_only: bool,
    pub count_only: bool,
    pub min_mod_revision: i64,
    pub max_mod_revision: i64,
    pub min_create_revision: i64,
    pub max_create_revision: i64,
}

impl RangeQuery {
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

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_revision(mut self, revision: i64) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_sort(mut self, order: SortOrder, target: SortTarget) -> Self {
        self.sort_order = order;
        self.sort_target = target;
        self
    }

    pub fn with_mod_revision_bounds(mut self, min: i64, max: i64) -> Self {
        self.min_mod_revision = min;
        self.max_mod_revision = max;
        self
    }

    pub fn with_create_revision_bounds(mut self, min: i64, max: i64) -> Self {
        self.min_create_revision = min;
        self.max_create_revision = max;
        self
    }

    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    pub fn keys_only(mut self) -> Self {
        self.keys_only = true;
        self
    }

    pub fn count_only(mut self) -> Self {
        self.count_only = true;
        self
    }
}

impl From<RangeQuery> for etcd_proto::etcdserverpb::RangeRequest {
    fn from(query: RangeQuery) -> Self {
        etcd_proto::etcdserverpb::RangeRequest {
            key: query.key,
            range_end: range_end_to_wire(query.range_end),
            limit: query.limit,
            revision: query.revision,
            sort_order: range_request::SortOrder::from(query.sort_order) as i32,
            sort_target: range_request::SortTarget::from(query.sort_target) as i32,
            serializable: query.serializable,
            keys_only: query.keys_only,
            count_only: query.count_only,
            min_mod_revision: query.min_mod_revision,
            max_mod_revision: query.max_mod_revision,
            min_create_revision: query.min_create_revision,
            max_create_revision: query.max_create_revision,
        }
    }
}

impl From<etcd_proto::etcdserverpb::RangeRequest> for RangeQuery {
    fn from(
        etcd_proto::etcdserverpb::RangeRequest {
            key,
            range_end,
            limit,
            revision,
            sort_order,
            sort_target,
            serializable,
            keys_only,
            count_only,
            min_mod_revision,
            max_mod_revision,
            min_create_revision,
            max_create_revision,
        }: etcd_proto::etcdserverpb::RangeRequest,
    ) -> Self {
        RangeQuery {
            key,
            range_end: range_end_from_wire(range_end),
            limit,
            revision,
            sort_order: SortOrder::from_wire(sort_order),
            sort_target: SortTarget::from_wire(sort_target),
            serializable,
            keys_only,
            count_only,
            min_mod_revision,
            max_mod_revision,
            min_create_revision,
            max_create_revision,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeResult {
    pub header: Header,
    pub kvs: Vec<KeyValue>,
    /// Whether the limit cut the result short.
    pub more: bool,
    /// Number of keys in the range, regardless of the limit.
    pub count: i64,
}

impl From<etcd_proto::etcdserverpb::RangeResponse> for RangeResult {
    fn from(response: etcd_proto::etcdserverpb::RangeResponse) -> Self {
        RangeResult {
            header: Header::from_optional(response.header),
            kvs: response.kvs.into_iter().map(KeyValue::from).collect(),
            more: response.more,
            count: response.count,
        }
    }
}

/// A delete of a single key or of the half-open range `[key, range_end)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteQuery {
    pub key: Vec<u8>,
    #[serde(default, deserialize_with = "deserialize_range_end")]
    range_end: Option<Vec<u8>>,
    /// Return the deleted key-values in the result.
    pub prev_kv: bool,
}

impl DeleteQuery {
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

    pub fn range_end(&self) -> Option<&[u8]> {
        self.range_end.as_deref()
    }

    pub fn with_prev_kv(mut self) -> Self {
        self.prev_kv = true;
        self
    }
}

impl From<DeleteQuery> for etcd_proto::etcdserverpb::DeleteRangeRequest {
    fn from(query: DeleteQuery) -> Self {
        etcd_proto::etcdserverpb::DeleteRangeRequest {
            key: query.key,
            range_end: range_end_to_wire(query.range_end),
            prev_kv: query.prev_kv,
        }
    }
}

impl From<etcd_proto::etcdserverpb::DeleteRangeRequest> for DeleteQuery {
    fn from(
        etcd_proto::etcdserverpb::DeleteRangeRequest {
            key,
            range_end,
            prev_kv,
        }: etcd_proto::etcdserverpb::DeleteRangeRequest,
    ) -> Self {
        DeleteQuery {
            key,
            range_end: range_end_from_wire(range_end),
            prev_kv,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub header: Header,
    pub deleted: i64,
    /// The deleted key-values, only filled when the query asked for them.
    pub previous: Vec<KeyValue>,
}

impl From<etcd_proto::etcdserverpb::DeleteRangeResponse> for DeleteResult {
    fn from(response: etcd_proto::etcdserverpb::DeleteRangeResponse) -> Self {
        DeleteResult {
            header: Header::from_optional(response.header),
            deleted: response.deleted,
            previous: response.prev_kvs.into_iter().map(KeyValue::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use etcd_proto::etcdserverpb::DeleteRangeRequest;
    use etcd_proto::etcdserverpb::RangeRequest;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn prefix_end_increments_last_byte() {
        assert_eq!(prefix_range_end(b"foo"), b"fop".to_vec());
        assert_eq!(prefix_range_end(b"a\xff"), b"b".to_vec());
        assert_eq!(prefix_range_end(b"\xff\xff"), vec![0]);
        assert_eq!(prefix_range_end(b""), vec![0]);
    }

    #[test]
    fn range_query_survives_the_wire() {
        let query = RangeQuery::new("key")
            .with_range_end("kez")
            .with_limit(10)
            .with_revision(42)
            .with_sort(SortOrder::Descend, SortTarget::ModRevision)
            .serializable()
            .keys_only()
            .count_only()
            .with_mod_revision_bounds(1, 2)
            .with_create_revision_bounds(3, 4);
        let wire = RangeRequest::from(query.clone());
        assert_eq!(wire.sort_order, 2);
        assert_eq!(wire.sort_target, 3);
        assert_eq!(RangeQuery::from(wire), query);
    }

    #[test]
    fn absent_range_end_is_empty_on_the_wire() {
        let query = RangeQuery::new("key");
        let wire = RangeRequest::from(query.clone());
        assert!(wire.range_end.is_empty());
        assert_eq!(RangeQuery::from(wire).range_end(), None);
        assert_eq!(RangeQuery::from(RangeRequest::from(query.clone())), query);

        let query = DeleteQuery::new("key");
        let wire = DeleteRangeRequest::from(query.clone());
        assert!(wire.range_end.is_empty());
        assert_eq!(DeleteQuery::from(wire), query);
    }

    #[test]
    fn empty_range_end_cannot_be_built() {
        let range = RangeQuery::new("k").with_range_end(Vec::new());
        assert_eq!(range.range_end(), None);
        assert_eq!(RangeQuery::from(RangeRequest::from(range.clone())), range);

        let delete = DeleteQuery::new("k").with_range_end(Vec::new());
        assert_eq!(delete.range_end(), None);
        assert_eq!(DeleteQuery::from(DeleteRangeRequest::from(delete.clone())), delete);

        let mut json = serde_json::to_value(RangeQuery::new("k")).unwrap();
        json["range_end"] = serde_json::json!([]);
        let range: RangeQuery = serde_json::from_value(json).unwrap();
        assert_eq!(range.range_end(), None);
        assert_eq!(RangeQuery::from(RangeRequest::from(range.clone())), range);

        let delete: DeleteQuery =
            serde_json::from_str(r#"{"key":[107],"range_end":[],"prev_kv":true}"#).unwrap();
        assert_eq!(delete.range_end(), None);
        assert_eq!(DeleteQuery::from(DeleteRangeRequest::from(delete.clone())), delete);
    }

    #[test]
    fn range_end_survives_serde() {
        let query = RangeQuery::prefix("dir/");
        let json = serde_json::to_string(&query).unwrap();
        let back: RangeQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
        assert_eq!(back.range_end(), Some(&b"dir0"[..]));
    }

    #[test]
    fn unknown_sort_values_fall_back_to_defaults() {
        let wire = RangeRequest {
            key: b"k".to_vec(),
            sort_order: 17,
            sort_target: -1,
            ..Default::default()
        };
        let query = RangeQuery::from(wire);
        assert_eq!(query.sort_order, SortOrder::None);
        assert_eq!(query.sort_target, SortTarget::Key);
    }

    #[test]
    fn delete_query_survives_the_wire() {
        let query = DeleteQuery::prefix("dir/").with_prev_kv();
        assert_eq!(query.range_end(), Some(&b"dir0"[..]));
        let wire = DeleteRangeRequest::from(query.clone());
        assert!(wire.prev_kv);
        assert_eq!(DeleteQuery::from(wire), query);
    }

    #[test]
    fn range_response_decodes_every_entry() {
        let response = etcd_proto::etcdserverpb::RangeResponse {
            header: None,
            kvs: vec![
                etcd_proto::mvccpb::KeyValue {
                    key: b"a".to_vec(),
                    value: b"1".to_vec(),
                    create_revision: 1,
                    mod_revision: 1,
                    version: 1,
                    lease: 0,
                },
                etcd_proto::mvccpb::KeyValue {
                    key: b"b".to_vec(),
                    value: b"2".to_vec(),
                    create_revision: 2,
                    mod_revision: 3,
                    version: 2,
                    lease: 0,
                },
            ],
            more: true,
            count: 5,
        };
        let result = RangeResult::from(response);
        assert_eq!(
            result.kvs,
            vec![
                KeyValue::new("a", "1").with_revisions(1, 1, 1),
                KeyValue::new("b", "2").with_revisions(2, 3, 2),
            ]
        );
        assert!(result.more);
        assert_eq!(result.count, 5);
    }
}
