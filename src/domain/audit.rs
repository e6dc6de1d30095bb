//! Structured audit records.
//!
//! An audit record is a field→value mapping tagged with `operation` and
//! `action` discriminators, destined for a dedicated audit sink. At emission
//! it is augmented with `target` (owner identity), `datetime` and `level` —
//! but only for fields the caller has not already supplied (first-write-wins).
//! Serialization uses a `BTreeMap`, so the JSON output has a canonical sorted
//! key order that downstream log processors can rely on.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Reserved field: the kind of entity an action applies to.
pub const FIELD_OPERATION: &str = "operation";
/// Reserved field: the action performed on the entity.
pub const FIELD_ACTION: &str = "action";
/// Reserved field: the owner identity of the emitting logger.
pub const FIELD_TARGET: &str = "target";
/// Reserved field: the emission timestamp.
pub const FIELD_DATETIME: &str = "datetime";
/// Reserved field: the emission severity label.
pub const FIELD_LEVEL: &str = "level";

/// `chrono` format string for the `datetime` field: UTC, millisecond
/// precision. Stable across all emitters.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A structured audit entry: an order-irrelevant field→value mapping.
///
/// # Examples
/// ```
/// use logward::AuditRecord;
///
/// let record = AuditRecord::new("user", "create")
///     .field("user_id", "u1")
///     .field("creator_id", "admin");
/// assert_eq!(record.get("operation"), Some("user"));
/// assert_eq!(record.get("user_id"), Some("u1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuditRecord {
    fields: BTreeMap<Cow<'static, str>, String>,
}

impl AuditRecord {
    /// Create a record seeded with the `operation` and `action` discriminators.
    pub fn new(operation: impl Into<String>, action: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(Cow::Borrowed(FIELD_OPERATION), operation.into());
        fields.insert(Cow::Borrowed(FIELD_ACTION), action.into());
        AuditRecord { fields }
    }

    /// Add a caller-supplied field, replacing any previous value for the name.
    ///
    /// Caller fields round-trip unchanged through serialization; supplying a
    /// reserved name here takes precedence over emission-time augmentation.
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field only if the caller has not already supplied it.
    ///
    /// Used for the emission-time augmentation of `target`, `datetime` and
    /// `level` (first-write-wins).
    pub fn set_if_absent(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the fields in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Serialize to canonical JSON (sorted keys).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }
}
