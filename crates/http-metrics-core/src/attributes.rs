//! Attribute model attached to every measurement.

use std::fmt;

use indexmap::IndexMap;

/// Attribute keys, following the HTTP semantic conventions where one exists.
pub mod keys {
    pub const URL_SCHEME: &str = "url.scheme";
    pub const HTTP_REQUEST_METHOD: &str = "http.request.method";
    pub const HTTP_ROUTE: &str = "http.route";
    pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";
    pub const NETWORK_PROTOCOL_VERSION: &str = "network.protocol.version";
    pub const HTTP_HOST: &str = "http.host";
    pub const HTTP_USER_AGENT: &str = "http.user_agent";
    pub const ERROR_TYPE: &str = "error.type";

    pub const TENANT_ID: &str = "tenant.id";
    pub const SITE_ID: &str = "site.id";
    pub const ENVIRONMENT: &str = "environment";
    pub const SCALE_UNIT_ID: &str = "scale_unit_id";
    pub const NAMESPACE_NAME: &str = "namespace.name";
}

/// A scalar or array attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    String(String),
    Int(i64),
    StringArray(Vec<String>),
}

impl AttributeValue {
    /// Returns the value as a str if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an i64 if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the values if this is a string array.
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            AttributeValue::StringArray(values) => Some(values),
            _ => None,
        }
    }
}

/// Arrays render comma separated, which is what label-only backends get.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::StringArray(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<u16> for AttributeValue {
    fn from(value: u16) -> Self {
        AttributeValue::Int(i64::from(value))
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::StringArray(values)
    }
}

/// Ordered attribute map built fresh for each measurement.
///
/// Keys keep the position of their first insertion; a later `put` for the
/// same key replaces the value (last write wins).
///
/// # Example
///
/// ```
/// use http_metrics_core::AttributeSet;
///
/// let mut attrs = AttributeSet::new();
/// attrs.put("http.request.method", "GET");
/// attrs.put("http.request.method", "POST");
///
/// assert_eq!(attrs.len(), 1);
/// assert_eq!(attrs.get("http.request.method").and_then(|v| v.as_str()), Some("POST"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: IndexMap<String, AttributeValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `key`.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Inserts `key` only when it holds no value yet. Returns true if written.
    pub fn put_if_absent(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value.into());
        true
    }

    /// Inserts `key` when `value` is present; `None` leaves the set untouched.
    pub fn put_opt<V: Into<AttributeValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.put(key, value);
        }
        self
    }

    /// Puts every entry of `other`, in order.
    pub fn merge(&mut self, other: &AttributeSet) -> &mut Self {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.get(key)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeSet
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for (key, value) in iter {
            set.put(key, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Process-wide labels attached to every measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentTags {
    pub environment: String,
    pub scale_unit_id: String,
    pub namespace: String,
}

impl EnvironmentTags {
    pub fn new(
        environment: impl Into<String>,
        scale_unit_id: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            environment: environment.into(),
            scale_unit_id: scale_unit_id.into(),
            namespace: namespace.into(),
        }
    }

    pub fn to_attributes(&self) -> AttributeSet {
        let mut attrs = AttributeSet::new();
        attrs
            .put(keys::ENVIRONMENT, self.environment.as_str())
            .put(keys::SCALE_UNIT_ID, self.scale_unit_id.as_str())
            .put(keys::NAMESPACE_NAME, self.namespace.as_str());
        attrs
    }
}

impl Default for EnvironmentTags {
    fn default() -> Self {
        Self::new("local", "development", "local-development")
    }
}
