use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Raw survey-response dataset as delivered by the backend.
///
/// Entries stay unparsed until the loader validates them one by one, so a
/// single entry of the wrong shape cannot fail the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub questions: Vec<Box<RawValue>>,
}

/// One entry of the raw dataset. Every part may be missing, and leaf values
/// are kept as plain JSON so their types are checked during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<KeyedMap<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<QuestionStats>,
}

/// Question identity: `var` is the variable name, `txt` the wording.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt: Option<Value>,
}

/// Per-option marginal statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<KeyedMap<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<KeyedMap<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
}

/// A JSON object keyed by option key whose members may be absent or `null`.
///
/// Entries keep document order; [`KeyedMap::keys`] yields them in JavaScript
/// property order (array-index keys ascending first, then the rest in
/// insertion order), which is the order answers are displayed in.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedMap<V> {
    entries: Vec<(String, Option<V>)>,
}

impl<V> Default for KeyedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> KeyedMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a member. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<V>) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Value for `key`; `None` when the key is absent or explicitly `null`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Whether the key is present at all (even as `null`).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in JavaScript property order.
    pub fn keys(&self) -> Vec<&str> {
        let mut indexed: Vec<(u32, &str)> = self
            .entries
            .iter()
            .filter_map(|(k, _)| array_index(k).map(|i| (i, k.as_str())))
            .collect();
        indexed.sort_by_key(|(i, _)| *i);

        let named = self
            .entries
            .iter()
            .filter(|(k, _)| array_index(k).is_none())
            .map(|(k, _)| k.as_str());

        indexed.into_iter().map(|(_, k)| k).chain(named).collect()
    }
}

/// Canonical array-index key ("0", "7", "42"; not "07" or "-1").
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i != u32::MAX)
}

impl<V: Serialize> Serialize for KeyedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for KeyedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for KeyedMapVisitor<V> {
            type Value = KeyedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object keyed by option key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = KeyedMap::new();
                while let Some((key, value)) = access.next_entry::<String, Option<V>>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(KeyedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_follow_js_property_order() {
        let map: KeyedMap<String> =
            serde_json::from_str(r#"{"b": "B", "10": "ten", "a": "A", "2": "two"}"#).unwrap();
        assert_eq!(map.keys(), vec!["2", "10", "b", "a"]);
    }

    #[test]
    fn test_leading_zero_is_not_an_index() {
        let map: KeyedMap<String> =
            serde_json::from_str(r#"{"07": "x", "1": "y"}"#).unwrap();
        assert_eq!(map.keys(), vec!["1", "07"]);
    }

    #[test]
    fn test_null_member_is_present_but_has_no_value() {
        let map: KeyedMap<f64> = serde_json::from_str(r#"{"k1": null, "k2": 4.5}"#).unwrap();
        assert!(map.contains_key("k1"));
        assert!(map.get("k1").is_none());
        assert_eq!(map.get("k2").copied(), Some(4.5));
        assert!(map.get("k3").is_none());
    }
}
