//! Tag map helpers
//!
//! Remote resources carry flat key/value tags. This module converts
//! between the attribute-level `Value::Map` representation and the flat
//! map, computes the create/remove sets for an update, and filters out
//! provider-reserved or user-ignored keys during reconciliation.

use std::collections::HashMap;

use strato_core::resource::Value;

/// Flat tag mapping as seen by the remote API
pub type TagMap = HashMap<String, String>;

/// Keys under this prefix are owned by AWS and never reconciled
pub const RESERVED_PREFIX: &str = "aws:";

pub fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}

/// Changes needed to move a resource from one tag set to another
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagDiff {
    /// Tags to create or overwrite (new keys plus changed values)
    pub create: TagMap,
    /// Keys present before but absent from the desired set
    pub remove: Vec<String>,
}

impl TagDiff {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.remove.is_empty()
    }
}

/// Compute the diff between the previously observed and the desired tag
/// maps. Changed values land in `create` (the remote tagging call
/// overwrites in place), so `remove` only lists keys dropped entirely.
pub fn diff(old: &TagMap, new: &TagMap) -> TagDiff {
    let create: TagMap = new
        .iter()
        .filter(|(k, v)| old.get(*k) != Some(*v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let mut remove: Vec<String> = old
        .keys()
        .filter(|k| !new.contains_key(*k))
        .cloned()
        .collect();
    remove.sort();

    TagDiff { create, remove }
}

/// Drop provider-reserved keys and user-configured exclusions
pub fn filtered(tags: &TagMap, ignore_keys: &[String]) -> TagMap {
    tags.iter()
        .filter(|(k, _)| !is_reserved(k))
        .filter(|(k, _)| !ignore_keys.iter().any(|ignored| ignored == *k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Extract a flat tag map from a `tags` attribute value. Missing or
/// non-map values yield an empty map; non-string entries are skipped.
pub fn from_value(value: Option<&Value>) -> TagMap {
    let mut tags = TagMap::new();
    if let Some(Value::Map(map)) = value {
        for (key, value) in map {
            if let Value::String(s) = value {
                tags.insert(key.clone(), s.clone());
            }
        }
    }
    tags
}

/// Wrap a flat tag map back into an attribute value
pub fn to_value(tags: &TagMap) -> Value {
    Value::Map(
        tags.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_map(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn diff_of_identical_maps_is_empty() {
        let tags = tag_map(&[("env", "prod"), ("team", "net")]);
        assert!(diff(&tags, &tags).is_empty());
    }

    #[test]
    fn diff_separates_created_changed_and_removed() {
        let old = tag_map(&[("env", "prod"), ("team", "net"), ("cost", "42")]);
        let new = tag_map(&[("env", "staging"), ("cost", "42"), ("owner", "alice")]);

        let d = diff(&old, &new);
        assert_eq!(d.create, tag_map(&[("env", "staging"), ("owner", "alice")]));
        assert_eq!(d.remove, vec!["team".to_string()]);
    }

    #[test]
    fn diff_from_empty_creates_everything() {
        let new = tag_map(&[("env", "prod")]);
        let d = diff(&TagMap::new(), &new);
        assert_eq!(d.create, new);
        assert!(d.remove.is_empty());
    }

    #[test]
    fn filtered_drops_reserved_and_ignored_keys() {
        let tags = tag_map(&[
            ("aws:cloudformation:stack-name", "infra"),
            ("env", "prod"),
            ("team", "net"),
        ]);
        let result = filtered(&tags, &["team".to_string()]);
        assert_eq!(result, tag_map(&[("env", "prod")]));
    }

    #[test]
    fn value_round_trip() {
        let tags = tag_map(&[("env", "prod")]);
        let value = to_value(&tags);
        assert_eq!(from_value(Some(&value)), tags);
        assert!(from_value(None).is_empty());
    }
}
