// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Helpers for loosely typed JSON fields.
//!
//! The Dwelo API returns ids as numbers in some payloads and strings in
//! others, and sensor values as strings even when they are numeric.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// Deserializes an id given either as a JSON string or a JSON number.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Returns the text form of a scalar JSON value.
///
/// Strings are returned as-is, numbers and booleans in their JSON spelling.
/// Arrays, objects and `null` have no text form.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "id")]
        uid: String,
    }

    #[test]
    fn id_accepts_string_and_number() {
        let text: Holder = serde_json::from_str(r#"{"uid":"abc"}"#).unwrap();
        assert_eq!(text.uid, "abc");

        let number: Holder = serde_json::from_str(r#"{"uid":12345}"#).unwrap();
        assert_eq!(number.uid, "12345");
    }

    #[test]
    fn id_rejects_other_shapes() {
        assert!(serde_json::from_str::<Holder>(r#"{"uid":null}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"uid":[1]}"#).is_err());
    }

    #[test]
    fn scalar_text_forms() {
        assert_eq!(scalar_text(&Value::from("72.5")), Some("72.5".to_string()));
        assert_eq!(scalar_text(&Value::from(83)), Some("83".to_string()));
        assert_eq!(scalar_text(&Value::Null), None);
    }
}
