//! 型の合わない値を空として読み込むデシリアライザ
//!
//! ルール設定の1項目が壊れていても設定全体は読み込めるようにする。
//! `#[serde(default, deserialize_with = "...")]` と組み合わせて使う。

use crate::rules::OneOrMany;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 文字列以外は空文字列
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// 文字列以外は None
pub fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// 文字列のリスト（単一の文字列は1要素、文字列以外の要素は除外、それ以外は空）
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(strings_from(Value::deserialize(deserializer)?))
}

pub fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OneOrMany, D::Error> {
    Ok(one_or_many_from(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// null や型違いは None
pub fn optional_one_or_many<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<OneOrMany>, D::Error> {
    Ok(one_or_many_from(Value::deserialize(deserializer)?))
}

/// 数値、または数値として読める文字列。それ以外は None
pub fn priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// 読み込めなければ既定値
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn strings_from(value: Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn one_or_many_from(value: Value) -> Option<OneOrMany> {
    match value {
        Value::String(s) => Some(OneOrMany::One(s)),
        array @ Value::Array(_) => Some(OneOrMany::Many(strings_from(array))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "string_list")]
        list: Vec<String>,
        #[serde(deserialize_with = "priority")]
        priority: Option<f64>,
        #[serde(deserialize_with = "optional_one_or_many")]
        secondary: Option<OneOrMany>,
        #[serde(deserialize_with = "string")]
        name: String,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).expect("サンプルのパース失敗")
    }

    #[test]
    fn test_string_list_shapes() {
        assert_eq!(sample(r#"{"list": "wool"}"#).list, vec!["wool".to_string()]);
        assert_eq!(sample(r#"{"list": ["a", 1, null, "b"]}"#).list, vec!["a", "b"]);
        assert!(sample(r#"{"list": null}"#).list.is_empty());
        assert!(sample(r#"{"list": {"x": 1}}"#).list.is_empty());
    }

    #[test]
    fn test_priority_shapes() {
        assert_eq!(sample(r#"{"priority": 2.5}"#).priority, Some(2.5));
        assert_eq!(sample(r#"{"priority": 3}"#).priority, Some(3.0));
        assert_eq!(sample(r#"{"priority": " 4 "}"#).priority, Some(4.0));
        assert_eq!(sample(r#"{"priority": "high"}"#).priority, None);
        assert_eq!(sample(r#"{"priority": null}"#).priority, None);
    }

    #[test]
    fn test_secondary_and_string_shapes() {
        assert_eq!(
            sample(r#"{"secondary": "white"}"#).secondary,
            Some(OneOrMany::One("white".into()))
        );
        assert_eq!(sample(r#"{"secondary": null}"#).secondary, None);
        assert_eq!(sample(r#"{"name": 42}"#).name, "");
        assert!(sample("{}").secondary.is_none());
    }
}
