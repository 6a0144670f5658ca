//! 后端字段格式不统一时使用的反序列化辅助函数

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// 接受 `true`/`false`、`1`/`0` 以及 `"1"`/`"0"`，`null` 视为 `false`
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<BoolLike>::deserialize(deserializer)?;
    Ok(match value {
        Some(BoolLike::Bool(b)) => b,
        Some(BoolLike::Int(n)) => n != 0,
        Some(BoolLike::Text(s)) => matches!(s.trim(), "1" | "true" | "active"),
        None => false,
    })
}

/// `null` 与缺失字段都视为空字符串
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "flexible_bool", default)]
        status: bool,
        #[serde(deserialize_with = "string_or_empty", default)]
        name: String,
    }

    fn parse(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn status_accepts_bools_and_integers() {
        assert!(parse(r#"{"status": true}"#).status);
        assert!(parse(r#"{"status": 1}"#).status);
        assert!(parse(r#"{"status": "1"}"#).status);
        assert!(!parse(r#"{"status": 0}"#).status);
        assert!(!parse(r#"{"status": null}"#).status);
        assert!(!parse("{}").status);
    }

    #[test]
    fn null_names_become_empty() {
        assert_eq!(parse(r#"{"name": null}"#).name, "");
        assert_eq!(parse(r#"{"name": "Acme"}"#).name, "Acme");
    }
}
