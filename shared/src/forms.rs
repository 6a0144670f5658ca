//! 表单输入与本地校验
//!
//! 主数据表单、个人资料和修改密码三类表单使用 `validator` 声明规则，
//! 校验结果统一转换为「字段 -> 第一条错误信息」，
//! 与后端返回的 `errors` 结构保持一致，页面只需处理一种形态。

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::FieldMessages;
use crate::serde_helper::{flexible_bool, string_or_empty};

/// 主数据（表面处理 / 设计类型 / 颜色）的新建与编辑表单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MasterInput {
    #[validate(length(min = 1, message = "Please enter Name"))]
    pub title: String,
    #[validate(length(min = 1, message = "Please enter Short Code"))]
    pub short: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub status: bool,
}

impl Default for MasterInput {
    /// 新建时默认启用
    fn default() -> Self {
        Self {
            title: String::new(),
            short: String::new(),
            status: true,
        }
    }
}

impl From<crate::model::MasterRecord> for MasterInput {
    fn from(record: crate::model::MasterRecord) -> Self {
        Self {
            title: record.title,
            short: record.short,
            status: record.status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileInput {
    #[serde(default, deserialize_with = "string_or_empty")]
    #[validate(length(min = 1, message = "Please enter Name"))]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    #[validate(
        length(min = 1, message = "Please enter Email"),
        email(message = "Please enter a valid Email.")
    )]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PasswordChangeInput {
    #[validate(length(min = 1, message = "Please enter current password"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords must match"))]
    pub confirm_password: String,
}

/// 运行 `validator` 校验，失败时返回每个字段的第一条信息
pub fn check<T: Validate>(input: &T) -> Result<(), FieldMessages> {
    input.validate().map_err(|errors| first_messages(&errors))
}

fn first_messages(errors: &ValidationErrors) -> FieldMessages {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, list)| {
            let first = list.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((field.to_string(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_requires_title_and_short() {
        let errors = check(&MasterInput::default()).unwrap_err();
        assert_eq!(errors.get("title").map(String::as_str), Some("Please enter Name"));
        assert_eq!(
            errors.get("short").map(String::as_str),
            Some("Please enter Short Code")
        );

        let filled = MasterInput {
            title: "Teak".into(),
            short: "TK".into(),
            status: false,
        };
        assert!(check(&filled).is_ok());
    }

    #[test]
    fn profile_email_must_be_valid() {
        let input = ProfileInput {
            name: "Asha".into(),
            email: "not-an-email".into(),
        };
        let errors = check(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("email").map(String::as_str),
            Some("Please enter a valid Email.")
        );
    }

    #[test]
    fn password_change_rules() {
        let short = PasswordChangeInput {
            current_password: "old".into(),
            new_password: "abc".into(),
            confirm_password: "abc".into(),
        };
        let errors = check(&short).unwrap_err();
        assert_eq!(
            errors.get("new_password").map(String::as_str),
            Some("Password must be at least 6 characters")
        );

        let mismatch = PasswordChangeInput {
            current_password: "old".into(),
            new_password: "abcdef".into(),
            confirm_password: "abcdeg".into(),
        };
        let errors = check(&mismatch).unwrap_err();
        assert_eq!(
            errors.get("confirm_password").map(String::as_str),
            Some("Passwords must match")
        );
        assert!(!errors.contains_key("current_password"));
    }

    #[test]
    fn master_status_decodes_from_integer() {
        let input: MasterInput =
            serde_json::from_str(r#"{"title": "Oak", "short": "OK", "status": 1}"#).unwrap();
        assert!(input.status);
    }
}
