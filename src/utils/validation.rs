use crate::utils::error::{DistributeError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const MESSAGE_FLAG_ERROR: &str =
    "Gender and Nationality flags only accept '1' or '0' or \"true\" or \"false\"";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DistributeError::invalid_argument(
            field_name,
            format!("Value must be at least {}, got {}", min_value, value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DistributeError::invalid_argument(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| DistributeError::invalid_argument(field_name, "Value is required"))
}

fn country_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2}$").expect("country code pattern is valid"))
}

/// 國籍需為兩個大寫英文字母的國家代碼 (例如 SG、US)
pub fn validate_country_code(field_name: &str, value: &str) -> Result<()> {
    if !country_code_regex().is_match(value) {
        return Err(DistributeError::invalid_argument(
            field_name,
            format!(
                "Nationality should be a two-letter uppercase country code, got '{}'",
                value
            ),
        ));
    }
    Ok(())
}

/// 解析分組旗標，只接受 `1`、`0`、`true`、`false`
pub fn parse_flag(field_name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(DistributeError::invalid_argument(field_name, MESSAGE_FLAG_ERROR)),
    }
}
