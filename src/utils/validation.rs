use crate::utils::error::{HoursError, Result};

/// 檔名長度上限（大多數檔案系統為 255 bytes，需扣掉 ".json"）
pub const MAX_NAME_LEN: usize = 250;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HoursError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HoursError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HoursError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(HoursError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Checks that an hours set name can be used verbatim as a file stem inside
/// the storage directory.
pub fn validate_hours_name(name: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(HoursError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return reject("name cannot be empty");
    }
    if name.len() > MAX_NAME_LEN {
        return reject("name is too long");
    }
    if name.contains(['/', '\\']) {
        return reject("name cannot contain path separators");
    }
    if name.contains('\0') {
        return reject("name contains null bytes");
    }
    // 也擋掉 "." 與 ".."，以及暫存檔使用的前綴
    if name.starts_with('.') {
        return reject("name cannot start with '.'");
    }

    Ok(())
}
