use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::Student;

// 10–11 цифр, только ASCII
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("phone pattern is valid"));

pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Поле формы (`maSV`, `hoTen`, `sdt`, `email`) -> первое сообщение об ошибке.
pub type FieldErrors = BTreeMap<String, String>;

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn validate_student(student: &Student) -> Result<(), FieldErrors> {
    student.validate().map_err(|errors| field_errors(&errors))
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((wire_name(&field).to_string(), message))
        })
        .collect()
}

// Имена полей в ответах совпадают с JSON-именами формы
fn wire_name(field: &str) -> &str {
    match field {
        "ma_sv" | "maSV" => "maSV",
        "ho_ten" | "hoTen" => "hoTen",
        other => other,
    }
}
