use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::students::validation::{not_blank, EMAIL_RE, PHONE_RE};

/// Пустые поля формы приходят как отсутствующие ключи, поэтому `serde(default)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Student {
    #[serde(rename = "maSV")]
    #[validate(custom(function = "not_blank", message = "Student ID must not be empty"))]
    pub ma_sv: String,

    #[serde(rename = "hoTen")]
    #[validate(custom(function = "not_blank", message = "Full name must not be empty"))]
    pub ho_ten: String,

    #[validate(regex(path = *PHONE_RE, message = "Phone number is invalid"))]
    pub sdt: String,

    #[validate(regex(path = *EMAIL_RE, message = "Email format is invalid"))]
    pub email: String,
}

impl Student {
    pub fn new(
        ma_sv: impl Into<String>,
        ho_ten: impl Into<String>,
        sdt: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            ma_sv: ma_sv.into(),
            ho_ten: ho_ten.into(),
            sdt: sdt.into(),
            email: email.into(),
        }
    }
}
