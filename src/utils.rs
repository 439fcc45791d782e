use blake2::{Blake2b, Digest};
use chrono::{Local, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Naive local time; the whole system works without time zones.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date_str(s: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::validation("Data deve estar no formato AAAA-MM-DD"))
}

/// Accepts "2026-06-01 09:00", "2026-06-01T09:00" and either with seconds.
pub fn parse_datetime_str(s: &str) -> ServiceResult<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| ServiceError::validation("Data e horário inválidos"))
}

pub fn format_datetime_str(time: &NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn format_datetime_opt(time: &Option<NaiveDateTime>) -> Option<String> {
    time.as_ref().map(format_datetime_str)
}

pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// The e-mail doubles as salt so equal passwords don't share a digest.
pub fn hash_password(email: &str, password: &str) -> String {
    let mut hasher = Blake2b::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 64 hex chars from two random v4 UUIDs, matching `user_logins.token`.
pub fn generate_login_token() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}
