//! Scalar type registry for field values
//!
//! Field values in a reply are flat strings; the grammar names a type for
//! each field and the registry decides whether a value inhabits that type.
//! Validators return diagnostics rather than booleans so a single value can
//! report several independent problems (an over-long hostname with a bad
//! label, say).
//!
//! The shapes are regex tables compiled once; the calendar arithmetic for
//! timestamps is the only check a regex cannot carry.

use once_cell::sync::Lazy;
use regex::Regex;

/// Look up and apply named scalar types.
pub trait TypeRegistry {
    /// Whether `name` is a known type.
    fn has_type(&self, name: &str) -> bool;

    /// Validate `value` against the type `name`. Empty result means valid.
    fn validate_type(&self, name: &str, value: &str) -> Vec<String>;
}

/// The built-in registry covering the scalar types registry replies use.
///
/// Known types: `hostname`, `ip address`, `url`, `timestamp`, `roid`,
/// `handle`, `email`, `free text`, `positive integer`.
pub struct StandardTypes;

const KNOWN_TYPES: &[&str] = &[
    "hostname",
    "ip address",
    "url",
    "timestamp",
    "roid",
    "handle",
    "email",
    "free text",
    "positive integer",
];

impl TypeRegistry for StandardTypes {
    fn has_type(&self, name: &str) -> bool {
        KNOWN_TYPES.contains(&name)
    }

    fn validate_type(&self, name: &str, value: &str) -> Vec<String> {
        match name {
            "hostname" => check_hostname(value),
            "ip address" => check_ip_address(value),
            "url" => check_url(value),
            "timestamp" => check_timestamp(value),
            "roid" => check_roid(value),
            "handle" => check_handle(value),
            "email" => check_email(value),
            "free text" => Vec::new(),
            "positive integer" => check_positive_integer(value),
            other => vec![format!("unknown type '{other}'")],
        }
    }
}

static HOSTNAME_LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").unwrap());

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:https?|ftp)://\S+$").unwrap());

static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})(?:\.\d+)?(Z|[+-]\d{2}:\d{2})$",
    )
    .unwrap()
});

static ROID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,80}-[A-Za-z0-9]+$").unwrap());

static HANDLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());

fn check_hostname(value: &str) -> Vec<String> {
    let mut diagnostics = Vec::new();
    // A single trailing dot marks an absolute name and is not a label.
    let name = value.strip_suffix('.').unwrap_or(value);

    if name.is_empty() {
        return vec![format!("'{value}' is not a valid hostname")];
    }
    if name.len() > 253 {
        diagnostics.push(format!("hostname '{value}' exceeds 253 octets"));
    }
    for label in name.split('.') {
        if label.len() > 63 {
            diagnostics.push(format!(
                "hostname label '{label}' in '{value}' exceeds 63 octets"
            ));
        } else if !HOSTNAME_LABEL_REGEX.is_match(label) {
            diagnostics.push(format!("'{label}' is not a valid hostname label"));
        }
    }
    diagnostics
}

fn check_ip_address(value: &str) -> Vec<String> {
    let octets: Vec<&str> = value.split('.').collect();
    let valid = octets.len() == 4
        && octets.iter().all(|octet| {
            !octet.is_empty()
                && octet.len() <= 3
                && octet.chars().all(|c| c.is_ascii_digit())
                && octet.parse::<u16>().map_or(false, |n| n <= 255)
        });
    if valid {
        Vec::new()
    } else {
        vec![format!("'{value}' is not a valid IP address")]
    }
}

fn check_url(value: &str) -> Vec<String> {
    if URL_REGEX.is_match(value) {
        Vec::new()
    } else {
        vec![format!("'{value}' is not a valid URL")]
    }
}

fn check_timestamp(value: &str) -> Vec<String> {
    let captures = match TIMESTAMP_REGEX.captures(value) {
        Some(captures) => captures,
        None => return vec![format!("'{value}' is not a valid timestamp")],
    };

    // The regex guarantees the digit groups parse.
    let year: u32 = captures[1].parse().unwrap_or(0);
    let month: u32 = captures[2].parse().unwrap_or(0);
    let day: u32 = captures[3].parse().unwrap_or(0);
    let hour: u32 = captures[4].parse().unwrap_or(99);
    let minute: u32 = captures[5].parse().unwrap_or(99);
    let second: u32 = captures[6].parse().unwrap_or(99);

    let mut diagnostics = Vec::new();
    if !(1..=12).contains(&month) {
        diagnostics.push(format!("timestamp '{value}' has month {month}"));
    } else if !(1..=days_in_month(year, month)).contains(&day) {
        diagnostics.push(format!("timestamp '{value}' has day {day}"));
    }
    if hour > 23 || minute > 59 || second > 59 {
        diagnostics.push(format!("timestamp '{value}' has an invalid time of day"));
    }
    diagnostics
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 0,
    }
}

fn check_roid(value: &str) -> Vec<String> {
    if ROID_REGEX.is_match(value) {
        Vec::new()
    } else {
        vec![format!("'{value}' is not a valid repository identifier")]
    }
}

fn check_handle(value: &str) -> Vec<String> {
    if HANDLE_REGEX.is_match(value) {
        Vec::new()
    } else {
        vec![format!("'{value}' is not a valid handle")]
    }
}

fn check_email(value: &str) -> Vec<String> {
    if !EMAIL_REGEX.is_match(value) {
        return vec![format!("'{value}' is not a valid email address")];
    }
    let domain = value.rsplit('@').next().unwrap_or("");
    if check_hostname(domain).is_empty() {
        Vec::new()
    } else {
        vec![format!("email address '{value}' has an invalid domain")]
    }
}

fn check_positive_integer(value: &str) -> Vec<String> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Vec::new(),
        _ => vec![format!("'{value}' is not a positive integer")],
    }
}
