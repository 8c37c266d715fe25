use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ContactInfo;

/// Ukrainian mobile number: `+380` followed by nine digits.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+380\d{9}").expect("phone pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

/// Returns the first phone number and first email address in document order.
/// Additional matches are ignored.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        phone: PHONE.find(text).map(|m| m.as_str().to_string()),
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
    }
}
