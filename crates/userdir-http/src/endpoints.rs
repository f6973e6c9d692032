//! Wire types for the StackExchange users endpoint.

use serde::{Deserialize, Serialize};

use userdir_core::{PageResult, UserRecord};

/// Sort key requested from the server.
pub const SORT_BY: &str = "reputation";

/// Sort order requested from the server.
pub const ORDER: &str = "desc";

/// Query parameters for a users page.
#[derive(Debug, Serialize)]
pub struct UsersQuery<'a> {
    pub page: u32,
    pub pagesize: u32,
    pub order: &'a str,
    pub sort: &'a str,
    pub site: &'a str,
}

/// Paginated users envelope.
#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    pub items: Vec<UserEntry>,
    pub has_more: bool,
}

/// A single user as sent by the server.
#[derive(Debug, Deserialize)]
pub struct UserEntry {
    pub user_id: u64,
    pub display_name: String,
    #[serde(default)]
    pub profile_image: String,
    pub reputation: u64,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_id: Option<u32>,
    #[serde(default)]
    pub error_name: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ErrorResponse {
    /// Human-readable summary of the error envelope.
    pub fn summary(&self) -> Option<String> {
        match (&self.error_name, &self.error_message) {
            (Some(name), Some(message)) => Some(format!("{name}: {message}")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(message)) => Some(message.clone()),
            (None, None) => self.error_id.map(|id| format!("error {id}")),
        }
    }
}

impl From<UserEntry> for UserRecord {
    fn from(entry: UserEntry) -> Self {
        UserRecord::new(
            entry.user_id,
            unescape_html(&entry.display_name),
            entry.profile_image,
            entry.reputation,
        )
    }
}

impl From<UsersResponse> for PageResult {
    fn from(response: UsersResponse) -> Self {
        PageResult::new(
            response.items.into_iter().map(UserRecord::from).collect(),
            response.has_more,
        )
    }
}

/// Undo the HTML escaping the API applies to display names.
///
/// Only the named entities the API emits and decimal/hex numeric references
/// are handled; anything else is left untouched.
pub fn unescape_html(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match tail.find(';').and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end))) {
            Some((decoded, end)) => {
                out.push(decoded);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = entity.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
