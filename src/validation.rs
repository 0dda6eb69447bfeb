//! Input validation for interests and user ids
//!
//! Every check runs before a request is built, so a failure here never
//! touches the network.

use crate::error::{ClientError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_INTERESTS: usize = 10;
pub const MAX_INTEREST_LENGTH: usize = 164;
pub const MAX_USER_IDS: usize = 1000;
pub const MAX_USER_ID_LENGTH: usize = 164;

static INTEREST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_\-=@,.;]+$").expect("interest pattern is valid"));

/// Check a list of interests, stopping at the first violation.
pub fn validate_interests<I: AsRef<str>>(interests: &[I]) -> Result<Vec<String>> {
    if interests.is_empty() {
        return Err(ClientError::Validation(
            "No interests were supplied".to_string(),
        ));
    }

    if interests.len() > MAX_INTERESTS {
        return Err(ClientError::Validation(format!(
            "Too many interests supplied ({}): API only supports up to {MAX_INTERESTS}",
            interests.len()
        )));
    }

    let mut validated = Vec::with_capacity(interests.len());
    for interest in interests {
        let interest = interest.as_ref();

        if interest.is_empty() {
            return Err(ClientError::Validation(
                "An empty interest name is not valid".to_string(),
            ));
        }

        if interest.len() > MAX_INTEREST_LENGTH {
            return Err(ClientError::Validation(format!(
                "Interest length is {} which is over {MAX_INTEREST_LENGTH} characters",
                interest.len()
            )));
        }

        if !INTEREST_PATTERN.is_match(interest) {
            return Err(ClientError::Validation(format!(
                "Interest `{interest}` contains a forbidden character: \
                 allowed characters are ASCII upper/lower-case letters, numbers or one of _-=@,.;"
            )));
        }

        validated.push(interest.to_string());
    }

    Ok(validated)
}

/// Check a list of user ids, stopping at the first violation.
///
/// Ids are taken as raw bytes so that non-UTF-8 input can be reported by
/// index. Lengths are measured in bytes.
pub fn validate_user_ids<U: AsRef<[u8]>>(user_ids: &[U]) -> Result<Vec<String>> {
    if user_ids.is_empty() {
        return Err(ClientError::Validation(
            "Must supply at least one user id".to_string(),
        ));
    }

    if user_ids.len() > MAX_USER_IDS {
        return Err(ClientError::Validation(format!(
            "Too many user ids supplied. API supports up to {MAX_USER_IDS}, got {}",
            user_ids.len()
        )));
    }

    let mut validated = Vec::with_capacity(user_ids.len());
    for (index, user_id) in user_ids.iter().enumerate() {
        let bytes = user_id.as_ref();

        if bytes.is_empty() {
            return Err(ClientError::Validation(
                "Empty user ids are not valid".to_string(),
            ));
        }

        if bytes.len() > MAX_USER_ID_LENGTH {
            return Err(ClientError::Validation(format!(
                "User Id ('{}') length too long (expected fewer than {} characters, got {})",
                String::from_utf8_lossy(bytes),
                MAX_USER_ID_LENGTH + 1,
                bytes.len()
            )));
        }

        let user_id = std::str::from_utf8(bytes).map_err(|_| {
            ClientError::Validation(format!("User Id at index {index} is not valid utf8"))
        })?;

        validated.push(user_id.to_string());
    }

    Ok(validated)
}

/// Check a single user id before it is signed into a token.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.is_empty() {
        return Err(ClientError::Validation(
            "User Id cannot be empty".to_string(),
        ));
    }

    if user_id.len() > MAX_USER_ID_LENGTH {
        return Err(ClientError::Validation(format!(
            "User Id ('{user_id}') length too long (expected fewer than {} characters, got {})",
            MAX_USER_ID_LENGTH + 1,
            user_id.len()
        )));
    }

    Ok(())
}
