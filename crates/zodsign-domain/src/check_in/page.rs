use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::shared::DomainError;

pub const DEFAULT_AUTHENTICATED_MARKER: &str = "每日签到 -  ZodGame论坛";
pub const DEFAULT_UNAUTHENTICATED_MARKER: &str = "登录 -  ZodGame论坛";

/// Text fragments that tell a signed-in check-in page from the login page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMarkers {
    pub authenticated: String,
    pub unauthenticated: String,
}

impl Default for PageMarkers {
    fn default() -> Self {
        Self {
            authenticated: DEFAULT_AUTHENTICATED_MARKER.to_string(),
            unauthenticated: DEFAULT_UNAUTHENTICATED_MARKER.to_string(),
        }
    }
}

/// Result of probing the check-in page with a credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Valid,
    /// The login page was served
    Unauthenticated,
    /// The check-in page returned something other than 200
    UnexpectedStatus(u16),
    /// Neither marker was present
    Indeterminate,
    /// The request never got a response
    Unreachable(String),
}

impl SessionStatus {
    /// Only a positively identified check-in page counts; everything else fails closed
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionStatus::Valid)
    }

    /// Decide session validity from the check-in page response
    pub fn classify(status: u16, body: &str, markers: &PageMarkers) -> Self {
        if status != 200 {
            return SessionStatus::UnexpectedStatus(status);
        }

        let authenticated = body.contains(&markers.authenticated);
        let unauthenticated = body.contains(&markers.unauthenticated);

        if authenticated && !unauthenticated {
            SessionStatus::Valid
        } else if unauthenticated {
            SessionStatus::Unauthenticated
        } else {
            SessionStatus::Indeterminate
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Valid => write!(f, "session valid"),
            SessionStatus::Unauthenticated => write!(f, "login page served"),
            SessionStatus::UnexpectedStatus(code) => write!(f, "unexpected status {}", code),
            SessionStatus::Indeterminate => write!(f, "page markers not found"),
            SessionStatus::Unreachable(reason) => write!(f, "request failed: {}", reason),
        }
    }
}

/// One-time anti-forgery token scraped from the check-in page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormHash(String);

impl FormHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the hidden `formhash` field value from page markup
    pub fn extract(html: &str) -> Result<Self, DomainError> {
        formhash_regex()
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or(DomainError::TokenNotFound)
    }
}

impl fmt::Display for FormHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn formhash_regex() -> &'static Regex {
    static FORMHASH: OnceLock<Regex> = OnceLock::new();
    FORMHASH.get_or_init(|| {
        Regex::new(r#"name="formhash" value="([A-Za-z0-9]+)""#).expect("static formhash pattern")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> PageMarkers {
        PageMarkers {
            authenticated: "Daily check-in - Forum".to_string(),
            unauthenticated: "Log in - Forum".to_string(),
        }
    }

    #[test]
    fn test_authenticated_marker_only_is_valid() {
        let body = "<title>Daily check-in - Forum</title>";
        assert_eq!(
            SessionStatus::classify(200, body, &markers()),
            SessionStatus::Valid
        );
    }

    #[test]
    fn test_unauthenticated_marker_only_is_invalid() {
        let body = "<title>Log in - Forum</title>";
        let status = SessionStatus::classify(200, body, &markers());
        assert_eq!(status, SessionStatus::Unauthenticated);
        assert!(!status.is_valid());
    }

    #[test]
    fn test_both_markers_is_invalid() {
        let body = "Daily check-in - Forum ... Log in - Forum";
        assert_eq!(
            SessionStatus::classify(200, body, &markers()),
            SessionStatus::Unauthenticated
        );
    }

    #[test]
    fn test_non_200_is_invalid_regardless_of_body() {
        let body = "<title>Daily check-in - Forum</title>";
        let status = SessionStatus::classify(500, body, &markers());
        assert_eq!(status, SessionStatus::UnexpectedStatus(500));
        assert!(!status.is_valid());
    }

    #[test]
    fn test_no_marker_is_indeterminate_and_fails_closed() {
        let status = SessionStatus::classify(200, "<html>maintenance</html>", &markers());
        assert_eq!(status, SessionStatus::Indeterminate);
        assert!(!status.is_valid());
    }

    #[test]
    fn test_default_markers_match_forum_titles() {
        let body = "<title>每日签到 -  ZodGame论坛 - Powered by Discuz!</title>";
        assert!(SessionStatus::classify(200, body, &PageMarkers::default()).is_valid());
    }

    #[test]
    fn test_extract_formhash() {
        let html = r#"<input type="hidden" name="formhash" value="abc123" />"#;
        assert_eq!(FormHash::extract(html).unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_extract_formhash_first_match_wins() {
        let html = r#"name="formhash" value="first1" ... name="formhash" value="second2""#;
        assert_eq!(FormHash::extract(html).unwrap().as_str(), "first1");
    }

    #[test]
    fn test_missing_formhash_is_token_not_found() {
        let html = r#"<input type="hidden" name="other" value="abc123" />"#;
        assert_eq!(FormHash::extract(html), Err(DomainError::TokenNotFound));
    }

    #[test]
    fn test_non_alphanumeric_formhash_rejected() {
        let html = r#"name="formhash" value="""#;
        assert_eq!(FormHash::extract(html), Err(DomainError::TokenNotFound));
    }
}
