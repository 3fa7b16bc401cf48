use reqwest::header::{self, HeaderMap, HeaderValue};
use zodsign_domain::check_in::Credential;
use zodsign_domain::DomainError;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Status and body of a fetched page
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

/// Extract origin from URL (including port if present)
pub(super) fn extract_domain(url: &str) -> Result<String, DomainError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| DomainError::Configuration(format!("Invalid URL {}: {}", url, e)))?;
    let host = parsed.host_str().unwrap_or("");

    if let Some(port) = parsed.port() {
        Ok(format!("{}://{}:{}", parsed.scheme(), host, port))
    } else {
        Ok(format!("{}://{}", parsed.scheme(), host))
    }
}

/// Headers a browser sends when navigating to a forum page
pub(super) fn page_headers(credential: &Credential) -> Result<HeaderMap, DomainError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    insert_cookie(&mut headers, credential)?;
    Ok(headers)
}

/// Fixed headers of the in-page AJAX check-in submission
pub(super) fn check_in_headers(
    url: &str,
    credential: &Credential,
) -> Result<HeaderMap, DomainError> {
    let origin = extract_domain(url)?;
    let origin_value = HeaderValue::from_str(&origin)
        .map_err(|e| DomainError::Configuration(format!("Invalid origin {}: {}", origin, e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/xml, text/xml, */*; q=0.01"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(
        header::HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(header::REFERER, origin_value.clone());
    headers.insert(header::ORIGIN, origin_value);
    insert_cookie(&mut headers, credential)?;
    Ok(headers)
}

fn insert_cookie(headers: &mut HeaderMap, credential: &Credential) -> Result<(), DomainError> {
    if credential.is_empty() {
        return Ok(());
    }

    let value = HeaderValue::from_str(&credential.to_header_value()).map_err(|_| {
        DomainError::Validation("cookie contains characters not allowed in headers".to_string())
    })?;
    headers.insert(header::COOKIE, value);
    Ok(())
}

/// Longest prefix of `text` with at most `max` bytes, cut on a char boundary
pub(super) fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let end = text
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .unwrap_or(0);
    &text[..end]
}

/// Map a reqwest failure to the domain's transport error
pub(super) fn transport_error(context: &str, error: reqwest::Error) -> DomainError {
    if error.is_timeout() {
        DomainError::Transport(format!("{}: request timed out", context))
    } else {
        DomainError::Transport(format!("{}: {}", context, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://zodgame.xyz/plugin.php?id=dsu_paulsign:sign").unwrap(),
            "https://zodgame.xyz"
        );
        assert_eq!(
            extract_domain("http://127.0.0.1:8080/sign").unwrap(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_extract_domain_rejects_garbage() {
        assert!(matches!(
            extract_domain("not a url"),
            Err(DomainError::Configuration(_))
        ));
    }

    #[test]
    fn test_page_headers_carry_cookie() {
        let headers = page_headers(&Credential::parse("sid=1; auth=x=y")).unwrap();
        assert_eq!(headers[header::COOKIE], "auth=x=y; sid=1");
    }

    #[test]
    fn test_empty_credential_sends_no_cookie() {
        let headers = page_headers(&Credential::parse("")).unwrap();
        assert!(headers.get(header::COOKIE).is_none());
    }

    #[test]
    fn test_check_in_headers() {
        let headers =
            check_in_headers("https://zodgame.xyz/plugin.php", &Credential::parse("a=1")).unwrap();
        assert_eq!(headers[header::ORIGIN], "https://zodgame.xyz");
        assert_eq!(headers[header::REFERER], "https://zodgame.xyz");
        assert_eq!(headers["x-requested-with"], "XMLHttpRequest");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("abcdef", 3), "abc");
        // each CJK character is 3 bytes
        assert_eq!(truncate("签到失败", 7), "签到");
    }

    #[test]
    fn test_control_characters_in_cookie_rejected() {
        let credential = Credential::parse("a=line\nbreak");
        assert!(matches!(
            page_headers(&credential),
            Err(DomainError::Validation(_))
        ));
    }
}
