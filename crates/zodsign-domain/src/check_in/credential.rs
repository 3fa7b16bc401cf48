use std::collections::BTreeMap;

/// Cookie name/value pairs proving an authenticated forum session.
///
/// Keys and values are opaque. Built once per attempt from the raw string a
/// browser exports (`k1=v1; k2=v2`) and dropped when the attempt ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    cookies: BTreeMap<String, String>,
}

impl Credential {
    /// Parse a browser-exported cookie string.
    ///
    /// Pairs are separated by `"; "` and split on the first `=` only, so
    /// base64 padding and similar survive intact. Pairs without `=` are
    /// dropped; a later duplicate key replaces an earlier one.
    pub fn parse(raw: &str) -> Self {
        let cookies = raw
            .split("; ")
            .filter_map(|item| item.split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self { cookies }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a `Cookie` request header value
    pub fn to_header_value(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
