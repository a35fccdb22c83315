use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

const FALLBACK_USER_AGENT: &str = "Mozilla/5.0";

/// Desktop Chrome on Windows, matching the default user agent.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8"),
    ("accept-language", "en-GB,en;q=0.9"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("sec-ch-ua", "\"Not/A)Brand\";v=\"99\", \"Google Chrome\";v=\"115\", \"Chromium\";v=\"115\""),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
];

/// Browser-like request headers, including `user_agent`.
pub(super) fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for &(k, v) in BROWSER_HEADERS {
        headers.insert(HeaderName::from_static(k), HeaderValue::from_static(v));
    }

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or(HeaderValue::from_static(FALLBACK_USER_AGENT)),
    );

    headers
}
