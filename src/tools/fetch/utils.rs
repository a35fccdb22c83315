use reqwest::StatusCode;

/// Markers of bot-challenge interstitials served instead of the real page.
const CHALLENGE_PATTERNS: [&str; 10] = [
    "verify you are a human",
    "please complete the captcha",
    "solve this captcha",
    "captcha challenge",
    "cf-browser-verification",
    "cf-captcha-container",
    "px-captcha",
    "blocked by cloudflare",
    "please enable javascript and cookies",
    "perimeterx",
];

/// Decide whether a response body can go on to extraction.
///
/// Non-success statuses are only fatal without a body. Pages carrying JSON-LD
/// are accepted even when they mention captchas somewhere in the markup.
pub(super) fn validate_response(status: StatusCode, body: &str) -> Result<(), String> {
    if !status.is_success() {
        if body.trim().is_empty() {
            return Err(format!("status {} with empty body", status.as_u16()));
        }
        tracing::warn!(
            status = status.as_u16(),
            "non-success status, extracting from body anyway"
        );
    }

    if body.contains("application/ld+json") {
        return Ok(());
    }

    let lower = body.to_ascii_lowercase();
    if let Some(pattern) = CHALLENGE_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(format!("bot challenge - {pattern}"));
    }

    Ok(())
}

/// Host comparison key: IDNA to ASCII, lowercase, no trailing dot.
pub(super) fn canonical_host(host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('.');
    if host.is_empty() {
        return None;
    }
    idna::domain_to_ascii(host)
        .ok()
        .map(|h| h.to_ascii_lowercase())
        .filter(|h| !h.is_empty())
}
