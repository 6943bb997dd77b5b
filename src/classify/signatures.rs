//! Static crawler and resource-extension tables.
//!
//! Both tables are compile-time constants. Matching rules live in the parent
//! module; this file only holds the data so that updates to the known-bot list
//! never touch decision logic.

/// Lowercase substrings that mark a user-agent as a known crawler or
/// link-preview bot. Matched case-insensitively against the whole
/// user-agent string.
pub const CRAWLER_SIGNATURES: &[&str] = &[
    "googlebot",
    "yahoo",
    "bingbot",
    "baiduspider",
    "facebookexternalhit",
    "twitterbot",
    "rogerbot",
    "linkedinbot",
    "embedly",
    "quora link preview",
    "showyoubot",
    "outbrain",
    "pinterest",
    "developers.google.com/+/web/snippet",
    "slackbot",
    "vkshare",
    "w3c_validator",
];

/// Path suffixes for static resources that are never worth prerendering,
/// even when requested by a known bot. Matched case-sensitively against
/// the end of the request path.
pub const IGNORED_EXTENSIONS: &[&str] = &[
    ".js", ".css", ".xml", ".less", ".png", ".jpg", ".jpeg", ".gif", ".pdf",
    ".doc", ".txt", ".ico", ".rss", ".zip", ".mp3", ".rar", ".exe", ".wmv",
    ".avi", ".ppt", ".mpg", ".mpeg", ".tif", ".wav", ".mov", ".psd", ".ai",
    ".xls", ".mp4", ".m4a", ".swf", ".dat", ".dmg", ".iso", ".flv", ".m4v",
    ".torrent",
];
