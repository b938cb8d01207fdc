//! Asset link normalization
//!
//! Sheets link logos, photos and certificates either as Google Drive share
//! links in many variants or as arbitrary URLs. Drive links are rewritten to a
//! single canonical share form; anything else must already be an absolute URL.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

static DRIVE_FILE_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"drive\.google\.com/file/d/([a-zA-Z0-9_-]+)").ok());

/// Canonical form of an asset link, or `None` for blank or invalid values
///
/// # Examples
/// ```
/// # use results_processor::app::services::results_query::normalize_asset_link;
/// assert_eq!(
///     normalize_asset_link("https://drive.google.com/file/d/abc_123/edit").as_deref(),
///     Some("https://drive.google.com/file/d/abc_123/view?usp=sharing")
/// );
/// assert_eq!(normalize_asset_link("logo.png"), None);
/// ```
pub fn normalize_asset_link(raw: &str) -> Option<String> {
    let link = raw.trim();
    if link.is_empty() {
        return None;
    }

    if let Some(id) = drive_file_id(link) {
        return Some(format!(
            "https://drive.google.com/file/d/{}/view?usp=sharing",
            id
        ));
    }

    Url::parse(link).ok().map(|_| link.to_string())
}

/// Direct download URL for a Drive share link
///
/// Share links open a viewer page; this form serves the file bytes. Other
/// links come back unchanged.
pub fn download_link(link: &str) -> String {
    match drive_file_id(link) {
        Some(id) => format!("https://drive.google.com/uc?export=download&id={}", id),
        None => link.to_string(),
    }
}

fn drive_file_id(link: &str) -> Option<&str> {
    DRIVE_FILE_ID
        .as_ref()?
        .captures(link)?
        .get(1)
        .map(|id| id.as_str())
}
