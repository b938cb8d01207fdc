//! Tests for asset link normalization

use crate::app::services::results_query::links::*;

#[test]
fn test_drive_links_are_canonicalized() {
    let expected = Some("https://drive.google.com/file/d/1AbC-x_9/view?usp=sharing".to_string());

    assert_eq!(
        normalize_asset_link("https://drive.google.com/file/d/1AbC-x_9/view?usp=drive_link"),
        expected
    );
    assert_eq!(
        normalize_asset_link("  drive.google.com/file/d/1AbC-x_9/edit  "),
        expected
    );
}

#[test]
fn test_plain_urls_pass_through() {
    assert_eq!(
        normalize_asset_link(" https://example.com/foto.jpg "),
        Some("https://example.com/foto.jpg".to_string())
    );
}

#[test]
fn test_invalid_or_blank_links() {
    assert_eq!(normalize_asset_link(""), None);
    assert_eq!(normalize_asset_link("   "), None);
    assert_eq!(normalize_asset_link("foto.jpg"), None);
    assert_eq!(normalize_asset_link("www.example.com/foto.jpg"), None);
}

#[test]
fn test_download_link() {
    assert_eq!(
        download_link("https://drive.google.com/file/d/1AbC/view?usp=sharing"),
        "https://drive.google.com/uc?export=download&id=1AbC"
    );
    assert_eq!(
        download_link("https://example.com/logo.png"),
        "https://example.com/logo.png"
    );
}
