//! Input validation run before any decoding or network access

use std::path::Path;

use reqwest::Url;

use crate::error::ValidationError;

/// Upload types the image extractor accepts
pub const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/svg+xml", "image/webp"];

/// Check an upload's type and size.
///
/// `mime` wins over the type guessed from the file name.
pub fn validate_upload(
    file_name: &Path,
    mime: Option<&str>,
    size: u64,
    max_bytes: u64,
) -> Result<(), ValidationError> {
    let mime = match mime {
        Some(m) => m.to_ascii_lowercase(),
        None => mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or("")
            .to_string(),
    };

    if !ACCEPTED_TYPES.contains(&mime.as_str()) {
        return Err(ValidationError::UnsupportedFileType);
    }

    if size > max_bytes {
        return Err(ValidationError::FileTooLarge { size, max_bytes });
    }

    Ok(())
}

/// Trimmed input with `https://` prepended when no http(s) scheme is given.
///
/// This is also the source name recorded for URL palettes.
pub fn with_default_scheme(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Trim user input, default to https and require an absolute URL with a host
pub fn normalize_url(input: &str) -> Result<Url, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let url = Url::parse(&with_default_scheme(input)).map_err(|_| ValidationError::InvalidUrl)?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUrl);
    }

    Ok(url)
}

/// Keep only `[a-z0-9-]` after lowercasing, for CSS/SCSS identifiers
pub fn sanitize_color_name(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MB: u64 = 10 * 1024 * 1024;

    #[test]
    fn test_validate_upload_types() {
        assert!(validate_upload(Path::new("a.jpg"), None, 10, TEN_MB).is_ok());
        assert!(validate_upload(Path::new("a.PNG"), None, 10, TEN_MB).is_ok());
        assert!(validate_upload(Path::new("logo.svg"), None, 10, TEN_MB).is_ok());
        assert!(validate_upload(Path::new("a.webp"), None, 10, TEN_MB).is_ok());
        assert_eq!(
            validate_upload(Path::new("a.gif"), None, 10, TEN_MB),
            Err(ValidationError::UnsupportedFileType)
        );
        assert_eq!(
            validate_upload(Path::new("notes"), None, 10, TEN_MB),
            Err(ValidationError::UnsupportedFileType)
        );
    }

    #[test]
    fn test_explicit_mime_wins() {
        assert!(validate_upload(Path::new("blob"), Some("image/png"), 10, TEN_MB).is_ok());
        assert!(validate_upload(Path::new("a.png"), Some("text/plain"), 10, TEN_MB).is_err());
    }

    #[test]
    fn test_validate_upload_size() {
        assert!(validate_upload(Path::new("a.png"), None, TEN_MB, TEN_MB).is_ok());
        assert_eq!(
            validate_upload(Path::new("a.png"), None, TEN_MB + 1, TEN_MB),
            Err(ValidationError::FileTooLarge {
                size: TEN_MB + 1,
                max_bytes: TEN_MB
            })
        );
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("  example.com/page ").unwrap().as_str(),
            "https://example.com/page"
        );
        assert_eq!(
            normalize_url("http://example.com").unwrap().as_str(),
            "http://example.com/"
        );
        assert_eq!(normalize_url("   "), Err(ValidationError::EmptyUrl));
        assert_eq!(normalize_url("exa mple.com"), Err(ValidationError::InvalidUrl));
        assert_eq!(normalize_url("https://"), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn test_with_default_scheme_keeps_full_url() {
        assert_eq!(
            with_default_scheme(" https://example.com/brand/page "),
            "https://example.com/brand/page"
        );
        assert_eq!(
            with_default_scheme("example.com/brand/page?x=1"),
            "https://example.com/brand/page?x=1"
        );
        assert_eq!(with_default_scheme("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_sanitize_color_name() {
        assert_eq!(sanitize_color_name("Brand Blue_2!"), "brandblue2");
        assert_eq!(sanitize_color_name("accent-1"), "accent-1");
        assert_eq!(sanitize_color_name("!!!"), "");
    }
}
