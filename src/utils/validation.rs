use crate::utils::error::{NormalizeError, Result};
use url::Url;

/// Statement exports arrive as `.csv` or plain `.txt`.
pub const STATEMENT_EXTENSIONS: &[&str] = &["csv", "txt"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid_value(field_name: &str, value: &str, reason: impl Into<String>) -> NormalizeError {
    NormalizeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A retrieval base: an http(s) URL that output file names can be joined onto.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid_value(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_value(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid_value(
            field_name,
            url_str,
            "Base URL cannot carry a query or fragment",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() || path.contains('\0') {
        return Err(invalid_value(field_name, path, "Path must be non-empty text"));
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let extension = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if allowed_extensions.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(invalid_value(
            field_name,
            file,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(invalid_value(field_name, file, "File has no extension")),
    }
}

/// Output names must stay inside the output directory.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(invalid_value(
            field_name,
            name,
            "File name cannot contain path separators",
        ));
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NormalizeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid_value(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://files.example.com/").is_ok());
        assert!(validate_url("base_url", "http://localhost:5050").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
        assert!(validate_url("base_url", "https://files.example.com/?token=1").is_err());
        assert!(validate_url("base_url", "https://files.example.com/#top").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "statements/HDFC-Input.csv").is_ok());
        assert!(validate_path("input", "   ").is_err());
        assert!(validate_path("input", "bad\0name.csv").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "HDFC-Input-Case1.csv", STATEMENT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "statement.CSV", STATEMENT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "statement.pdf", STATEMENT_EXTENSIONS).is_err());
        assert!(validate_file_extension("input", "statement", STATEMENT_EXTENSIONS).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("output.file_name", "HDFC-Output-Case1.csv").is_ok());
        assert!(validate_file_name("output.file_name", "../escape.csv").is_err());
        assert!(validate_file_name("output.file_name", "  ").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("input.csv".to_string());
        let absent: Option<String> = None;
        assert_eq!(validate_required_field("input.path", &present).unwrap(), "input.csv");
        assert!(matches!(
            validate_required_field("input.path", &absent),
            Err(NormalizeError::MissingConfigError { .. })
        ));
    }
}
