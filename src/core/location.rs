//! Naming and addressing of output artifacts.

use crate::utils::error::Result;
use std::path::Path;
use url::Url;

/// `HDFC-Input-Case1.csv` becomes `HDFC-Output-Case1.csv`. Only the first
/// `Input` is replaced; names without it are kept as they are.
pub fn output_file_name(original: &str) -> String {
    original.replacen("Input", "Output", 1)
}

/// Output name for an input path, ignoring its directory.
pub fn output_file_name_for(input_path: &str) -> String {
    let file_name = Path::new(input_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(input_path);
    output_file_name(file_name)
}

/// Public URL of an artifact published under `base_url`.
pub fn retrieval_location(base_url: &str, file_name: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(file_name)?)
}
