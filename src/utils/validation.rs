use crate::utils::error::{Result, SpooferError};
use std::fmt::Display;
use std::path::{Component, Path};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SpooferError::config(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SpooferError::config(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(SpooferError::config(
            field_name,
            format!("Invalid URL format: {} ({})", e, url_str),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SpooferError::config(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(SpooferError::config(field_name, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number<T: PartialOrd + Display>(
    field_name: &str,
    value: T,
    min_value: T,
) -> Result<()> {
    if value < min_value {
        return Err(SpooferError::config(
            field_name,
            format!("Value {} must be at least {}", value, min_value),
        ));
    }
    Ok(())
}

/// File names are joined under the output directory, so they must be
/// relative and must not climb out of it.
pub fn validate_file_stem(field_name: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SpooferError::argument(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }

    let escapes = name.split(['/', '\\']).any(|part| part == "..")
        || name.starts_with(['/', '\\'])
        || Path::new(name).components().any(|component| {
            matches!(
                component,
                Component::RootDir | Component::Prefix(_) | Component::ParentDir
            )
        });

    if name.contains('\0') || escapes {
        return Err(SpooferError::argument(format!(
            "{} must stay inside the output directory: {}",
            field_name, name
        )));
    }

    Ok(())
}
