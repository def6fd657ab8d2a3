use crate::shared::Result;
use serde::Serialize;

/// Maximum length for image references (security limit)
const MAX_IMAGE_REF_LENGTH: usize = 1024;

/// Normalized container image reference (`registry/repository:tag` or digest form)
///
/// Equality is exact string equality after trimming. No tag defaulting is
/// applied, so `nginx` and `nginx:latest` are distinct images.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            anyhow::bail!("Image reference cannot be empty");
        }

        if trimmed.len() > MAX_IMAGE_REF_LENGTH {
            anyhow::bail!(
                "Image reference is too long ({} bytes). Maximum allowed: {} bytes",
                trimmed.len(),
                MAX_IMAGE_REF_LENGTH
            );
        }

        if trimmed.chars().any(char::is_whitespace) {
            anyhow::bail!("Image reference '{}' contains whitespace", trimmed);
        }

        // Scanner receives this as a positional argument
        if trimmed.starts_with('-') {
            anyhow::bail!("Image reference '{}' must not start with '-'", trimmed);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
