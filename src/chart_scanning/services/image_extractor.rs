use crate::chart_scanning::domain::ImageRef;
use crate::shared::error::ExtractionError;
use serde_yaml_ng::Value;
use std::collections::BTreeSet;

/// Field names whose list elements are container specs
const CONTAINER_LIST_KEYS: [&str; 2] = ["containers", "initContainers"];

/// A manifest document that could not be parsed and was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    /// Zero-based position among the non-empty documents of the stream
    pub index: usize,
    pub reason: String,
}

/// Distinct images found in a rendered manifest stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedImages {
    pub images: BTreeSet<ImageRef>,
    pub skipped_documents: Vec<SkippedDocument>,
}

/// ImageExtractor - Collects container image references from rendered manifests
///
/// Every `---`-separated document is parsed on its own. A document that fails
/// to parse is recorded and skipped; rendered charts routinely carry notes and
/// templated comments that are not manifests.
pub struct ImageExtractor;

impl ImageExtractor {
    /// Extracts the deduplicated image set from a rendered manifest stream
    ///
    /// # Errors
    /// Returns `ExtractionError::EmptyResult` when no image is found in any
    /// document.
    pub fn extract(manifest: &[u8]) -> Result<ExtractedImages, ExtractionError> {
        let text = String::from_utf8_lossy(manifest);
        let mut extracted = ExtractedImages::default();

        let documents = split_documents(&text)
            .into_iter()
            .filter(|document| !document.trim().is_empty());

        for (index, document) in documents.enumerate() {
            match serde_yaml_ng::from_str::<Value>(&document) {
                Ok(value) => collect_images(&value, &mut extracted.images),
                Err(e) => {
                    tracing::warn!(document = index, error = %e, "skipping unparseable manifest document");
                    extracted.skipped_documents.push(SkippedDocument {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if extracted.images.is_empty() {
            return Err(ExtractionError::EmptyResult {
                skipped_documents: extracted.skipped_documents.len(),
            });
        }

        tracing::debug!(
            images = extracted.images.len(),
            skipped = extracted.skipped_documents.len(),
            "image extraction finished"
        );
        Ok(extracted)
    }
}

/// Splits a multi-document YAML stream on `---` (and `...`) marker lines.
/// Text following `--- ` on the marker line belongs to the next document.
fn split_documents(text: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            documents.push(std::mem::take(&mut current));
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("--- ") {
            documents.push(std::mem::take(&mut current));
            current.push_str(rest);
            current.push('\n');
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    documents.push(current);

    documents
}

/// Recursive descent over the document tree. Container lists may sit at any
/// depth (pod templates, CronJob job templates, custom resources).
fn collect_images(value: &Value, images: &mut BTreeSet<ImageRef>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let is_container_list = key
                    .as_str()
                    .map(|k| CONTAINER_LIST_KEYS.contains(&k))
                    .unwrap_or(false);

                if is_container_list {
                    if let Value::Sequence(entries) = child {
                        read_container_images(entries, images);
                    }
                }
                collect_images(child, images);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect_images(item, images);
            }
        }
        Value::Tagged(tagged) => collect_images(&tagged.value, images),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn read_container_images(entries: &[Value], images: &mut BTreeSet<ImageRef>) {
    for entry in entries {
        let Some(image) = entry.get("image") else {
            // Command-only init containers have no image field of their own
            tracing::debug!("container entry without image field skipped");
            continue;
        };

        let Some(raw) = image.as_str() else {
            tracing::warn!(value = ?image, "non-string image field skipped");
            continue;
        };

        match ImageRef::new(raw) {
            Ok(image_ref) => {
                images.insert(image_ref);
            }
            Err(e) => tracing::warn!(image = raw, error = %e, "invalid image reference skipped"),
        }
    }
}
