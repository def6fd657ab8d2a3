mod image_extractor;
mod result_aggregator;

pub use image_extractor::{ExtractedImages, ImageExtractor, SkippedDocument};
pub use result_aggregator::ResultAggregator;
