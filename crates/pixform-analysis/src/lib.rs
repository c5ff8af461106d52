//! pixform-analysis - Image statistics
//!
//! Read-only measurements of a [`pixform_core::Image`]:
//!
//! - Per-channel histograms and Shannon entropy
//! - Per-channel mean and standard deviation
//! - Global brightness and contrast in `[0, 1]` units
//! - Sobel edge magnitude maps (the only operation that allocates an image)

pub mod edges;
mod error;
pub mod histogram;
pub mod stats;

pub use edges::{SobelOptions, sobel_edge_map, sobel_edge_map_with};
pub use error::{AnalysisError, AnalysisResult};
pub use histogram::{HISTOGRAM_BINS, entropy, histogram, histogram_into};
pub use stats::{ChannelStats, brightness, contrast, mean_stddev};
