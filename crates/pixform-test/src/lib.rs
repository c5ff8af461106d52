//! pixform-test - Regression test harness for pixform
//!
//! Every `tests/*_reg.rs` file drives a [`RegParams`]: each comparison
//! bumps an index, failures are collected with that index, and
//! [`RegParams::cleanup`] reports the outcome.
//!
//! # Usage
//!
//! ```
//! use pixform_test::{RegParams, fixtures};
//! use pixform_core::PixelFormat;
//!
//! let img = fixtures::constant(2, 2, PixelFormat::Gray8, 25.0).unwrap();
//! let mut rp = RegParams::new("doc");
//! rp.compare_values(25.0, img.sample(0, 0, 0).unwrap() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

pub mod fixtures;
mod params;

pub use params::RegParams;
