//! Development and testing utilities for md2lab converters.
//!
//! This crate provides shared utilities for testing converters:
//!
//! - [`fixture`] - Temporary lab guide directories
//! - [`pdf`] - Blank PDFs and PNG logos standing in for rasterizer output
//! - [`output`] - Output normalization for test comparisons

pub mod fixture;
pub mod output;
pub mod pdf;
