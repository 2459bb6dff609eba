//! Image quality and similarity metrics.
//!
//! This module provides functions for quantitatively comparing a candidate
//! image against a reference, useful for:
//!
//! - Evaluating enhancement filters
//! - Measuring compression artifacts
//!
//! # Available Metrics
//!
//! - **MSE** (Mean Squared Error): Average squared difference between samples
//! - **PSNR** (Peak Signal-to-Noise Ratio): Quality metric in dB scale
//! - **SSIM** (Structural Similarity): Windowed luminance, contrast and structure agreement
//! - **Composite**: One number combining PSNR and SSIM

mod composite;
mod mse;
mod ssim;

pub use composite::{composite_score, QualityResult, PSNR_CEILING_DB};
pub use mse::{mse, psnr, psnr_with_max};
pub use ssim::{ssim, ssim_map, ssim_with_config, ChannelReduction, DynamicRange, SsimConfig};
