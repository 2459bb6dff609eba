use std::fmt::Write;

use fidelity::image::ImageSize;
use fidelity::imgproc::{enhance::EnhanceParams, metrics::QualityResult};

use crate::pipeline::{bilateral_sharpen_amount, Method};

const RULE: &str = "==================================================";

/// Coarse label of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Acceptable => "Acceptable",
            Rating::Poor => "Poor",
        }
    }
}

/// Rate a PSNR in dB.
pub fn psnr_rating(psnr: f64) -> Rating {
    if psnr > 40.0 {
        Rating::Excellent
    } else if psnr > 30.0 {
        Rating::Good
    } else if psnr > 20.0 {
        Rating::Acceptable
    } else {
        Rating::Poor
    }
}

/// Rate an SSIM.
pub fn ssim_rating(ssim: f64) -> Rating {
    if ssim > 0.95 {
        Rating::Excellent
    } else if ssim > 0.90 {
        Rating::Good
    } else if ssim > 0.80 {
        Rating::Acceptable
    } else {
        Rating::Poor
    }
}

/// The enhancement passes only if it strictly raises the composite score.
pub fn passed(baseline: &QualityResult, enhanced: &QualityResult) -> bool {
    enhanced.composite > baseline.composite
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{RULE}\n{title}\n{RULE}");
}

fn quality_lines(out: &mut String, quality: &QualityResult) {
    let _ = writeln!(out, "PSNR: {:.4} dB", quality.psnr);
    let _ = writeln!(out, "SSIM: {:.4}", quality.ssim);
    let _ = writeln!(out, "Composite Score: {:.4}", quality.composite);
}

fn parameter_lines(out: &mut String, method: Method, params: &EnhanceParams) {
    let _ = writeln!(out, "Method: {method}");
    match method {
        Method::Unsharp => {
            let _ = writeln!(out, "Kernel Size: {}", params.kernel_size);
            let _ = writeln!(out, "Sigma: {:.2}", params.sigma);
            let _ = writeln!(out, "Amount: {:.2}", params.amount);
            let _ = writeln!(out, "Threshold: {:.2}", params.threshold);
        }
        Method::Bilateral => {
            let _ = writeln!(out, "Sharpen Amount: {:.2}", bilateral_sharpen_amount(params));
        }
    }
}

/// Text report of the test mode.
pub fn comparison_text(baseline: &QualityResult, enhanced: &QualityResult) -> String {
    let mut out = String::new();

    header(&mut out, "BASELINE QUALITY ASSESSMENT");
    quality_lines(&mut out, baseline);

    header(&mut out, "ENHANCED QUALITY ASSESSMENT");
    quality_lines(&mut out, enhanced);

    header(&mut out, "RESULTS COMPARISON");
    let _ = writeln!(out, "PSNR Improvement: {:+.4} dB", enhanced.psnr - baseline.psnr);
    let _ = writeln!(out, "SSIM Improvement: {:+.4}", enhanced.ssim - baseline.ssim);
    let _ = writeln!(
        out,
        "Composite Improvement: {:+.4}",
        enhanced.composite - baseline.composite
    );

    let verdict = if passed(baseline, enhanced) { "PASS" } else { "FAIL" };
    let _ = writeln!(out, "\nTEST RESULT: {verdict}");

    out
}

/// JSON report of the test mode.
pub fn comparison_json(
    baseline: &QualityResult,
    enhanced: &QualityResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "baseline": baseline,
        "enhanced": enhanced,
        "pass": passed(baseline, enhanced),
    }))
}

/// Text report of the practical mode.
pub fn practical_text(
    size: ImageSize,
    quality: &QualityResult,
    method: Method,
    params: &EnhanceParams,
) -> String {
    let mut out = String::new();

    header(&mut out, "PRACTICAL MODE");
    let _ = writeln!(out, "Dimensions: {}x{}", size.width, size.height);
    let _ = writeln!(out, "Channels: 3");

    header(&mut out, "QUALITY METRICS (ENHANCED VS INPUT)");
    let _ = writeln!(
        out,
        "PSNR: {:.4} dB ({})",
        quality.psnr,
        psnr_rating(quality.psnr).as_str()
    );
    let _ = writeln!(
        out,
        "SSIM: {:.4} ({})",
        quality.ssim,
        ssim_rating(quality.ssim).as_str()
    );
    let _ = writeln!(out, "Composite Score: {:.4}", quality.composite);

    header(&mut out, "FILTER PARAMETERS");
    parameter_lines(&mut out, method, params);

    out
}

/// JSON report of the practical mode.
pub fn practical_json(
    quality: &QualityResult,
    method: Method,
    params: &EnhanceParams,
) -> Result<String, serde_json::Error> {
    let parameters = match method {
        Method::Unsharp => serde_json::json!({
            "kernel_size": params.kernel_size,
            "sigma": params.sigma,
            "amount": params.amount,
            "threshold": params.threshold,
        }),
        Method::Bilateral => serde_json::json!({
            "sharpen_amount": bilateral_sharpen_amount(params),
        }),
    };

    serde_json::to_string_pretty(&serde_json::json!({
        "quality": quality,
        "psnr_rating": psnr_rating(quality.psnr).as_str(),
        "ssim_rating": ssim_rating(quality.ssim).as_str(),
        "method": method.to_string(),
        "parameters": parameters,
    }))
}
