use std::path::PathBuf;

use argh::FromArgs;
use fidelity::imgproc::enhance::EnhanceParams;

use crate::pipeline::Method;

/// Measure image fidelity and enhance degraded images
#[derive(Debug, FromArgs)]
pub struct Args {
    #[argh(subcommand)]
    pub command: Command,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand)]
pub enum Command {
    Test(TestArgs),
    Practical(PracticalArgs),
}

/// Compare a degraded image against its clean source, enhance it and check
/// whether the composite score improved
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "test")]
pub struct TestArgs {
    /// path to the clean reference image
    #[argh(positional)]
    pub clean: PathBuf,

    /// path to the degraded image
    #[argh(positional)]
    pub compressed: PathBuf,

    /// gaussian kernel size of the unsharp mask
    #[argh(option, short = 'k', default = "5")]
    pub kernel_size: usize,

    /// gaussian standard deviation of the unsharp mask
    #[argh(option, short = 's', default = "1.0")]
    pub sigma: f64,

    /// sharpening strength
    #[argh(option, short = 'a', default = "1.5")]
    pub amount: f64,

    /// minimum detail magnitude that gets amplified
    #[argh(option, short = 't', default = "0.0")]
    pub threshold: f64,

    /// enhancement method: unsharp or bilateral
    #[argh(option, short = 'm', default = "Method::Unsharp", from_str_fn(to_method))]
    pub method: Method,

    /// directory where the output images are written
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    pub output_dir: PathBuf,

    /// print the report as json
    #[argh(switch)]
    pub json: bool,
}

/// Enhance a degraded image without a reference and rate the change
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "practical")]
pub struct PracticalArgs {
    /// path to the degraded image
    #[argh(positional)]
    pub compressed: PathBuf,

    /// gaussian kernel size of the unsharp mask
    #[argh(option, short = 'k', default = "5")]
    pub kernel_size: usize,

    /// gaussian standard deviation of the unsharp mask
    #[argh(option, short = 's', default = "1.0")]
    pub sigma: f64,

    /// sharpening strength
    #[argh(option, short = 'a', default = "1.5")]
    pub amount: f64,

    /// minimum detail magnitude that gets amplified
    #[argh(option, short = 't', default = "0.0")]
    pub threshold: f64,

    /// enhancement method: unsharp or bilateral
    #[argh(option, short = 'm', default = "Method::Unsharp", from_str_fn(to_method))]
    pub method: Method,

    /// directory where the output images are written
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    pub output_dir: PathBuf,

    /// print the report as json
    #[argh(switch)]
    pub json: bool,
}

fn to_method(value: &str) -> Result<Method, String> {
    match value {
        "unsharp" => Ok(Method::Unsharp),
        "bilateral" => Ok(Method::Bilateral),
        _ => Err(format!("unsupported method `{value}`, expected unsharp or bilateral")),
    }
}

impl TestArgs {
    pub fn params(&self) -> EnhanceParams {
        EnhanceParams::default()
            .with_kernel_size(self.kernel_size)
            .with_sigma(self.sigma)
            .with_amount(self.amount)
            .with_threshold(self.threshold)
    }
}

impl PracticalArgs {
    pub fn params(&self) -> EnhanceParams {
        EnhanceParams::default()
            .with_kernel_size(self.kernel_size)
            .with_sigma(self.sigma)
            .with_amount(self.amount)
            .with_threshold(self.threshold)
    }
}
