mod cli;
mod pipeline;
mod report;

use std::{path::Path, process::ExitCode};

use fidelity::image::{Image, ImageError};
use fidelity::imgproc::metrics::QualityResult;
use fidelity::io::functional::{read_image_rgb8, write_image_rgb8};

use cli::{Args, Command, PracticalArgs, TestArgs};

const ENHANCED_FILE_NAME: &str = "output_enhanced.png";
const BLURRED_FILE_NAME: &str = "output_blurred.png";

type BoxError = Box<dyn std::error::Error>;

fn save(dir: &Path, file_name: &str, image: &Image<u8, 3>) -> Result<(), BoxError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    write_image_rgb8(&path, image)?;
    log::info!("saved {}", path.display());
    Ok(())
}

/// Returns the baseline and enhanced quality against the clean image.
fn run_test(args: &TestArgs) -> Result<(QualityResult, QualityResult), BoxError> {
    log::info!(
        "comparing {} against {}",
        args.compressed.display(),
        args.clean.display()
    );

    let clean = read_image_rgb8(&args.clean)?;
    let compressed = read_image_rgb8(&args.compressed)?;

    if clean.size() != compressed.size() {
        return Err(ImageError::InvalidImageSize(
            clean.width(),
            clean.height(),
            compressed.width(),
            compressed.height(),
        )
        .into());
    }

    let baseline = QualityResult::compute(&clean, &compressed)?;

    let params = args.params();
    log::info!("enhancing with the {} method", args.method);
    let out = pipeline::run(&compressed, args.method, &params)?;
    save(&args.output_dir, ENHANCED_FILE_NAME, &out.enhanced)?;

    let enhanced = QualityResult::compute(&clean, &out.enhanced)?;

    if args.json {
        println!("{}", report::comparison_json(&baseline, &enhanced)?);
    } else {
        print!("{}", report::comparison_text(&baseline, &enhanced));
    }

    Ok((baseline, enhanced))
}

/// Returns the quality of the enhanced image against its input.
fn run_practical(args: &PracticalArgs) -> Result<QualityResult, BoxError> {
    log::info!("enhancing {}", args.compressed.display());

    let compressed = read_image_rgb8(&args.compressed)?;

    let params = args.params();
    let out = pipeline::run(&compressed, args.method, &params)?;

    if let Some(blurred) = &out.blurred {
        save(&args.output_dir, BLURRED_FILE_NAME, blurred)?;
    }
    save(&args.output_dir, ENHANCED_FILE_NAME, &out.enhanced)?;

    let quality = QualityResult::compute(&compressed, &out.enhanced)?;

    if args.json {
        println!("{}", report::practical_json(&quality, args.method, &params)?);
    } else {
        print!(
            "{}",
            report::practical_text(compressed.size(), &quality, args.method, &params)
        );
    }

    Ok(quality)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let result = match &args.command {
        Command::Test(test) => run_test(test).map(|_| ()),
        Command::Practical(practical) => run_practical(practical).map(|_| ()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
