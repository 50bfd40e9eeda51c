use std::{
    fmt,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use feather_blur::{
    convolve,
    geometry::Point,
    image::{extract, fit, integrate, scale},
    rect::ramp,
    verboser::{Traced, Verboser},
    FeatherBlur, Float, Kernel, PixelData, Rect,
};
use image::DynamicImage;
use num_traits::AsPrimitive;
use tracing::{debug, info, Level};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input PNG file path.
    #[arg()]
    input: PathBuf,

    /// Output PNG file path.
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Left edge of the blurred area.
    #[arg(short, default_value_t = 0)]
    x: usize,

    /// Top edge of the blurred area.
    #[arg(short, default_value_t = 0)]
    y: usize,

    /// Width and height of the blurred area.
    #[arg(short, long, default_value_t = 80)]
    size: usize,

    /// Width and height of the kernel, odd-numbered.
    #[arg(short, long, default_value_t = 5)]
    kernel_size: usize,

    /// Standard deviation of the Gaussian kernel.
    #[arg(short, long, default_value_t = 1.0)]
    radius: f64,

    /// Number of blur passes.
    #[arg(short = 'n', long, default_value_t = 1)]
    iterations: usize,

    /// Nearest neighbour upscale factor applied before blurring.
    #[arg(long, default_value_t = 1)]
    scale: usize,

    /// Precision of calculations (Single/Double).
    #[arg(short, long, default_value_t = Precision::Double)]
    precision: Precision,

    /// Masked fades the blur out from the center; Cropped blurs the whole area evenly.
    #[arg(short, long, default_value_t = Mode::Masked)]
    mode: Mode,

    /// Also write the radial falloff of the blurred area as a grayscale PNG.
    #[arg(long)]
    ramp: Option<PathBuf>,

    /// Print the normalised kernel.
    #[arg(long)]
    print_kernel: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug)]
enum Precision {
    Single,
    Double,
}

impl ValueEnum for Precision {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Single, Self::Double]
    }

    fn to_possible_value<'a>(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Single => clap::builder::PossibleValue::new("Single")
                .alias("single")
                .alias("f32"),
            Self::Double => clap::builder::PossibleValue::new("Double")
                .alias("double")
                .alias("f64"),
        })
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "Single",
            Self::Double => "Double",
        })
    }
}

#[derive(Clone, Copy, Debug)]
enum Mode {
    Masked,
    Cropped,
}

impl ValueEnum for Mode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Masked, Self::Cropped]
    }

    fn to_possible_value<'a>(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Masked => clap::builder::PossibleValue::new("Masked")
                .alias("masked")
                .alias("mask"),
            Self::Cropped => clap::builder::PossibleValue::new("Cropped")
                .alias("cropped")
                .alias("crop"),
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Masked => "Masked",
            Self::Cropped => "Cropped",
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    validate(&args)?;
    match args.precision {
        Precision::Single => with_precision::<f32>(&args),
        Precision::Double => with_precision::<f64>(&args),
    }
}

fn validate(args: &Args) -> Result<()> {
    if !args.input.exists() {
        bail!("The file \"{}\" does not exist.", args.input.display());
    }
    let is_png = args
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        bail!("Input must be PNG, got \"{}\".", args.input.display());
    }
    if args.size < args.kernel_size {
        bail!("Size too small ({} < kernel size {}).", args.size, args.kernel_size);
    }
    if !(args.radius.is_finite() && args.radius > 0.0) {
        bail!("Radius must be positive.");
    }
    if args.iterations == 0 {
        bail!("Number of iterations must be positive.");
    }
    if args.scale == 0 {
        bail!("Scale must be positive.");
    }
    Ok(())
}

fn with_precision<S: Float>(args: &Args) -> Result<()>
where
    f64: AsPrimitive<S>,
    u8: AsPrimitive<S>,
    usize: AsPrimitive<S>,
{
    let mut verboser = Traced::default();

    let decoded = image::open(&args.input)
        .with_context(|| format!("Could not load \"{}\".", args.input.display()))?;
    let mut pixels = scale(args.scale, &PixelData::from(decoded), &mut verboser)?;
    debug!(
        width = pixels.width,
        height = pixels.height,
        components = pixels.components(),
        "loaded image"
    );

    let (mut kernel, sum) = Kernel::<S>::gaussian(args.kernel_size, args.radius.as_())?;
    info!("Original kernel sum: {:.2}", sum);
    kernel.normalise(sum);
    if args.print_kernel {
        print!("{kernel}");
    }
    let blur = FeatherBlur::new(kernel, &mut verboser)?;

    let rect = Rect::square(
        Point::new(args.x, args.y) * args.scale,
        args.size * args.scale,
    )
    .clamp_to(*pixels.grid());

    let started = Instant::now();
    for iteration in 0..args.iterations {
        debug!(iteration, "blur pass");
        pixels = match args.mode {
            Mode::Masked => blur.apply(&pixels, rect, &mut verboser)?,
            Mode::Cropped => blur_cropped(&pixels, rect, blur.kernel(), &mut verboser)?,
        };
    }
    let elapsed = started.elapsed();

    if let Some(path) = &args.ramp {
        write_ramp::<S>(path, rect.area_size() + 1)?;
    }

    let (width, height, components) = (pixels.width, pixels.height, pixels.components());
    DynamicImage::try_from(pixels)?
        .save(&args.output)
        .with_context(|| format!("Could not write \"{}\".", args.output.display()))?;
    info!(
        "Wrote: {} ({}x{}x{}) (x={}, y={}, size={}) to {} in {:.3}s",
        args.input.display(),
        width,
        height,
        components,
        rect.min.x,
        rect.min.y,
        rect.area_size(),
        args.output.display(),
        elapsed.as_secs_f64()
    );
    Ok(())
}

/// Blurs the visible part of `rect` evenly, leaving the rest of the image untouched.
fn blur_cropped<S: Float>(
    source: &PixelData<u8>,
    rect: Rect,
    kernel: &Kernel<S>,
    verboser: &mut impl Verboser,
) -> Result<PixelData<u8>>
where
    u8: AsPrimitive<S>,
{
    let Some(size) = rect.visible_in(*source.grid()) else {
        return Ok(source.clone());
    };
    let chunk = extract(source, rect.min, size, verboser)?;
    let mut blurred = chunk.clone();
    convolve(&chunk, &mut blurred, kernel, verboser)?;
    let mut out = source.clone();
    integrate(&blurred, &mut out, rect.min, verboser)?;
    Ok(out)
}

fn write_ramp<S: Float>(path: &Path, size: usize) -> Result<()>
where
    usize: AsPrimitive<S>,
{
    let mut values = ramp::<S>(size);
    fit(&mut values, S::ZERO, S::ONE, S::ZERO, S::TWO_FIVE_FIVE);
    let mask: PixelData<u8> = values.map(|value| value.round().as_());
    DynamicImage::try_from(mask)?
        .save(path)
        .with_context(|| format!("Could not write \"{}\".", path.display()))?;
    info!("Wrote ramp: {}", path.display());
    Ok(())
}
