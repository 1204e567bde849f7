use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fraquilt::{
    FrameSink, QuiltError, QuiltResult, Raster, RenderOpts, RenderRequest, SinkConfig,
};

#[derive(Parser, Debug)]
#[command(name = "fraquilt", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a request as a single PNG.
    Render(RenderArgs),
    /// Render a request over a base image.
    Composite(CompositeArgs),
    /// Feed each frame back through the quilt and write a PNG sequence.
    Animate(AnimateArgs),
    /// Randomly nudge the request's transforms before each frame and write a PNG sequence.
    Drift(DriftArgs),
}

#[derive(Args, Debug)]
struct QuiltArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Refuse to render rasters with more pixels than this.
    #[arg(long, default_value_t = fraquilt::DEFAULT_MAX_PIXELS)]
    max_pixels: u64,

    /// How grid rows and columns map onto the image axes.
    #[arg(long, value_enum, default_value_t = LayoutChoice::RowsDown)]
    layout: LayoutChoice,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    quilt: QuiltArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the request JSON next to the PNG.
    #[arg(long)]
    save_request: bool,
}

#[derive(Args, Debug)]
struct CompositeArgs {
    #[command(flatten)]
    quilt: QuiltArgs,

    /// Base image; resized to the quilt's dimensions.
    #[arg(long)]
    base: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    quilt: QuiltArgs,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frame count; overrides the request's `numframes`.
    #[arg(long)]
    frames: Option<u32>,
}

#[derive(Args, Debug)]
struct DriftArgs {
    #[command(flatten)]
    quilt: QuiltArgs,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames.
    #[arg(long, default_value_t = fraquilt::DEFAULT_FRAMES)]
    frames: u32,

    /// Drift RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Also write the last drifted request as `request.json`.
    #[arg(long)]
    save_request: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutChoice {
    RowsDown,
    RowsAcross,
}

impl QuiltArgs {
    fn opts(&self) -> RenderOpts {
        let layout = match self.layout {
            LayoutChoice::RowsDown => fraquilt::Layout::RowsDown,
            LayoutChoice::RowsAcross => fraquilt::Layout::RowsAcross,
        };
        RenderOpts {
            max_pixels: self.max_pixels,
            layout,
            ..RenderOpts::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let res = match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Composite(args) => cmd_composite(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Drift(args) => cmd_drift(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.chain().find_map(|e| e.downcast_ref::<QuiltError>()) {
                Some(q) => tracing::error!(
                    kind = q.kind(),
                    request_failure = q.is_request_failure(),
                    "{err:#}"
                ),
                None => tracing::error!(kind = "other", "{err:#}"),
            }
            eprintln!("request failed");
            ExitCode::FAILURE
        }
    }
}

fn read_request_json(path: &Path) -> anyhow::Result<RenderRequest> {
    let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
    let r = BufReader::new(f);
    let req: RenderRequest = serde_json::from_reader(r).with_context(|| "parse request JSON")?;
    Ok(req)
}

fn write_request_json(req: &RenderRequest, path: &Path) -> anyhow::Result<()> {
    let json = req.to_json_pretty()?;
    std::fs::write(path, json).with_context(|| format!("write request '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote request");
    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(raster: &Raster, path: &Path) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &raster.data,
        raster.width,
        raster.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = read_request_json(&args.quilt.in_path)?;
    let raster = fraquilt::render_request(&req, &args.quilt.opts())?;

    create_parent(&args.out)?;
    write_png(&raster, &args.out)?;
    if args.save_request {
        write_request_json(&req, &args.out.with_extension("json"))?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let req = read_request_json(&args.quilt.in_path)?;
    let compiled = fraquilt::compile_request(&req, &args.quilt.opts())?;
    let (width, height) = (compiled.plan.width(), compiled.plan.height());

    let img = image::open(&args.base)
        .with_context(|| format!("open base image '{}'", args.base.display()))?
        .to_rgba8();
    tracing::debug!(
        from_w = img.width(),
        from_h = img.height(),
        width,
        height,
        "resizing base image"
    );
    let img = image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle);
    let base = Raster::from_rgba8(width, height, img.into_raw())?;

    let raster = compiled.plan.composite(&base, &compiled.initial)?;
    create_parent(&args.out)?;
    write_png(&raster, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut req = read_request_json(&args.quilt.in_path)?;
    if let Some(frames) = args.frames {
        req.numframes = Some(frames);
    }

    let mut sink = PngSequenceSink::new(args.out_dir.clone());
    fraquilt::animate_request(&req, &args.quilt.opts(), &mut sink)?;

    eprintln!("wrote {} frames to {}", sink.written, args.out_dir.display());
    Ok(())
}

fn cmd_drift(args: DriftArgs) -> anyhow::Result<()> {
    let mut req = read_request_json(&args.quilt.in_path)?;

    let mut sink = PngSequenceSink::new(args.out_dir.clone());
    fraquilt::render_drift(
        &mut req,
        args.frames,
        args.seed,
        &args.quilt.opts(),
        &mut sink,
    )?;
    if args.save_request {
        write_request_json(&req, &args.out_dir.join("request.json"))?;
    }

    eprintln!("wrote {} frames to {}", sink.written, args.out_dir.display());
    Ok(())
}

/// Writes each frame as `frame_NNNN.png` under one directory.
struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: u32,
}

impl PngSequenceSink {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            cfg: None,
            written: 0,
        }
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> QuiltResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        tracing::info!(
            width = cfg.width,
            height = cfg.height,
            frames = cfg.frames,
            dir = %self.dir.display(),
            "writing png sequence"
        );
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &Raster) -> QuiltResult<()> {
        let path = self.dir.join(format!("frame_{idx:04}.png"));
        write_png(frame, &path)?;
        tracing::debug!(idx, path = %path.display(), "wrote frame");
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> QuiltResult<()> {
        if let Some(cfg) = self.cfg
            && cfg.frames != self.written
        {
            return Err(QuiltError::internal(format!(
                "expected {} frames, wrote {}",
                cfg.frames, self.written
            )));
        }
        Ok(())
    }
}
