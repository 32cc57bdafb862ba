use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tracereel", version, about = "Sample, play and render puzzle trace logs")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print document summary and the sampled frame sequence.
    Inspect(InspectArgs),
    /// Play the sampled sequence, logging each displayed frame.
    Play(PlayArgs),
    /// Render one sampled frame as a PNG.
    Frame(FrameArgs),
    /// Render the whole playback to a video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input trace log JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the document frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Override the document maximum duration, in seconds.
    #[arg(long)]
    max_duration: Option<f64>,
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = tracereel::Canvas::REFERENCE.width)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = tracereel::Canvas::REFERENCE.height)]
    height: u32,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of sampled frames to list.
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Speed multiplier (clamped to 0.25..=5).
    #[arg(long)]
    speed: Option<f64>,

    /// Pace ticks to wall-clock time instead of running as fast as possible.
    #[arg(long)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Position in the sampled sequence (0-based).
    #[arg(long)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output video path (`.webm` for VP9, anything else for H.264 MP4).
    #[arg(long)]
    out: PathBuf,

    /// Speed multiplier (clamped to 0.25..=5).
    #[arg(long)]
    speed: Option<f64>,

    #[command(flatten)]
    canvas: CanvasArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Play(args) => cmd_play(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loaded document with its effective sampling configuration applied.
struct Loaded {
    doc: tracereel::TraceDocument,
    config: tracereel::SamplingConfig,
    sampled: tracereel::SampledTimeline,
}

fn load(input: &InputArgs) -> anyhow::Result<Loaded> {
    let doc = read_trace(&input.in_path)?;
    let config = tracereel::SamplingConfig::new(
        input.fps.unwrap_or(doc.config.frames_per_second),
        input.max_duration.unwrap_or(doc.config.max_duration_seconds),
    )?;
    let sampled = tracereel::sample(&doc.timeline, &config)?;
    Ok(Loaded {
        doc,
        config,
        sampled,
    })
}

fn read_trace(path: &Path) -> anyhow::Result<tracereel::TraceDocument> {
    tracereel::TraceDocument::load(path)
        .with_context(|| format!("load trace log '{}'", path.display()))
}

fn playback_options(loaded: &Loaded, speed: Option<f64>) -> tracereel::PlaybackOptions {
    let opts = tracereel::PlaybackOptions::for_kind(loaded.doc.kind(), &loaded.config);
    match speed {
        Some(s) => opts.with_speed(tracereel::clamp_speed(s)),
        None => opts,
    }
}

#[derive(serde::Serialize)]
struct InspectSummary<'a> {
    kind: &'static str,
    title: String,
    frames: usize,
    important: usize,
    config: &'a tracereel::SamplingConfig,
    max_frame_count: usize,
    sampled: usize,
    stride: usize,
    policy: tracereel::SamplingPolicy,
    first_frames: Vec<String>,
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let loaded = load(&args.input)?;
    let timeline = &loaded.doc.timeline;
    let summary = InspectSummary {
        kind: loaded.doc.kind().as_str(),
        title: loaded.doc.title(),
        frames: timeline.len(),
        important: timeline.important_count(),
        config: &loaded.config,
        max_frame_count: loaded.config.max_frame_count(),
        sampled: loaded.sampled.len(),
        stride: loaded.sampled.stride,
        policy: loaded.sampled.policy,
        first_frames: loaded
            .sampled
            .frames
            .iter()
            .take(args.limit)
            .map(|f| {
                let mut caption = f.caption();
                if f.is_important() {
                    caption.push_str(" *");
                }
                caption
            })
            .collect(),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serialize summary")?
        );
        return Ok(());
    }

    println!("{} ({})", summary.title, summary.kind);
    println!(
        "frames: {} ({} important)",
        summary.frames, summary.important
    );
    println!(
        "config: {} fps, {} s max (budget {} frames)",
        summary.config.frames_per_second,
        summary.config.max_duration_seconds,
        summary.max_frame_count
    );
    println!(
        "sampled: {} frames, stride {}, {:?}",
        summary.sampled, summary.stride, summary.policy
    );
    for line in &summary.first_frames {
        println!("  {line}");
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let loaded = load(&args.input)?;
    let opts = playback_options(&loaded, args.speed);
    let fps = loaded.config.frames_per_second;
    let interval_ms = loaded.config.frame_interval_ms();

    let mut driver = tracereel::PlaybackDriver::with_frames(loaded.sampled.frames, opts)?;
    let mut renderer = tracereel::LogRenderer::new();
    let summary = if args.realtime {
        driver.run(&mut tracereel::RealtimeTicks::from_fps(fps), &mut renderer)?
    } else {
        driver.run(&mut tracereel::FixedTicks::new(interval_ms), &mut renderer)?
    };

    eprintln!(
        "played {} frames in {} ticks{}",
        renderer.frames_shown(),
        summary.ticks,
        if summary.completed { "" } else { " (incomplete)" }
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let loaded = load(&args.input)?;
    let canvas = tracereel::Canvas::new(args.canvas.width, args.canvas.height)?;
    let view = tracereel::PlaybackView::still(&loaded.sampled.frames, args.index)?;

    let mut renderer =
        tracereel::RasterRenderer::new(canvas, tracereel::SceneTheme::for_document(&loaded.doc));
    tracereel::FrameRenderer::render(&mut renderer, &view)?;
    renderer.frame().save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let loaded = load(&args.input)?;
    let canvas = tracereel::Canvas::new(args.canvas.width, args.canvas.height)?;
    let opts = playback_options(&loaded, args.speed);
    let theme = tracereel::SceneTheme::for_document(&loaded.doc);
    let sink_cfg = tracereel::SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: loaded.config.frames_per_second,
    };
    let interval_ms = loaded.config.frame_interval_ms();

    let mut driver = tracereel::PlaybackDriver::with_frames(loaded.sampled.frames, opts)?;
    driver.attach_capture(
        Box::new(tracereel::FfmpegSink::new(tracereel::FfmpegSinkOpts::new(
            &args.out,
        ))),
        sink_cfg,
    );
    let mut renderer = tracereel::RasterRenderer::new(canvas, theme);
    let summary = driver.run(&mut tracereel::FixedTicks::new(interval_ms), &mut renderer)?;

    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        summary.frames_captured
    );
    Ok(())
}
