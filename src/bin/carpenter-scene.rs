use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use carpenter_scene::{
    BackendKind, FrameLoop, FrameSink as _, FrameStamp, IntervalClock, PngSequenceSink,
    RenderBackend, RenderSettings, RenderThreading, SinkConfig, SteppedClock, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "carpenter-scene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a fixed-fps PNG sequence.
    Sequence(SequenceArgs),
    /// Run the scene in real time on a wall clock, writing every frame as a PNG.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Logical width in pixels; height follows at 16:9.
    #[arg(long, default_value_t = 960.0)]
    width: f64,

    /// Pixel density (physical pixels per logical pixel).
    #[arg(long, default_value_t = 1.0)]
    density: f64,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Elapsed time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    view: ViewArgs,

    /// Print the frame's draw ops as JSON on stdout.
    #[arg(long)]
    dump_ops: bool,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Duration in seconds.
    #[arg(long, default_value_t = 4.0)]
    seconds: f64,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    #[command(flatten)]
    view: ViewArgs,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Wall-clock run time in seconds.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn make_backend(choice: BackendChoice) -> anyhow::Result<Box<dyn RenderBackend + Send>> {
    let kind = match choice {
        BackendChoice::Cpu => BackendKind::Cpu,
    };
    let settings = RenderSettings {
        clear_rgba: Some([18, 20, 28, 255]),
    };
    Ok(carpenter_scene::create_backend(kind, &settings)?)
}

fn viewport(view: &ViewArgs) -> anyhow::Result<Viewport> {
    Viewport::from_width(view.width, view.density)
        .with_context(|| format!("invalid viewport width {}", view.width))
}

fn frame_count(seconds: f64, fps: f64) -> anyhow::Result<usize> {
    if !(seconds.is_finite() && seconds > 0.0) {
        anyhow::bail!("seconds must be finite and > 0, got {seconds}");
    }
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("fps must be finite and > 0, got {fps}");
    }
    Ok(((seconds * fps).round() as usize).max(1))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let viewport = viewport(&args.view)?;
    let list = carpenter_scene::compose_frame(args.time, &viewport)
        .context("viewport is not drawable")?;

    if args.dump_ops {
        let json = serde_json::to_string_pretty(&list.summary()).context("serialize draw ops")?;
        println!("{json}");
    }

    let mut backend = make_backend(args.view.backend)?;
    let frame = backend.render_display_list(&list)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    carpenter_scene::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("ops {} fingerprint {}", list.ops.len(), list.fingerprint());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let viewport = viewport(&args.view)?;
    let count = frame_count(args.seconds, args.fps)?;
    let mut backend = make_backend(args.view.backend)?;
    let mut sink = PngSequenceSink::new(&args.out_dir);

    if args.parallel {
        let times = carpenter_scene::frame_times(args.fps, count)?;
        let threading = RenderThreading {
            parallel: true,
            chunk_size: args.chunk_size,
            threads: args.threads,
        };
        let frames = carpenter_scene::render_frames(&times, &viewport, &mut backend, &threading)?;
        let canvas = viewport.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            density: viewport.density,
        })?;
        for (i, (frame, &elapsed)) in frames.iter().zip(&times).enumerate() {
            sink.push_frame(
                FrameStamp {
                    index: i as u64,
                    elapsed,
                },
                frame,
            )?;
        }
        sink.end()?;
        eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
        return Ok(());
    }

    let (writer, reader) = carpenter_scene::viewport_channel();
    writer.publish(viewport);
    let mut clock = SteppedClock::from_fps(args.fps)?;
    let handle = FrameLoop::new(backend, sink, reader).attach(&mut clock);
    clock.fire();
    for _ in 1..count {
        clock.advance();
    }
    let stats = handle.teardown()?;
    if stats.failed > 0 {
        anyhow::bail!("{} of {} frames failed", stats.failed, count);
    }
    eprintln!("wrote {} frames to {}", stats.rendered, args.out_dir.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let run_time = Duration::try_from_secs_f64(args.seconds)
        .with_context(|| format!("invalid run time {}", args.seconds))?;
    let mut clock = IntervalClock::from_fps(args.fps)?;
    let (writer, reader) = carpenter_scene::viewport_channel();
    let backend = make_backend(args.view.backend)?;
    let handle =
        FrameLoop::new(backend, PngSequenceSink::new(&args.out_dir), reader).attach(&mut clock);

    writer
        .observe(Some(args.view.width), Some(args.view.density))
        .with_context(|| format!("invalid viewport width {}", args.view.width))?;
    clock.run_for(run_time);

    let stats = handle.teardown()?;
    eprintln!(
        "rendered {} skipped {} failed {}",
        stats.rendered, stats.skipped, stats.failed
    );
    eprintln!("wrote {}", args.out_dir.display());
    Ok(())
}
