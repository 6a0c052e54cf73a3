use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "radwalk", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame for one progress value as a PNG.
    Frame(FrameArgs),
    /// Render a progress sweep from 0 to 1, one PNG per frame.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Progress value in [0,1].
    #[arg(long)]
    progress: f64,

    /// Host viewport as WIDTHxHEIGHT (logical units).
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    viewport: radwalk::Viewport,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Optional scene JSON (walk + style configuration).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Number of frames in the sweep (progress 0..=1 inclusive).
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Host viewport as WIDTHxHEIGHT (logical units).
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    viewport: radwalk::Viewport,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Optional scene JSON (walk + style configuration).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory; frames land as frame_0000.png, frame_0001.png, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn parse_viewport(s: &str) -> Result<radwalk::Viewport, String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: f64 = w.parse().map_err(|_| format!("bad width '{w}'"))?;
    let height: f64 = h.parse().map_err(|_| format!("bad height '{h}'"))?;
    Ok(radwalk::Viewport::new(width, height))
}

fn read_scene(path: Option<&Path>) -> anyhow::Result<radwalk::Scene> {
    let Some(path) = path else {
        return Ok(radwalk::Scene::default());
    };
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: radwalk::Scene = serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn write_png(frame: &radwalk::FrameRGBA, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = read_scene(args.config.as_deref())?;
    scene.validate()?;

    let mut renderer = radwalk::Renderer::new(scene)?;
    let frame = renderer
        .render_frame(args.progress, args.viewport, args.dpr)?
        .context("viewport is not drawable")?;

    write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames >= 2, "sequence needs at least 2 frames");

    let scene = read_scene(args.config.as_deref())?;
    scene.validate()?;

    let mut renderer = radwalk::Renderer::new(scene)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for i in 0..args.frames {
        let progress = f64::from(i) / f64::from(args.frames - 1);
        let frame = renderer
            .render_frame(progress, args.viewport, args.dpr)?
            .context("viewport is not drawable")?;
        let out = args.out_dir.join(format!("frame_{i:04}.png"));
        write_png(&frame, &out)?;
    }

    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}
