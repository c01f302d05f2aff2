use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photobooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one composited frame as a PNG.
    Frame(FrameArgs),
    /// Capture a series of photos into a directory.
    Capture(CaptureArgs),
    /// Print the session state a booth config resolves to.
    Inspect(InspectArgs),
    /// List the available filter keys.
    Filters,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input booth config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the configured filter.
    #[arg(long)]
    filter: Option<String>,

    /// Camera ticks to run before rendering.
    #[arg(long, default_value_t = 0)]
    ticks: u32,
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Input booth config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory the photos are written to.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of photos to take.
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Camera ticks between photos.
    #[arg(long, default_value_t = 1)]
    ticks_between: u32,

    /// Override the configured filter.
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input booth config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Camera ticks to run before inspecting.
    #[arg(long, default_value_t = 0)]
    ticks: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Capture(args) => cmd_capture(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Filters => {
            for key in photobooth::FilterKey::ALL {
                println!("{key}");
            }
            Ok(())
        }
    }
}

fn load_session(in_path: &Path, filter: Option<&str>) -> anyhow::Result<photobooth::BoothSession> {
    let cfg = photobooth::BoothConfig::from_path(in_path)?;
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut session = cfg
        .build_session(assets_root)
        .with_context(|| format!("build session from '{}'", in_path.display()))?;
    if let Some(f) = filter {
        session.set_filter_key(f);
    }
    if let Some(msg) = session.error_message() {
        eprintln!("camera: {msg}");
    }
    Ok(session)
}

fn advance(session: &mut photobooth::BoothSession, ticks: u32) {
    for _ in 0..ticks {
        session.tick();
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = load_session(&args.in_path, args.filter.as_deref())?;
    advance(&mut session, args.ticks);

    let frame = session.render()?;
    let png = photobooth::encode_png(&frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({})", args.out.display(), session.visual_source().kind());
    Ok(())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.count > 0, "--count must be at least 1");
    let mut session = load_session(&args.in_path, args.filter.as_deref())?;

    for i in 0..args.count {
        if i > 0 {
            advance(&mut session, args.ticks_between);
        }
        session.capture()?;
    }

    let written = session.album().export_to_dir(&args.out_dir)?;
    for (photo, path) in session.album().photos().iter().zip(&written) {
        println!("{}  {}", sha256_hex(&photo.png), path.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut session = load_session(&args.in_path, None)?;
    advance(&mut session, args.ticks);

    println!("canvas:      {}x{}", session.canvas().width, session.canvas().height);
    println!("permission:  {}", session.permission());
    println!("source:      {}", session.visual_source().kind());
    println!("filter:      {}", session.filter());
    println!("stickers:    {}", session.stickers().len());
    println!("frame:       {}", session.frame().is_some());
    println!("show retry:  {}", session.shows_retry());
    if let Some(msg) = session.error_message() {
        println!("message:     {msg}");
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
