use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "posechain", version)]
struct Cli {
    /// Log more (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chain a fixed list of segments and write the frames as JSONL.
    Chain(ChainArgs),
    /// Run a headless streaming playback session and write every rendered frame as JSONL.
    Stream(StreamArgs),
}

#[derive(Args, Debug)]
struct Inputs {
    /// Windows index JSON.
    #[arg(long)]
    windows: Option<PathBuf>,

    /// Segments JSON (array or `{"segments": [...]}`).
    #[arg(long)]
    segments: PathBuf,

    /// Directory of per-file JSONL recordings, or one JSONL grouped by `seq_id`.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Output JSONL path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ChainArgs {
    #[command(flatten)]
    inputs: Inputs,

    /// Segment indices to chain, in order (all segments when omitted).
    #[arg(long, value_delimiter = ',')]
    indices: Vec<usize>,

    /// Blend frames per seam.
    #[arg(long, default_value_t = 8)]
    blend_n: usize,
}

#[derive(Parser, Debug)]
struct StreamArgs {
    #[command(flatten)]
    inputs: Inputs,

    /// Config JSON with `stream` and `playback` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playback steps to run.
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// Override the candidate picker seed.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Chain(args) => cmd_chain(args),
        Command::Stream(args) => cmd_stream(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_library(inputs: &Inputs) -> anyhow::Result<posechain::SegmentLibrary> {
    posechain::load_library(
        inputs.windows.as_deref(),
        &inputs.segments,
        inputs.frames.as_deref(),
    )
    .with_context(|| format!("load segments '{}'", inputs.segments.display()))
}

fn open_out(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(Box::new(BufWriter::new(f)))
}

fn cmd_chain(args: ChainArgs) -> anyhow::Result<()> {
    let library = load_library(&args.inputs)?;
    let windows = library
        .windows
        .as_ref()
        .context("chain requires --windows")?;

    let list: Vec<posechain::Segment> = if args.indices.is_empty() {
        library.segments.clone()
    } else {
        args.indices
            .iter()
            .map(|&i| {
                library
                    .segments
                    .get(i)
                    .cloned()
                    .with_context(|| format!("segment index {i} out of range"))
            })
            .collect::<anyhow::Result<_>>()?
    };

    let frames = posechain::chain_segments(
        windows,
        &library.sources,
        &list,
        args.blend_n,
        posechain::Canvas::default(),
    );
    posechain::load::jsonl::write_jsonl(&frames, open_out(args.inputs.out.as_deref())?)
        .context("write frames")?;

    eprintln!("chained {} segments into {} frames", list.len(), frames.len());
    Ok(())
}

struct JsonlRenderer {
    out: Box<dyn Write>,
}

impl posechain::Renderer for JsonlRenderer {
    fn render(&mut self, frame: &posechain::PoseFrame) -> posechain::PoseChainResult<()> {
        serde_json::to_writer(&mut self.out, &posechain::RawFrame::from(frame))
            .map_err(|e| posechain::PoseChainError::serde(format!("encode frame: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| anyhow::Error::new(e).context("write frame"))?;
        Ok(())
    }
}

fn cmd_stream(args: StreamArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(p) => posechain::Config::load(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => posechain::Config::default(),
    };
    if let Some(seed) = args.seed {
        config.stream.seed = seed;
    }

    let library = Arc::new(load_library(&args.inputs)?);
    let controller = posechain::StreamingChainController::new(library, config.stream)?;
    let mut session = posechain::PlaybackSession::new(controller, config.playback)?;
    session.seed();

    let mut renderer = JsonlRenderer {
        out: open_out(args.inputs.out.as_deref())?,
    };
    let stats = posechain::run(&mut session, &mut renderer, args.ticks)?;
    renderer.out.flush().context("flush frames")?;

    eprintln!(
        "rendered {} frames ({} starved), {:.2}s of playback",
        stats.frames_rendered,
        stats.frames_starved,
        stats.scheduled.as_secs_f64()
    );
    Ok(())
}
