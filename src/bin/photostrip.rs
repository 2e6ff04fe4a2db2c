use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use photostrip::CompositeSink as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    /// JSON config with `analyzer` and `compositor` sections.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the photo slots of a frame and print them as JSON.
    Analyze(AnalyzeArgs),
    /// Merge photos into a frame and write the strip as a PNG.
    Merge(MergeArgs),
    /// Write the built-in frames as PNG files.
    Catalog(CatalogArgs),
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Frame image: file path or `data:` URI.
    #[arg(long)]
    frame: String,
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Frame image: file path or `data:` URI.
    #[arg(long, conflicts_with = "catalog", required_unless_present = "catalog")]
    frame: Option<String>,

    /// Use a built-in frame by number instead of `--frame`.
    #[arg(long)]
    catalog: Option<u32>,

    /// Captured photo, in shot order. Repeat once per slot.
    #[arg(long = "photo", required = true)]
    photos: Vec<String>,

    /// Output PNG path.
    #[arg(long, conflicts_with = "out_dir", required_unless_present = "out_dir")]
    out: Option<PathBuf>,

    /// Write `photostrip-<topic>-<millis>.png` into this directory instead of `--out`.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Also write the strip as a `data:` URL to this file.
    #[arg(long)]
    data_url: Option<PathBuf>,

    /// Fit policy; overrides the config file.
    #[arg(long, value_enum)]
    fit: Option<FitChoice>,

    /// Merge even when there are fewer photos than slots.
    #[arg(long)]
    allow_partial: bool,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Directory to write `frame-<n>.png` files into.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitChoice {
    Cover,
    Stretch,
}

impl From<FitChoice> for photostrip::FitPolicy {
    fn from(c: FitChoice) -> Self {
        match c {
            FitChoice::Cover => photostrip::FitPolicy::Cover,
            FitChoice::Stretch => photostrip::FitPolicy::Stretch,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => photostrip::PhotostripConfig::from_path(path)?,
        None => photostrip::PhotostripConfig::default(),
    };
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args, &cfg),
        Command::Merge(args) => cmd_merge(args, &cfg),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn cmd_analyze(args: AnalyzeArgs, cfg: &photostrip::PhotostripConfig) -> anyhow::Result<()> {
    let source = photostrip::ImageSource::parse(&args.frame)?;
    let layout = photostrip::analyze_frame(&source, &cfg.analyzer)?;
    let json = serde_json::to_string_pretty(&layout).context("serialize layout")?;
    println!("{json}");
    Ok(())
}

fn cmd_merge(args: MergeArgs, cfg: &photostrip::PhotostripConfig) -> anyhow::Result<()> {
    let frame = match (args.catalog, &args.frame) {
        (Some(n), _) => photostrip::catalog_frame(n)?,
        (None, Some(src)) => {
            let source = photostrip::ImageSource::parse(src)?;
            let topic = match &source {
                photostrip::ImageSource::Path(p) => p
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("custom")
                    .to_string(),
                _ => "custom".to_string(),
            };
            photostrip::Frame::custom(topic, 0, source)
        }
        (None, None) => anyhow::bail!("either --frame or --catalog is required"),
    };

    let resolved = frame.resolve_layout(&cfg.analyzer);

    let mut run = photostrip::CaptureRun::new();
    for p in &args.photos {
        run.push(photostrip::ImageSource::parse(p)?);
    }
    if !args.allow_partial {
        run.ensure_complete(resolved.shot_count())?;
    }

    let mut opts = cfg.compositor;
    if let Some(fit) = args.fit {
        opts.fit = fit.into();
    }
    let compositor = photostrip::Compositor::new(opts);
    let strip = compositor.merge(run.photos(), &frame.source, &resolved.layout.coords)?;

    match (&args.out, &args.out_dir) {
        (Some(out), _) => {
            write_file(out, &strip.blob)?;
            eprintln!("wrote {}", out.display());
        }
        (None, Some(dir)) => {
            let mut sink = photostrip::DirSink::new(dir);
            sink.deliver(&photostrip::SinkMeta::now(&frame.topic), &strip)?;
            for path in sink.written() {
                eprintln!("wrote {}", path.display());
            }
        }
        (None, None) => anyhow::bail!("either --out or --out-dir is required"),
    }
    if let Some(path) = &args.data_url {
        write_file(path, strip.data_url.as_bytes())?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    for frame in photostrip::builtin_catalog()? {
        let bytes = frame.source.load_bytes()?;
        let path = args.out_dir.join(format!("frame-{}.png", frame.number));
        write_file(&path, &bytes)?;
        eprintln!("wrote {} ({})", path.display(), frame.topic);
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
