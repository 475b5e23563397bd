use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use easel::{
    Canvas, CanvasOpts, Composition, CpuSurface, DisplaySize, FetchLoader, FontBook,
    ImageErrorPolicy, RectPadding, RenderOutcome, SettleMode,
};

#[derive(Parser, Debug)]
#[command(name = "easel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a composition to a PNG.
    Render(RenderArgs),
    /// Parse a composition and report what it contains.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Directory relative image paths resolve against (defaults to the input's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Font file to register; repeatable. A system font is used when none is given.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Wait this long after each image instead of committing (overrides EASEL_SETTLE_MS).
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Pad rect text with paddingLeft + paddingRight instead of twice paddingLeft.
    #[arg(long, default_value_t = false)]
    fixed_padding: bool,

    /// Keep rendering when an image fails to load.
    #[arg(long, default_value_t = false)]
    skip_broken_images: bool,

    /// Also print the PNG as a data URL on stdout.
    #[arg(long, default_value_t = false)]
    data_url: bool,

    /// Log every primitive at info level.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
        Command::Check(args) => cmd_check(args),
    }
}

fn load_composition(path: &Path) -> anyhow::Result<Composition> {
    Composition::from_path(path).with_context(|| format!("load composition '{}'", path.display()))
}

fn load_fonts(paths: &[PathBuf]) -> anyhow::Result<FontBook> {
    let mut fonts = FontBook::new();
    for path in paths {
        fonts
            .register_font_file(path)
            .with_context(|| format!("register font '{}'", path.display()))?;
    }
    if paths.is_empty() {
        match easel::find_system_font() {
            Some(path) => {
                if let Err(err) = fonts.register_font_file(&path) {
                    tracing::warn!(path = %path.display(), error = %err, "system font unusable");
                }
            }
            None => tracing::warn!("no font found; text primitives will not be drawn"),
        }
    }
    Ok(fonts)
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let comp = load_composition(&args.in_path)?;
    let assets_root = args.assets_root.clone().unwrap_or_else(|| {
        args.in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });

    let settle = match args.settle_ms {
        Some(ms) => SettleMode::Delay(Duration::from_millis(ms)),
        None => SettleMode::from_env(),
    };
    let mut opts = CanvasOpts::default().with_settle(settle);
    if args.fixed_padding {
        opts = opts.with_rect_padding(RectPadding::LeftRight);
    }
    if args.skip_broken_images {
        opts = opts.with_image_errors(ImageErrorPolicy::Skip);
    }
    if args.debug {
        opts = opts.with_debug(true);
    }

    let surface = CpuSurface::with_fonts(1, 1, load_fonts(&args.fonts)?)?;
    let (canvas, _completions) = Canvas::new(surface, Arc::new(FetchLoader::new(assets_root)), opts);
    let display = DisplaySize::new(f64::from(comp.width), f64::from(comp.height));

    let artifact = match canvas.mount(Arc::new(comp), display).await? {
        RenderOutcome::Completed(artifact) => artifact,
        RenderOutcome::Skipped => anyhow::bail!(
            "'{}' has nothing to draw (zero size or no views)",
            args.in_path.display()
        ),
        other => anyhow::bail!("render did not complete: {other:?}"),
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &artifact.png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    if args.data_url {
        println!("{}", artifact.data_url());
    }
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        artifact.width,
        artifact.height
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let comp = load_composition(&args.in_path)?;
    println!(
        "{}x{}, {} views{}",
        comp.width,
        comp.height,
        comp.views.len(),
        if comp.is_drawable() { "" } else { " (nothing to draw)" }
    );
    for (kind, count) in comp.kind_counts() {
        println!("  {}: {count}", kind.name());
    }
    for url in comp.image_urls() {
        println!("  image {url}");
    }
    Ok(())
}
