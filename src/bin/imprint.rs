use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "imprint", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a scene and write and/or preview the result.
    Compose(ComposeArgs),
    /// Print the size an image would be scaled to inside a fit box.
    Fit(FitArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path (format from the extension).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Open a preview window after composing.
    #[arg(long)]
    show: bool,

    /// Preview window title.
    #[arg(long, default_value = "imprint")]
    title: String,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Software)]
    backend: BackendChoice,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Source width in pixels.
    #[arg(long)]
    src_w: u32,

    /// Source height in pixels.
    #[arg(long)]
    src_h: u32,

    /// Fit box width in pixels.
    #[arg(long)]
    max_w: u32,

    /// Fit box height in pixels.
    #[arg(long)]
    max_h: u32,

    /// Stretch to the box instead of preserving the aspect ratio.
    #[arg(long)]
    stretch: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Software,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Fit(args) => cmd_fit(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<imprint::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: imprint::Scene = serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn make_backend(choice: BackendChoice) -> Box<dyn imprint::GraphicsBackend> {
    let kind = match choice {
        BackendChoice::Software => imprint::BackendKind::Software,
    };
    imprint::create_backend(kind)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    if args.out.is_none() && !args.show {
        anyhow::bail!("nothing to do: pass --out, --show, or both");
    }

    let scene = read_scene_json(&args.in_path)?;
    let backend = make_backend(args.backend);

    let scene_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let result = imprint::compose_scene(backend.as_ref(), &scene, scene_root)?;

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        backend.save(&result, out)?;
        eprintln!("wrote {}", out.display());
    }

    if args.show {
        backend.show(&result, &args.title)?;
    }

    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let src = imprint::Size::new(args.src_w, args.src_h);
    let target = imprint::Size::new(args.max_w, args.max_h);
    let fitted = imprint::compute_size(src, target, !args.stretch)?;
    let hint = imprint::Resample::suggest(src, fitted);

    println!("{}x{} resample={}", fitted.width, fitted.height, hint);
    Ok(())
}
