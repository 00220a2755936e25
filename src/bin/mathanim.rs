use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mathanim", version)]
struct Cli {
    /// Log cache and interpolation activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse SVG path data and print its normalized form.
    Parse(ParseArgs),
    /// Interpolate between two shapes.
    Morph(MorphArgs),
    /// Rasterize shapes into a texture atlas and print their texture coordinates.
    Atlas(AtlasArgs),
    /// Import an SVG document as a group of objects.
    Import(ImportArgs),
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// SVG path data (`d` attribute).
    d: String,

    /// Print the serde JSON form instead of path data.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct MorphArgs {
    /// Source path data.
    #[arg(long)]
    from: String,

    /// Destination path data.
    #[arg(long)]
    to: String,

    /// Number of frames; the first is the source and the last the destination.
    #[arg(long, default_value_t = 5)]
    frames: u64,

    /// Easing curve (`linear`, `in_quad`, `out_cubic`, `smooth`, ...).
    #[arg(long, default_value = "linear")]
    ease: mathanim::Ease,
}

#[derive(Parser, Debug)]
struct AtlasArgs {
    /// Path data of each object; object ids are assigned from 1 in order.
    #[arg(required = true)]
    paths: Vec<String>,

    /// Raster scale applied to every object.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Cache options JSON. `MATHANIM_ATLAS_*` environment variables override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the first color attachment as PNG.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input SVG document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Rescale the group into unit coordinates.
    #[arg(long)]
    normalize: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Parse(args) => cmd_parse(args),
        Command::Morph(args) => cmd_morph(args),
        Command::Atlas(args) => cmd_atlas(args),
        Command::Import(args) => cmd_import(args),
    }
}

fn parse_arg(d: &str) -> anyhow::Result<mathanim::SvgObject> {
    mathanim::parse_path(d).with_context(|| format!("parse path data '{d}'"))
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let obj = parse_arg(&args.d)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }
    let b = obj.bbox;
    eprintln!(
        "paths={} curves={} bbox=[{}, {}, {}, {}] perimeter={:.3}",
        obj.num_paths(),
        obj.num_curves(),
        b.x0,
        b.y0,
        b.x1,
        b.y1,
        obj.approximate_perimeter
    );
    println!("{}", mathanim::to_path_string(&obj));
    Ok(())
}

fn cmd_morph(args: MorphArgs) -> anyhow::Result<()> {
    let src = parse_arg(&args.from)?;
    let dst = parse_arg(&args.to)?;
    let frames = args.frames.max(1);
    let range = mathanim::FrameRange::new(mathanim::FrameIndex(0), mathanim::FrameIndex(frames))?;
    let morph = mathanim::Morph::new(src, dst, range, args.ease);
    for f in 0..frames {
        let frame = mathanim::FrameIndex(f);
        let shape = morph.sample(frame);
        println!(
            "{f}\t{:.4}\t{}",
            morph.t_at(frame),
            mathanim::to_path_string(&shape)
        );
    }
    Ok(())
}

fn read_cache_opts(path: Option<&Path>) -> anyhow::Result<mathanim::SvgCacheOpts> {
    let opts = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("read cache options '{}'", p.display()))?;
            serde_json::from_str(&text).with_context(|| "parse cache options JSON")?
        }
        None => mathanim::SvgCacheOpts::default(),
    };
    let opts = opts.with_env_overrides();
    opts.validate()?;
    Ok(opts)
}

fn cmd_atlas(args: AtlasArgs) -> anyhow::Result<()> {
    let opts = read_cache_opts(args.config.as_deref())?;
    let framebuffer = mathanim::CpuFramebuffer::for_cache(&opts)?;
    let mut cache = mathanim::SvgCache::new(framebuffer, opts)?;

    for (i, d) in args.paths.iter().enumerate() {
        let obj = parse_arg(d)?;
        let anim = mathanim::AnimObject::new(i as u64 + 1).with_scale(args.scale);
        let entry = cache.put(&anim, &obj)?;
        println!(
            "{}\ttexture={}\tmin=({:.6}, {:.6})\tmax=({:.6}, {:.6})",
            anim.id,
            entry.texture.id,
            entry.tex_coords_min.x,
            entry.tex_coords_min.y,
            entry.tex_coords_max.x,
            entry.tex_coords_max.y
        );
    }
    eprintln!(
        "atlas {}x{} entries={}",
        cache.opts().atlas_width,
        cache.opts().atlas_height,
        cache.len()
    );

    if let Some(out) = args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        cache.framebuffer().save_png(0, &out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read svg '{}'", args.in_path.display()))?;
    let mut group = mathanim::SvgGroup::from_svg_str(&text)?;
    if args.normalize {
        group.normalize();
    }
    for (name, obj) in group.unique_object_names.iter().zip(&group.unique_objects) {
        println!("{name}\t{}", mathanim::to_path_string(obj));
    }
    eprintln!(
        "imported {} objects ({} unique)",
        group.len(),
        group.unique_objects.len()
    );
    Ok(())
}
