use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use treesweep_datasets::{DatasetConfig, SyntheticDataset};
use treesweep_plot::plot_datasets;
use treesweep_sweep::export::DEFAULT_FPS;
use treesweep_sweep::{output_file_name, render_sweep, save_rendered, Animation, FrameRenderer, FrameStats};

const OVERVIEW_FILE: &str = "datasets_overview.png";
const OVERVIEW_SIZE: (u32, u32) = (1500, 500);

#[derive(Parser, Debug)]
#[command(
    name = "treesweep",
    version,
    about = "Decision boundaries of CART trees swept over max depth"
)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    /// Directory receiving the PNG and GIF files.
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser, Debug)]
struct DataArgs {
    /// Points per dataset.
    #[arg(long, global = true, default_value_t = 300)]
    samples: usize,

    /// Seed of the dataset generators.
    #[arg(long, global = true, default_value_t = 42)]
    seed: u64,

    /// Cluster separation of the linearly separable dataset.
    #[arg(long, global = true, default_value_t = 1.0)]
    class_sep: f64,

    #[arg(long, global = true, default_value_t = 0.2)]
    moons_noise: f64,

    #[arg(long, global = true, default_value_t = 0.1)]
    circles_noise: f64,

    /// Inner to outer radius ratio, in [0, 1).
    #[arg(long, global = true, default_value_t = 0.5)]
    circles_factor: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot the three datasets side by side as a PNG.
    Overview {
        /// Output PNG path, defaults to `<out-dir>/datasets_overview.png`.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render depth sweeps and save them as GIFs.
    Animate(AnimateArgs),
    /// Step through a sweep in the terminal.
    Play(PlayArgs),
    /// Overview plus animations of every dataset.
    Run(SweepArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DatasetChoice {
    Linear,
    Moons,
    Circles,
    All,
}

impl DatasetChoice {
    fn kinds(self) -> Vec<SyntheticDataset> {
        match self {
            DatasetChoice::Linear => vec![SyntheticDataset::Linear],
            DatasetChoice::Moons => vec![SyntheticDataset::Moons],
            DatasetChoice::Circles => vec![SyntheticDataset::Circles],
            DatasetChoice::All => SyntheticDataset::ALL.to_vec(),
        }
    }
}

/// Depth ceilings, one per frame.
#[derive(Clone, Debug, PartialEq)]
struct DepthSweep(Vec<usize>);

/// Accepts `a..=b`, `a..b` or a comma separated list such as `1,2,4`.
fn parse_depths(s: &str) -> Result<DepthSweep, String> {
    let num = |t: &str| {
        t.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid depth '{}': {}", t.trim(), e))
    };
    let depths = if let Some((a, b)) = s.split_once("..=") {
        (num(a)?..=num(b)?).collect::<Vec<_>>()
    } else if let Some((a, b)) = s.split_once("..") {
        (num(a)?..num(b)?).collect::<Vec<_>>()
    } else {
        s.split(',').map(num).collect::<Result<Vec<_>, _>>()?
    };
    if depths.is_empty() {
        return Err(format!("'{}' contains no depths", s));
    }
    Ok(DepthSweep(depths))
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Depth ceilings to sweep.
    #[arg(long, default_value = "1..=10", value_parser = parse_depths)]
    depths: DepthSweep,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = 800)]
    interval: u64,

    /// Frames per second of the GIFs.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[arg(long, value_enum, default_value_t = DatasetChoice::All)]
    dataset: DatasetChoice,

    #[command(flatten)]
    sweep: SweepArgs,

    /// Also write per-frame stats as JSON.
    #[arg(long)]
    stats_json: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[arg(long, value_enum, default_value_t = DatasetChoice::Moons)]
    dataset: DatasetChoice,

    #[arg(long, default_value = "1..=10", value_parser = parse_depths)]
    depths: DepthSweep,

    #[arg(long, default_value_t = 800)]
    interval: u64,
}

#[derive(Serialize, Debug)]
struct FrameRecord {
    max_depth: usize,
    #[serde(flatten)]
    stats: FrameStats,
}

#[derive(Serialize, Debug)]
struct SweepRecord {
    dataset: &'static str,
    frames: Vec<FrameRecord>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = dataset_config(&cli.data);
    let out_dir = cli.out_dir;
    match cli.cmd {
        Command::Overview { out } => cmd_overview(&config, &overview_path(out, &out_dir)),
        Command::Animate(args) => cmd_animate(&config, &out_dir, args),
        Command::Play(args) => cmd_play(&config, args),
        Command::Run(sweep) => {
            cmd_overview(&config, &overview_path(None, &out_dir))?;
            let args = AnimateArgs {
                dataset: DatasetChoice::All,
                sweep,
                stats_json: None,
            };
            cmd_animate(&config, &out_dir, args)
        }
    }
}

fn overview_path(out: Option<PathBuf>, out_dir: &Path) -> PathBuf {
    out.unwrap_or_else(|| out_dir.join(OVERVIEW_FILE))
}

fn dataset_config(args: &DataArgs) -> DatasetConfig {
    DatasetConfig {
        n_samples: args.samples,
        seed: args.seed,
        class_sep: args.class_sep,
        moons_noise: args.moons_noise,
        circles_noise: args.circles_noise,
        circles_factor: args.circles_factor,
        ..DatasetConfig::default()
    }
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_overview(config: &DatasetConfig, out: &Path) -> anyhow::Result<()> {
    let datasets = SyntheticDataset::ALL
        .iter()
        .map(|kind| {
            kind.generate(config)
                .with_context(|| format!("generate {} dataset", kind.name()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let panels = datasets
        .iter()
        .zip(SyntheticDataset::ALL.iter())
        .map(|(dataset, kind)| (dataset, kind.title()))
        .collect::<Vec<_>>();

    create_parent(out)?;
    plot_datasets(out, &panels, OVERVIEW_SIZE)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn build_animations(
    config: &DatasetConfig,
    kinds: &[SyntheticDataset],
    depths: &DepthSweep,
    interval: u64,
) -> anyhow::Result<Vec<(SyntheticDataset, Animation)>> {
    kinds
        .iter()
        .map(|&kind| {
            let dataset = kind
                .generate(config)
                .with_context(|| format!("generate {} dataset", kind.name()))?;
            let animation = render_sweep(
                dataset.records(),
                dataset.targets(),
                &depths.0,
                interval,
                kind.title(),
            )
            .with_context(|| format!("sweep {} dataset", kind.name()))?;
            Ok((kind, animation))
        })
        .collect()
}

fn cmd_animate(config: &DatasetConfig, out_dir: &Path, args: AnimateArgs) -> anyhow::Result<()> {
    let animations = build_animations(
        config,
        &args.dataset.kinds(),
        &args.sweep.depths,
        args.sweep.interval,
    )?;

    let mut rendered = Vec::new();
    for (kind, animation) in &animations {
        let frames = animation
            .frames()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("fit {} frames", kind.name()))?;
        for frame in &frames {
            info!(
                dataset = kind.name(),
                max_depth = frame.max_depth,
                nodes = frame.stats.node_count,
                leaves = frame.stats.leaf_count,
                depth = frame.stats.depth,
                accuracy = frame.stats.accuracy,
                "frame"
            );
        }
        rendered.push(frames);
    }

    if let Some(path) = &args.stats_json {
        let records = animations
            .iter()
            .zip(&rendered)
            .map(|((kind, _), frames)| SweepRecord {
                dataset: kind.name(),
                frames: frames
                    .iter()
                    .map(|frame| FrameRecord {
                        max_depth: frame.max_depth,
                        stats: frame.stats,
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();
        create_parent(path)?;
        let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &records)
            .with_context(|| format!("write stats '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
    let jobs = animations
        .iter()
        .zip(&rendered)
        .map(|((kind, animation), frames)| {
            (animation, &frames[..], out_dir.join(output_file_name(kind.name())))
        })
        .collect::<Vec<_>>();
    let report = save_rendered(&jobs, args.sweep.fps);
    for path in &report.written {
        eprintln!("wrote {}", path.display());
    }
    if let Some(diagnostic) = &report.diagnostic {
        eprintln!("{}", diagnostic);
    }
    Ok(())
}

fn cmd_play(config: &DatasetConfig, args: PlayArgs) -> anyhow::Result<()> {
    let animations = build_animations(config, &args.dataset.kinds(), &args.depths, args.interval)?;
    for (kind, animation) in &animations {
        for frame in animation.frames() {
            let frame = frame.with_context(|| format!("fit {} frame", kind.name()))?;
            if frame.index > 0 {
                std::thread::sleep(animation.frame_interval());
            }
            println!("{}", FrameRenderer::caption(animation, &frame));
            for line in frame.stats.lines() {
                println!("  {}", line);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_depths_works() {
        assert_eq!(parse_depths("1..=4").unwrap().0, vec![1, 2, 3, 4]);
        assert_eq!(parse_depths("2..5").unwrap().0, vec![2, 3, 4]);
        assert_eq!(parse_depths("1, 2,8").unwrap().0, vec![1, 2, 8]);
        assert_eq!(parse_depths("3").unwrap().0, vec![3]);
    }

    #[test]
    fn parse_depths_rejects_garbage() {
        assert!(parse_depths("").is_err());
        assert!(parse_depths("5..=2").is_err());
        assert!(parse_depths("1,x").is_err());
    }

    #[test]
    fn overview_defaults_into_out_dir() {
        let out_dir = Path::new("figures");
        assert_eq!(overview_path(None, out_dir), out_dir.join(OVERVIEW_FILE));
        assert_eq!(
            overview_path(Some(PathBuf::from("a.png")), out_dir),
            PathBuf::from("a.png")
        );

        let cli = Cli::try_parse_from(["treesweep", "--out-dir", "figures", "overview"]).unwrap();
        assert_eq!(cli.out_dir, PathBuf::from("figures"));
        assert!(matches!(cli.cmd, Command::Overview { out: None }));
    }

    #[test]
    fn class_sep_has_no_noise_alias() {
        assert!(Cli::try_parse_from(["treesweep", "--linear-noise", "2", "overview"]).is_err());
        let cli = Cli::try_parse_from(["treesweep", "--class-sep", "2", "overview"]).unwrap();
        assert_eq!(cli.data.class_sep, 2.0);
    }

    #[test]
    fn animate_creates_missing_out_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("fresh").join("gifs");
        let stats = tmp.path().join("stats.json");
        let config = DatasetConfig {
            n_samples: 60,
            ..DatasetConfig::default()
        };
        let args = AnimateArgs {
            dataset: DatasetChoice::Moons,
            sweep: SweepArgs {
                depths: DepthSweep(vec![1, 2]),
                interval: 800,
                fps: DEFAULT_FPS,
            },
            stats_json: Some(stats.clone()),
        };

        cmd_animate(&config, &out_dir, args).unwrap();
        assert!(out_dir.is_dir());

        let text = std::fs::read_to_string(&stats).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json[0]["dataset"], "moons");
        assert_eq!(json[0]["frames"].as_array().unwrap().len(), 2);
        assert_eq!(json[0]["frames"][1]["max_depth"], 2);
    }

    #[test]
    fn global_flags_reach_dataset_config() {
        let cli = Cli::try_parse_from([
            "treesweep",
            "animate",
            "--dataset",
            "moons",
            "--samples",
            "120",
            "--depths",
            "1,3",
        ])
        .unwrap();
        let config = dataset_config(&cli.data);
        assert_eq!(config.n_samples, 120);
        assert_eq!(config.seed, 42);

        match cli.cmd {
            Command::Animate(args) => {
                assert_eq!(args.dataset, DatasetChoice::Moons);
                assert_eq!(args.sweep.depths, DepthSweep(vec![1, 3]));
                assert_eq!(args.sweep.fps, DEFAULT_FPS);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
