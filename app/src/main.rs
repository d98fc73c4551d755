use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use kitti_dataset::config::DataSplit;
use kitti_dataset::{DatasetConfig, KittiDataset, Phase};
use kitti_parser::pose::load_poses;
use kitti_parser::timestamps::load_timestamps;

#[derive(Parser, Debug)]
#[command(
    name = "KITTI Scan",
    about = "Inspection tool for KITTI odometry LiDAR data",
    version = "0.1.0"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a dataset index and iterate over its scans
    Scan(ScanArgs),
    /// Parse a pose file and report the trajectory
    Poses {
        #[arg(short, long, required = true, value_name = "FILE")]
        file: PathBuf,

        /// Dump the position list as JSON to stdout
        #[arg(long)]
        json: bool,
    },
    /// Parse a timestamp file
    Times {
        #[arg(short, long, required = true, value_name = "FILE")]
        file: PathBuf,

        /// Dump the parsed seconds as JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Dataset root, the directory holding sequences/
    #[arg(short, long, required = true, value_name = "DIR")]
    root: PathBuf,

    /// Subset to load: train, val or test
    #[arg(short, long, default_value = "train")]
    phase: Phase,

    /// Sequence identifiers assigned to the chosen phase
    #[arg(short, long, required = true, num_args = 1.., value_name = "ID")]
    sequences: Vec<u32>,

    /// Remove the dominant ground plane from every scan
    #[arg(long)]
    gp_rem: bool,

    #[arg(long)]
    random_rotation: bool,

    #[arg(long)]
    random_occlusion: bool,

    #[arg(long)]
    random_scale: bool,

    #[arg(long, default_value_t = 0.8)]
    min_scale: f32,

    #[arg(long, default_value_t = 1.2)]
    max_scale: f32,

    /// Seed for the augmentation RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many scans
    #[arg(long)]
    limit: Option<usize>,
}

fn run_scan(args: ScanArgs) -> Result<(), Box<dyn Error>> {
    let mut split = DataSplit::default();
    match args.phase {
        Phase::Train => split.train = args.sequences,
        Phase::Val => split.val = args.sequences,
        Phase::Test => split.test = args.sequences,
    }

    let config = DatasetConfig {
        root: args.root,
        split,
        ground_removal: args.gp_rem,
        random_rotation: args.random_rotation,
        random_occlusion: args.random_occlusion,
        random_scale: args.random_scale,
        min_scale: args.min_scale,
        max_scale: args.max_scale,
        seed: args.seed,
    };

    let start = std::time::Instant::now();
    let dataset = KittiDataset::new(args.phase, config)?;
    log::info!("dataset ready: {} scans", dataset.len());

    let count = args.limit.unwrap_or(dataset.len()).min(dataset.len());
    let mut total_points = 0usize;
    for i in 0..count {
        let scan = dataset.get(i)?;
        let bv = scan.bounding_volume();
        log::info!(
            "scan {:02}/{:06}: {} points, z range [{:.2}, {:.2}]",
            scan.meta.sequence,
            scan.meta.index,
            scan.len(),
            bv.min[2],
            bv.max[2]
        );
        total_points += scan.len();
    }
    log::info!(
        "{} scans, {} points in {:?}",
        count,
        total_points,
        start.elapsed()
    );

    Ok(())
}

fn run_poses(file: PathBuf, json: bool) -> Result<(), Box<dyn Error>> {
    let (transforms, positions) = load_poses(&file)?;
    log::info!("parsed {} poses from {}", transforms.len(), file.display());

    if let (Some(first), Some(last)) = (transforms.keys().next(), transforms.keys().next_back()) {
        log::info!("frame range: {} to {}", first, last);
    }
    if json {
        println!("{}", serde_json::to_string(&positions)?);
    }

    Ok(())
}

fn run_times(file: PathBuf, json: bool) -> Result<(), Box<dyn Error>> {
    let times = load_timestamps(&file)?;
    log::info!("parsed {} timestamps from {}", times.len(), file.display());

    if let (Some(first), Some(last)) = (times.first(), times.last()) {
        log::info!("span: {:.6}s to {:.6}s", first, last);
    }
    if json {
        println!("{}", serde_json::to_string(&times)?);
    }

    Ok(())
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    let result = match args.command {
        Command::Scan(scan_args) => run_scan(scan_args),
        Command::Poses { file, json } => run_poses(file, json),
        Command::Times { file, json } => run_times(file, json),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
