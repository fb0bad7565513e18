use clap::Parser;
use houghstereo::io::{load_edge_map, load_gray_image};
use houghstereo::{
    disparity_blocks, find_circles, hough_lines_acc, hough_peaks, merge_circles,
    CircleSearchConfig, DisparityConfig, LineAccumulatorConfig, Neighborhood, OwnedImage,
    PeakConfig, RhoPolicy, Threshold, ThetaGrid,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod overlay;

const EXAMPLE_JSON: &str = r#"{
  "edges_path": "edges.png",
  "edge_threshold": null,
  "background_path": "scene.png",
  "overlay_path": "overlay.png",
  "output_path": null,
  "lines": {
    "theta_start_deg": -89.0,
    "theta_stop_deg": 90.0,
    "theta_count": 180,
    "rho_resolution": 1,
    "rho_policy": "skip",
    "max_peaks": 10,
    "neighborhood": null,
    "threshold_ratio": 0.5
  },
  "circles": {
    "radii": [20, 21, 22, 23, 24, 25],
    "max_circles_per_radius": 5,
    "neighborhood": [41, 41],
    "threshold_ratio": 0.7,
    "parallel": false,
    "merge": { "center_radius": 3, "radius_tolerance": 1 }
  },
  "disparity": {
    "left_path": "left.png",
    "right_path": "right.png",
    "block_width": 16,
    "block_height": 16,
    "parallel": false
  }
}"#;

#[derive(Parser, Debug)]
#[command(author, version, about = "HoughStereo CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RhoPolicyConfig {
    Skip,
    Clamp,
    Reject,
}

impl From<RhoPolicyConfig> for RhoPolicy {
    fn from(value: RhoPolicyConfig) -> Self {
        match value {
            RhoPolicyConfig::Skip => RhoPolicy::Skip,
            RhoPolicyConfig::Clamp => RhoPolicy::Clamp,
            RhoPolicyConfig::Reject => RhoPolicy::Reject,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LinesJson {
    theta_start_deg: f64,
    theta_stop_deg: f64,
    theta_count: usize,
    rho_resolution: usize,
    rho_policy: RhoPolicyConfig,
    max_peaks: usize,
    neighborhood: Option<[usize; 2]>,
    threshold_ratio: f64,
}

impl Default for LinesJson {
    fn default() -> Self {
        let acc = LineAccumulatorConfig::default();
        let peaks = PeakConfig::default();
        let threshold_ratio = match peaks.threshold {
            Threshold::RelativeToMax(ratio) | Threshold::Absolute(ratio) => ratio,
        };
        Self {
            theta_start_deg: acc.thetas.as_slice().first().copied().unwrap_or(-89.0),
            theta_stop_deg: acc.thetas.as_slice().last().copied().unwrap_or(90.0),
            theta_count: acc.thetas.len(),
            rho_resolution: acc.rho_resolution,
            rho_policy: RhoPolicyConfig::Skip,
            max_peaks: peaks.max_peaks,
            neighborhood: None,
            threshold_ratio,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MergeJson {
    center_radius: usize,
    radius_tolerance: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CirclesJson {
    radii: Vec<usize>,
    max_circles_per_radius: usize,
    neighborhood: [usize; 2],
    threshold_ratio: f64,
    parallel: bool,
    merge: Option<MergeJson>,
}

impl Default for CirclesJson {
    fn default() -> Self {
        let cfg = CircleSearchConfig::default();
        Self {
            radii: Vec::new(),
            max_circles_per_radius: cfg.max_circles_per_radius,
            neighborhood: [cfg.neighborhood.0, cfg.neighborhood.1],
            threshold_ratio: cfg.threshold_ratio,
            parallel: cfg.parallel,
            merge: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DisparityJson {
    left_path: String,
    right_path: String,
    block_width: usize,
    block_height: usize,
    parallel: bool,
}

impl Default for DisparityJson {
    fn default() -> Self {
        let cfg = DisparityConfig::default();
        Self {
            left_path: String::new(),
            right_path: String::new(),
            block_width: cfg.block_width,
            block_height: cfg.block_height,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    edges_path: Option<String>,
    edge_threshold: Option<u8>,
    background_path: Option<String>,
    overlay_path: Option<String>,
    output_path: Option<String>,
    lines: Option<LinesJson>,
    circles: Option<CirclesJson>,
    disparity: Option<DisparityJson>,
}

#[derive(Debug, Serialize)]
struct LineRecord {
    rho: f64,
    theta_deg: f64,
    rho_idx: usize,
    theta_idx: usize,
    votes: u32,
}

#[derive(Debug, Serialize)]
struct CircleRecord {
    row: usize,
    col: usize,
    radius: usize,
    votes: u32,
}

#[derive(Debug, Default, Serialize)]
struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<Vec<LineRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    circles: Option<Vec<CircleRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disparity: Option<Vec<Vec<i32>>>,
}

fn load_edges(config: &Config) -> Result<OwnedImage<bool>, Box<dyn std::error::Error>> {
    let path = config
        .edges_path
        .as_deref()
        .ok_or("edges_path must be set for line or circle detection")?;
    let edges = match config.edge_threshold {
        Some(threshold) => load_gray_image(path)?.to_edge_map(threshold),
        None => load_edge_map(path)?,
    };
    Ok(edges)
}

fn run_lines(
    edges: &OwnedImage<bool>,
    cfg: &LinesJson,
) -> Result<Vec<LineRecord>, Box<dyn std::error::Error>> {
    let acc_cfg = LineAccumulatorConfig {
        thetas: ThetaGrid::linspace(cfg.theta_start_deg, cfg.theta_stop_deg, cfg.theta_count)?,
        rho_resolution: cfg.rho_resolution,
        rho_policy: cfg.rho_policy.into(),
    };
    let hough = hough_lines_acc(edges.view(), &acc_cfg)?;

    let peak_cfg = PeakConfig {
        max_peaks: cfg.max_peaks,
        neighborhood: cfg.neighborhood.map(|[h, w]| Neighborhood::new(h, w)),
        threshold: Threshold::RelativeToMax(cfg.threshold_ratio),
    };
    peak_cfg.validate()?;

    let records = hough_peaks(hough.accumulator.view(), &peak_cfg)
        .into_iter()
        .filter_map(|peak| {
            let (rho, theta_deg) = hough.line_at(&peak)?;
            Some(LineRecord {
                rho,
                theta_deg,
                rho_idx: peak.row,
                theta_idx: peak.col,
                votes: peak.votes,
            })
        })
        .collect();
    Ok(records)
}

fn run_circles(
    edges: &OwnedImage<bool>,
    cfg: &CirclesJson,
) -> Result<Vec<CircleRecord>, Box<dyn std::error::Error>> {
    if cfg.radii.is_empty() {
        return Err("circles.radii must list at least one radius".into());
    }
    let search_cfg = CircleSearchConfig {
        max_circles_per_radius: cfg.max_circles_per_radius,
        neighborhood: (cfg.neighborhood[0], cfg.neighborhood[1]),
        threshold_ratio: cfg.threshold_ratio,
        parallel: cfg.parallel,
    };
    let mut found = find_circles(edges.view(), &cfg.radii, &search_cfg)?;
    if let Some(merge) = &cfg.merge {
        found = merge_circles(&found, merge.center_radius, merge.radius_tolerance);
    }
    Ok(found
        .iter()
        .map(|((row, col), radius, votes)| CircleRecord {
            row,
            col,
            radius,
            votes,
        })
        .collect())
}

fn run_disparity(cfg: &DisparityJson) -> Result<Vec<Vec<i32>>, Box<dyn std::error::Error>> {
    if cfg.left_path.is_empty() || cfg.right_path.is_empty() {
        return Err("disparity.left_path and disparity.right_path must be set".into());
    }
    let left = load_gray_image(&cfg.left_path)?;
    let right = load_gray_image(&cfg.right_path)?;
    let map = disparity_blocks(
        left.view(),
        right.view(),
        &DisparityConfig {
            block_width: cfg.block_width,
            block_height: cfg.block_height,
            parallel: cfg.parallel,
        },
    )?;
    Ok(map.to_nested())
}

fn write_overlay(
    config: &Config,
    edges: &OwnedImage<bool>,
    output: &Output,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let background = match &config.background_path {
        Some(bg) => load_gray_image(bg)?,
        None => {
            let data = edges.data().iter().map(|&e| if e { 255 } else { 0 }).collect();
            OwnedImage::new(data, edges.width(), edges.height())?
        }
    };
    if background.width() != edges.width() || background.height() != edges.height() {
        return Err("background image must match the edge map dimensions".into());
    }

    let mut canvas = overlay::canvas_from_gray(background.view())
        .ok_or("failed to allocate overlay canvas")?;
    for line in output.lines.iter().flatten() {
        let (from, to) =
            overlay::line_endpoints(line.rho, line.theta_deg, edges.width(), edges.height());
        overlay::draw_segment(&mut canvas, from, to, overlay::LINE_COLOR);
    }
    for circle in output.circles.iter().flatten() {
        overlay::draw_circle(
            &mut canvas,
            (circle.row, circle.col),
            circle.radius,
            overlay::CIRCLE_COLOR,
        );
    }
    canvas.save(path)?;
    tracing::info!(path = path, "overlay written");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("houghstereo=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.lines.is_none() && config.circles.is_none() && config.disparity.is_none() {
        return Err("config must enable at least one of lines, circles, disparity".into());
    }

    let mut output = Output::default();
    let edges = if config.lines.is_some() || config.circles.is_some() {
        Some(load_edges(&config)?)
    } else {
        None
    };

    if let (Some(edges), Some(lines)) = (&edges, &config.lines) {
        output.lines = Some(run_lines(edges, lines)?);
    }
    if let (Some(edges), Some(circles)) = (&edges, &config.circles) {
        output.circles = Some(run_circles(edges, circles)?);
    }
    if let Some(disparity) = &config.disparity {
        output.disparity = Some(run_disparity(disparity)?);
    }

    if let (Some(path), Some(edges)) = (&config.overlay_path, &edges) {
        write_overlay(&config, edges, &output, path)?;
    }

    let json = serde_json::to_string_pretty(&output)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
