#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use clap::Parser;
use plotters::prelude::*;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordmap::{BsTreeMap, ChainedHashMap, MapError, RbTreeMap, TreeStats};

// Sorted insertion into the plain BST is quadratic, keep the sizes moderate
const SIZES: [usize; 6] = [250, 500, 1_000, 2_000, 4_000, 8_000];

// Tree shapes to compare
const TREES: [&str; 4] =
    ["BST (random order)", "BST (sorted order)", "BST (balanced build)", "Red-black tree"];

// Plot configuration
const FONT_FAMILY: &str = "sans-serif";
const TEXT_SIZE: u32 = 16;
const TITLE_SIZE: u32 = 35;
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: u32 = 4;
const COLORS: [RGBColor; 5] = [
    RGBColor(220, 50, 50),   // Bright red
    RGBColor(50, 90, 220),   // Bright blue
    RGBColor(50, 180, 50),   // Bright green
    RGBColor(180, 50, 180),  // Bright magenta
    RGBColor(120, 120, 120), // Grey, for reference curves
];

#[derive(Parser, Debug)]
#[clap(
    name = "map_analysis",
    about = "Compares tree shapes and hash chain lengths over growing key sets."
)]
struct Args {
    /// Seed for the key shuffles.
    #[clap(short = 's', long, default_value_t = 42)]
    seed: u64,

    /// Directory the SVG charts are written to.
    #[clap(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,
}

/// Shape of every tree variant, plus the hash table figures, for one key count
struct Measurement {
    trees: [TreeStats; 4],
    load_factor: f64,
    max_chain_length: usize,
    capacity: usize,
}

fn measure(shuffled: &[u32], sorted: &[u32]) -> Result<Measurement, MapError> {
    let pairs = |keys: &[u32]| keys.iter().map(|&key| (key, ())).collect::<Vec<_>>();

    let random: BsTreeMap<_, _> = pairs(shuffled).into_iter().collect();
    let degenerate: BsTreeMap<_, _> = pairs(sorted).into_iter().collect();
    let balanced = BsTreeMap::from_sorted(pairs(sorted))?;
    let red_black: RbTreeMap<_, _> = pairs(shuffled).into_iter().collect();
    let hash: ChainedHashMap<_, _> = pairs(shuffled).into_iter().collect();

    Ok(Measurement {
        trees: [random.stats(), degenerate.stats(), balanced.stats(), red_black.stats()],
        load_factor: hash.load_factor(),
        max_chain_length: hash.max_chain_length(),
        capacity: hash.capacity(),
    })
}

fn draw_chart(
    path: &Path,
    caption: &str,
    y_desc: &str,
    series: &[(&str, Vec<f64>)],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|(_, values)| values.iter())
        .fold(0.0, |max: f64, &x| max.max(x)) *
        1.1; // Add 10% margin
    let max_y = if max_y > 0.0 { max_y } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(SIZES.len() - 1), 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(SIZES.len())
        .x_label_formatter(&|x| SIZES.get(*x).map_or_else(String::new, ToString::to_string))
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for (idx, (label, values)) in series.iter().enumerate() {
        let color = COLORS[idx % COLORS.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(LINE_WIDTH);

        chart
            .draw_series(LineSeries::new(values.iter().copied().enumerate(), line_style))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| Circle::new((i, value), MARKER_SIZE, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    println!(
        "{:>6}  {:<22}{:>8}{:>11}{:>11}",
        "keys", "structure", "height", "hit cost", "miss cost"
    );

    let mut measurements = Vec::with_capacity(SIZES.len());
    for &n_keys in &SIZES {
        let sorted: Vec<u32> = (0..n_keys as u32).collect();
        let mut shuffled = sorted.clone();
        shuffled.shuffle(&mut rng);

        let measurement = measure(&shuffled, &sorted)?;
        for (name, stats) in TREES.iter().zip(&measurement.trees) {
            println!(
                "{:>6}  {:<22}{:>8}{:>11.3}{:>11.3}",
                n_keys,
                name,
                stats.height,
                stats.successful_search_cost(),
                stats.unsuccessful_search_cost()
            );
        }
        println!(
            "{:>6}  {:<22}  load factor {:.3}, longest chain {}, {} buckets",
            n_keys,
            "Chained hash map",
            measurement.load_factor,
            measurement.max_chain_length,
            measurement.capacity
        );
        measurements.push(measurement);
    }

    let per_tree = |metric: fn(&TreeStats) -> f64| -> Vec<(&'static str, Vec<f64>)> {
        TREES
            .iter()
            .enumerate()
            .map(|(tree, &name)| {
                (name, measurements.iter().map(|m| metric(&m.trees[tree])).collect())
            })
            .collect()
    };

    // Heights of the balanced shapes are compared against floor(log2 n)
    let mut heights = per_tree(|stats| stats.height as f64);
    heights.push(("floor(log2 n)", SIZES.iter().map(|&n| f64::from(n.ilog2())).collect()));
    draw_chart(
        &args.output_dir.join("tree_heights.svg"),
        "Tree Height by Insertion Order",
        "Height (edges)",
        &heights,
    )?;

    draw_chart(
        &args.output_dir.join("search_costs.svg"),
        "Expected Comparisons for a Successful Search",
        "Average comparisons",
        &per_tree(TreeStats::successful_search_cost),
    )?;

    draw_chart(
        &args.output_dir.join("hash_chains.svg"),
        "Chained Hash Map Load",
        "Value",
        &[
            ("Load factor", measurements.iter().map(|m| m.load_factor).collect()),
            (
                "Longest chain",
                measurements.iter().map(|m| m.max_chain_length as f64).collect(),
            ),
        ],
    )?;

    println!("Generated plot images: tree_heights.svg, search_costs.svg, hash_chains.svg");

    Ok(())
}
