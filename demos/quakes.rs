//! Cluster an earthquake listing and draw it on a world map.
//!
//! ```text
//! cargo run --example quakes -- earthquakes.txt --output quakes.svg \
//!     --background worldmap1800_900.gif
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use quakemap::cluster::{DEFAULT_K, DEFAULT_PASSES};
use quakemap::{Kmeans, Loader, Palette, Renderer, SvgRenderer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quakes")]
#[command(about = "Group earthquake epicenters with k-means and plot them", long_about = None)]
struct Cli {
    /// Delimited listing with a header; latitude in column 2, longitude in column 3.
    input: PathBuf,

    /// Number of clusters.
    #[arg(long, short, default_value_t = DEFAULT_K)]
    k: usize,

    /// Number of assignment/update passes.
    #[arg(long, short, default_value_t = DEFAULT_PASSES)]
    passes: usize,

    /// Seed for centroid selection (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Field delimiter.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Where to write the SVG map.
    #[arg(long, short, default_value = "quakes.svg")]
    output: PathBuf,

    /// Background image to stretch under the markers.
    #[arg(long)]
    background: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "quakemap=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let delimiter = u8::try_from(cli.delimiter).context("delimiter must be a single byte")?;
    let catalog = Loader::new()
        .with_delimiter(delimiter)
        .load(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    tracing::info!(points = catalog.len(), "catalog loaded");

    let mut model = Kmeans::new(cli.k).with_passes(cli.passes);
    if let Some(seed) = cli.seed {
        model = model.with_seed(seed);
    }
    let fit = model.fit(&catalog)?;

    for (index, group) in fit.partition.groups().iter().enumerate() {
        let centroid = &fit.centroids[index];
        println!(
            "cluster {index}: {:4} quakes around ({:8.3}, {:7.3})",
            group.len(),
            centroid[0],
            centroid[1]
        );
    }

    let out = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut renderer = SvgRenderer::new(BufWriter::new(out));
    if let Some(href) = cli.background {
        renderer = renderer.with_background(href);
    }
    renderer.render(&fit.partition, &catalog, &Palette::default())?;
    tracing::info!(output = %cli.output.display(), "map written");

    Ok(())
}
