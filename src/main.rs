extern crate log;
pub mod crs;
pub mod dxfgen;
pub mod layers;
pub mod osm;
pub mod stats;

use std::fs;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;

use crate::dxfgen::generator::DxfGenerator;
use crate::layers::rules::PlanVariant;
use crate::osm::reader::read_osm_file;
use crate::stats::ConversionStats;

/// Convert OpenStreetMap data to a layered DXF drawing.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input OSM XML file.
    input_file: PathBuf,

    /// Output DXF file path. Defaults to the input path with a .dxf extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target projection for the drawing coordinates.
    #[arg(long, default_value = "EPSG:3857")]
    projection: String,

    /// Plan type: key-plan (simplified) or location-plan (detailed).
    #[arg(long, value_enum, default_value_t = PlanVariant::KeyPlan)]
    plan_type: PlanVariant,

    /// Disable colors for monochrome output.
    #[arg(long)]
    no_colors: bool,

    /// Enable verbose logging.
    #[arg(long)]
    verbose: bool,

    /// Output file for conversion statistics (JSON).
    #[arg(long)]
    stats_output: Option<PathBuf>,
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if std::env::var("RUST_LOG").is_err() {
        let level = if args.verbose { "debug" } else { "info" };
        std::env::set_var("RUST_LOG", level)
    }
    env_logger::init();

    if !args.input_file.exists() {
        return Err(anyhow!("Input file {:?} not found", &args.input_file));
    }
    let output_filepath = args
        .output
        .clone()
        .unwrap_or_else(|| args.input_file.with_extension("dxf"));
    let use_colors = !args.no_colors;

    log::info!("Starting OSM to DXF conversion");
    log::info!("Input: {:?}", args.input_file);
    log::info!("Output: {:?}", output_filepath);
    log::info!("Plan type: {}", args.plan_type.name());
    log::info!("Projection: {}", args.projection);
    log::info!(
        "Colors: {}",
        if use_colors { "enabled" } else { "disabled" }
    );

    log::info!("Parsing OSM data");
    let mut data = read_osm_file(&args.input_file)?;
    log::info!(
        "Parsed {} nodes, {} ways, {} relations",
        data.nodes.len(),
        data.ways.len(),
        data.relations.len()
    );

    log::info!("Generating DXF");
    let mut generator = DxfGenerator::new(&args.projection, use_colors, args.plan_type)?;
    generator.process_nodes(&mut data.nodes)?;
    generator.process_ways(&mut data.ways, &data.nodes);
    generator.save(&output_filepath)?;

    let run_stats = ConversionStats {
        nodes: data.nodes.len(),
        ways: data.ways.len(),
        relations: data.relations.len(),
        layers: generator.layer_count(),
        file_size: fs::metadata(&output_filepath)?.len(),
        plan_type: args.plan_type.name().to_string(),
        projection: args.projection.clone(),
        colors_enabled: use_colors,
    };
    if let Some(stats_filepath) = &args.stats_output {
        stats::write_stats(&run_stats, stats_filepath)?;
        log::info!("Statistics saved to {:?}", stats_filepath);
    }

    log::info!("Conversion completed successfully");
    log::info!("Created {} layers", run_stats.layers);
    log::info!("Output file size: {} bytes", run_stats.file_size);
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
