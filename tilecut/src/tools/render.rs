use anyhow::{Context, Result, anyhow};
use log::info;
use std::{
	collections::BTreeMap,
	fs::{File, create_dir_all},
	io::BufReader,
	path::{Path, PathBuf},
	sync::Arc,
};
use tilecut_core::TileCoord;
use tilecut_geometry::geojson::read_geojson;
use tilecut_pipeline::{PipelineConfig, TileRenderer};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoJSON file with a FeatureCollection
	#[arg()]
	input_file: PathBuf,

	/// tile to render as z/x/y, can be given multiple times
	#[arg(long = "tile", short, value_name = "z/x/y", required = true, display_order = 1)]
	tiles: Vec<TileCoord>,

	/// tiles are written to <OUTPUT_DIR>/<z>/<x>/<y>.mvt
	#[arg(long, short, display_order = 1)]
	output_dir: PathBuf,

	/// YAML file with rendering settings
	#[arg(long, short, display_order = 2)]
	config: Option<PathBuf>,

	/// name of the layer, defaults to the input file name without extension
	#[arg(long, short, display_order = 2)]
	layer: Option<String>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("render {:?} into {:?}", arguments.input_file, arguments.output_dir);

	let config = match &arguments.config {
		Some(path) => PipelineConfig::from_path(path)?,
		None => PipelineConfig::default(),
	};

	let file = File::open(&arguments.input_file).with_context(|| format!("Failed to open {:?}", arguments.input_file))?;
	let collection =
		read_geojson(BufReader::new(file)).with_context(|| format!("Failed to read {:?}", arguments.input_file))?;

	let layer_name = match &arguments.layer {
		Some(name) => name.clone(),
		None => layer_name_from_path(&arguments.input_file)?,
	};
	info!("read {} features into layer '{layer_name}'", collection.len());

	let collections = Arc::new(BTreeMap::from([(layer_name, collection)]));
	let renderer = TileRenderer::new(config);
	let tiles = renderer.render_many(arguments.tiles.clone(), collections).await?;

	for (coord, blob) in &tiles {
		let path = tile_path(&arguments.output_dir, coord);
		if let Some(parent) = path.parent() {
			create_dir_all(parent).with_context(|| format!("Failed to create directory {parent:?}"))?;
		}
		blob.save_to_file(&path)?;
		info!("wrote {path:?}");
	}

	eprintln!("rendered {} of {} tiles", tiles.len(), arguments.tiles.len());
	Ok(())
}

fn layer_name_from_path(path: &Path) -> Result<String> {
	path
		.file_stem()
		.and_then(|stem| stem.to_str())
		.map(str::to_string)
		.ok_or_else(|| anyhow!("can not derive a layer name from {path:?}, use --layer"))
}

fn tile_path(dir: &Path, coord: &TileCoord) -> PathBuf {
	dir
		.join(coord.level.to_string())
		.join(coord.x.to_string())
		.join(format!("{}.mvt", coord.y))
}
