use anyhow::Result;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tilecut_core::{Blob, TileCoord};
use tilecut_pipeline::TileRenderer;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// vector tile file, gzipped or not
	#[arg()]
	input_file: PathBuf,

	/// address of the tile as z/x/y, needed to project it back to WGS84
	#[arg(long, short, value_name = "z/x/y")]
	tile: TileCoord,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let json = inspect(arguments)?;
	println!("{}", serde_json::to_string_pretty(&json)?);
	Ok(())
}

/// Returns an object mapping every layer name to its FeatureCollection.
fn inspect(arguments: &Subcommand) -> Result<Value> {
	let blob = Blob::load_from_file(&arguments.input_file)?;
	let collections = TileRenderer::default().inspect(&arguments.tile, &blob)?;
	Ok(Value::Object(
		collections
			.into_iter()
			.map(|(name, collection)| (name, collection.to_json()))
			.collect::<Map<String, Value>>(),
	))
}
