//! Command-line parameters.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::DVec3;

use fluxglobe::{FluxMaterial, FluxStyle};
use fluxglobe_geom::DEFAULT_SAMPLE_COUNT;

/// Default asset location.
const DEFAULT_ASSETS: &str = "assets/data";
/// Default globe radius in world units.
const DEFAULT_RADIUS: f64 = 300.0;
/// Default home latitude (Nantes).
const DEFAULT_HOME_LAT: f64 = 47.211_76;
/// Default home longitude (Nantes).
const DEFAULT_HOME_LON: f64 = -1.573_00;

#[derive(Parser, Debug)]
#[command(name = "fluxglobe", about = "Bake flux globe overlays and resolve picks")]
pub struct LaunchParams {
    /// Asset base: an http(s) URL or a local directory.
    #[arg(long, global = true, default_value = DEFAULT_ASSETS)]
    pub assets: String,

    /// Globe radius in world units.
    #[arg(long, global = true, default_value_t = DEFAULT_RADIUS)]
    pub radius: f64,

    /// Globe center as `x,y,z`.
    #[arg(long, global = true, value_parser = parse_vec3, default_value = "0,0,0", allow_hyphen_values = true)]
    pub center: DVec3,

    /// Cache budget for fetched assets, in bytes.
    #[arg(long, global = true)]
    pub cache_bytes: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the flux and border layers and write them as JSON.
    Bake(BakeArgs),
    /// Resolve the country under a coordinate or a point on the globe.
    Pick(PickArgs),
}

#[derive(Args, Debug)]
pub struct BakeArgs {
    /// Latitude every flux starts from, in degrees.
    #[arg(long, default_value_t = DEFAULT_HOME_LAT, allow_negative_numbers = true)]
    pub home_lat: f64,

    /// Longitude every flux starts from, in degrees.
    #[arg(long, default_value_t = DEFAULT_HOME_LON, allow_negative_numbers = true)]
    pub home_lon: f64,

    /// Curve construction for each flux.
    #[arg(long, value_enum, default_value_t = Style::DoubleCubic)]
    pub style: Style,

    /// Points sampled along each flux.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    pub samples: usize,

    /// Material the fluxes are drawn with.
    #[arg(long, value_enum, default_value_t = Material::Shader)]
    pub material: Material,

    /// Frames to advance the frame context before writing.
    #[arg(long, default_value_t = 0)]
    pub frames: u64,

    /// Leave out the border layer.
    #[arg(long)]
    pub no_borders: bool,

    /// Output file; stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PickArgs {
    /// Latitude in degrees.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Picked point as `x,y,z`, instead of a coordinate.
    #[arg(long, value_parser = parse_vec3, conflicts_with_all = ["lat", "lon"], allow_hyphen_values = true)]
    pub point: Option<DVec3>,

    /// Ask Nominatim when the index raster has no country.
    #[arg(long)]
    pub online: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Quadratic,
    Cubic,
    DoubleCubic,
    Ribbon,
}

impl From<Style> for FluxStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Quadratic => FluxStyle::Quadratic,
            Style::Cubic => FluxStyle::Cubic,
            Style::DoubleCubic => FluxStyle::DoubleCubic,
            Style::Ribbon => FluxStyle::Ribbon,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    Basic,
    Dashed,
    Shader,
}

impl From<Material> for FluxMaterial {
    fn from(material: Material) -> Self {
        match material {
            Material::Basic => FluxMaterial::basic_line(),
            Material::Dashed => FluxMaterial::dashed_line(),
            Material::Shader => FluxMaterial::shader(),
        }
    }
}

/// Parse `x,y,z` into a vector.
fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{s}'"));
    };
    let component = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| format!("invalid component '{value}': {e}"))
    };
    Ok(DVec3::new(component(*x)?, component(*y)?, component(*z)?))
}
