use anyhow::anyhow;

/// Authority string of the geographic CRS all OSM coordinates come in.
pub const WGS84: &str = "EPSG:4326";

/// Converts geodetic lon/lat coordinates into a planar target CRS.
pub struct Projector {
    transformer: proj::Proj,
}

impl Projector {
    /// Build a projector between two CRS authority identifiers, e.g.
    /// "EPSG:4326" to "EPSG:3857".
    pub fn new(source_crs: &str, target_crs: &str) -> anyhow::Result<Self> {
        let transformer = proj::Proj::new_known_crs(source_crs, target_crs, None)?;
        Ok(Self { transformer })
    }

    pub fn project(&self, lon: f64, lat: f64) -> anyhow::Result<(f64, f64)> {
        self.transformer
            .convert((lon, lat))
            .map_err(|err| anyhow!("Could not project coordinate ({}, {}), {}", lon, lat, err))
    }
}
