use anyhow::Result;
use geojson::Value;

use crate::features::{attr, Feature, Geometry, Layer, LayerKind};
use crate::import;
use crate::style::{ColorScale, Shading};

/// Renames from the city's open data portal into canonical keys.
const RENAMES: [(&str, &str); 2] = [
    ("plz", attr::POSTAL_CODE),
    ("Intersect_", attr::PARK_COVERAGE),
];

/// Loads the district polygons, shaded by park coverage. Features that aren't
/// polygons (or are malformed) are logged and skipped; one bad district
/// shouldn't take the whole layer down.
pub fn load<R: std::io::Read>(reader: R) -> Result<Layer> {
    let mut layer = Layer::new(LayerKind::District, "Districts");
    layer.shading = Some(Shading {
        attribute: attr::PARK_COVERAGE.to_string(),
        scale: ColorScale::park_coverage(),
    });

    for feature in import::read_collection(reader)? {
        let geometry = match &feature.geometry {
            Some(geometry) => geometry,
            None => {
                warn!("Skipping a district with no geometry");
                continue;
            }
        };
        let rings = match &geometry.value {
            Value::Polygon(rings) => rings.clone(),
            Value::MultiPolygon(polygons) if !polygons.is_empty() => {
                if polygons.len() > 1 {
                    warn!(
                        "A district has {} polygons; keeping only the first",
                        polygons.len()
                    );
                }
                polygons[0].clone()
            }
            other => {
                warn!("Skipping a district with geometry {:?}", other.type_name());
                continue;
            }
        };
        let rings: Option<Vec<_>> = rings.iter().map(|ring| import::lon_lats(ring)).collect();
        let rings = match rings {
            Some(rings) if !rings.is_empty() => rings,
            _ => {
                warn!("Skipping a district with malformed coordinates");
                continue;
            }
        };
        layer.push(Feature {
            geometry: Geometry::Polygon(rings),
            attributes: import::attributes(feature.properties.as_ref(), &RENAMES),
        });
    }
    info!("Loaded {} districts", layer.len());
    Ok(layer)
}
