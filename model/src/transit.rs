use anyhow::Result;
use geojson::Value;

use crate::features::{attr, AttrValue, Feature, Geometry, Layer, LayerKind};
use crate::import;

const LINE_RENAMES: [(&str, &str); 2] = [("route", attr::LINE), ("ref", attr::LINE)];
const STOP_RENAMES: [(&str, &str); 2] = [("type", attr::STOP_TYPE), ("station", attr::STOP_TYPE)];

/// Loads the transit line network. MultiLineStrings split into one shape per
/// branch, each carrying the same attributes.
pub fn load_lines<R: std::io::Read>(reader: R) -> Result<Layer> {
    let mut layer = Layer::new(LayerKind::TransitLine, "Transit lines");
    for feature in import::read_collection(reader)? {
        let geometry = match &feature.geometry {
            Some(geometry) => geometry,
            None => {
                warn!("Skipping a transit line with no geometry");
                continue;
            }
        };
        let parts = match &geometry.value {
            Value::LineString(points) => vec![points.clone()],
            Value::MultiLineString(lines) => lines.clone(),
            other => {
                warn!(
                    "Skipping a transit line with geometry {:?}",
                    other.type_name()
                );
                continue;
            }
        };
        let attributes = import::attributes(feature.properties.as_ref(), &LINE_RENAMES);
        for points in parts {
            match import::lon_lats(&points) {
                Some(points) if points.len() >= 2 => {
                    layer.push(Feature {
                        geometry: Geometry::LineString(points),
                        attributes: attributes.clone(),
                    });
                }
                _ => warn!("Skipping a transit line branch with malformed coordinates"),
            }
        }
    }
    info!("Loaded {} transit line branches", layer.len());
    Ok(layer)
}

/// Loads the stop markers. Every stop gets a lowercased category under
/// stopType so the zoom policy can sort them into bands.
pub fn load_stops<R: std::io::Read>(reader: R) -> Result<Layer> {
    let mut layer = Layer::new(LayerKind::TransitStop, "Transit stops");
    for feature in import::read_collection(reader)? {
        let point = match &feature.geometry {
            Some(geometry) => match &geometry.value {
                Value::Point(position) => import::lon_lat(position),
                other => {
                    warn!("Skipping a stop with geometry {:?}", other.type_name());
                    continue;
                }
            },
            None => None,
        };
        let point = match point {
            Some(point) => point,
            None => {
                warn!("Skipping a stop with no usable position");
                continue;
            }
        };
        let mut attributes = import::attributes(feature.properties.as_ref(), &STOP_RENAMES);
        let category = attributes
            .text(attr::STOP_TYPE)
            .map(|category| category.trim().to_lowercase());
        if let Some(category) = category {
            attributes.set(attr::STOP_TYPE, AttrValue::Text(category));
        }
        layer.push(Feature {
            geometry: Geometry::Point(point),
            attributes,
        });
    }
    info!("Loaded {} transit stops", layer.len());
    Ok(layer)
}
