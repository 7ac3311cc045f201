use anyhow::Result;
use geojson::{GeoJson, JsonObject};

use crate::features::{AttrValue, Attributes, LonLat};

/// Parses a reader as GeoJSON and hands back its features. A file holding a
/// single bare feature also works.
pub fn read_collection<R: std::io::Read>(reader: R) -> Result<Vec<geojson::Feature>> {
    let geojson: GeoJson = serde_json::from_reader(reader)?;
    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(feature) => Ok(vec![feature]),
        GeoJson::Geometry(_) => bail!("Expected a FeatureCollection, got a bare geometry"),
    }
}

/// GeoJSON positions are [lon, lat, maybe altitude]. None if the position is
/// too short to mean anything.
pub fn lon_lat(position: &[f64]) -> Option<LonLat> {
    if position.len() < 2 {
        return None;
    }
    Some(LonLat::new(position[0], position[1]))
}

pub fn lon_lats(positions: &[Vec<f64>]) -> Option<Vec<LonLat>> {
    positions.iter().map(|position| lon_lat(position)).collect()
}

/// Copies properties into canonical attributes, applying (source, canonical)
/// key renames. Strings and numbers survive; bools become 0/1 numbers; nested
/// arrays and objects have no meaning on the dashboard and are dropped.
pub fn attributes(properties: Option<&JsonObject>, renames: &[(&str, &str)]) -> Attributes {
    let mut attributes = Attributes::new();
    let properties = match properties {
        Some(x) => x,
        None => {
            return attributes;
        }
    };
    for (key, value) in properties {
        let key = renames
            .iter()
            .find(|(from, _)| *from == key.as_str())
            .map(|(_, to)| *to)
            .unwrap_or(key.as_str());
        match value {
            serde_json::Value::Number(x) => {
                if let Some(x) = x.as_f64() {
                    attributes.set(key, AttrValue::Number(x));
                }
            }
            serde_json::Value::String(x) => {
                attributes.set(key, AttrValue::Text(x.clone()));
            }
            serde_json::Value::Bool(x) => {
                attributes.set(key, AttrValue::Number(if *x { 1.0 } else { 0.0 }));
            }
            _ => {}
        }
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_collection() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [11.57, 48.14]},
                    "properties": {"name": "somewhere"}
                }
            ]
        }"#;
        let features = read_collection(raw.as_bytes()).unwrap();
        assert_eq!(features.len(), 1);

        assert!(read_collection("{\"type\": \"Point\", \"coordinates\": [0, 0]}".as_bytes()).is_err());
        assert!(read_collection("not json".as_bytes()).is_err());
    }

    #[test]
    fn test_positions() {
        assert_eq!(lon_lat(&[11.5, 48.1]), Some(LonLat::new(11.5, 48.1)));
        assert_eq!(lon_lat(&[11.5, 48.1, 520.0]), Some(LonLat::new(11.5, 48.1)));
        assert_eq!(lon_lat(&[11.5]), None);
        assert_eq!(lon_lats(&[vec![11.5, 48.1], vec![11.6]]), None);
    }

    #[test]
    fn test_attributes_rename_and_convert() {
        let raw = r#"{"plz": "80331", "Intersect_": 4.5, "new": true, "tags": ["a"]}"#;
        let object: JsonObject = serde_json::from_str(raw).unwrap();
        let attributes = attributes(
            Some(&object),
            &[("plz", "postalCode"), ("Intersect_", "parkCoverage")],
        );
        assert_eq!(attributes.text("postalCode"), Some("80331"));
        assert_eq!(attributes.number("parkCoverage"), Some(4.5));
        assert_eq!(attributes.number("new"), Some(1.0));
        assert_eq!(attributes.get("tags"), None);
        assert_eq!(attributes.get("plz"), None, "source key is gone after rename");
    }
}
