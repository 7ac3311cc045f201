use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::{self, Shading, Style};

/// Canonical attribute keys produced by the loaders. Source files use a grab
/// bag of names; everything downstream only sees these.
pub mod attr {
    pub const NAME: &str = "name";
    pub const POSTAL_CODE: &str = "postalCode";
    pub const PARK_COVERAGE: &str = "parkCoverage";
    pub const CAFES: &str = "cafe";
    pub const EDUCATION: &str = "education";
    pub const STOP_TYPE: &str = "stopType";
    pub const LINE: &str = "line";
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> LonLat {
        LonLat { lon, lat }
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// Geometry exactly as the renderer consumes it. The core never does any
/// geometric math on these; they pass through from the source files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(LonLat),
    LineString(Vec<LonLat>),
    /// The outer ring first, then holes, following GeoJSON winding.
    Polygon(Vec<Vec<LonLat>>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttrValue::Number(x) => write!(f, "{}", compact_number(*x)),
            AttrValue::Text(x) => write!(f, "{}", x),
        }
    }
}

/// Formats whole numbers without a trailing ".0", so a numeric 80331 prints
/// the same way a postal code string reads.
pub(crate) fn compact_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}

/// Per-feature attributes, keyed by the canonical names in `attr`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Attributes {
        Attributes(BTreeMap::new())
    }

    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(AttrValue::Number(x)) => Some(*x),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(AttrValue::Text(x)) => Some(x),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.0.iter()
    }
}

/// One geographic entity. Immutable once loaded; anything that changes at
/// runtime (style, visibility) lives on the wrapping Shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    pub attributes: Attributes,
}

/// Identifies a shape within one layer. IDs are dense indices assigned in
/// load order, so they're only meaningful paired with a LayerKind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShapeID(pub usize);

impl fmt::Display for ShapeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "shape {}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: ShapeID,
    pub feature: Feature,
    pub style: Style,
    pub visible: bool,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LayerKind {
    District,
    TransitLine,
    TransitStop,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayerKind::District => write!(f, "districts"),
            LayerKind::TransitLine => write!(f, "transit lines"),
            LayerKind::TransitStop => write!(f, "transit stops"),
        }
    }
}

/// One overlay on the base map. A layer that hasn't loaded is just empty;
/// nothing downstream distinguishes missing data from an empty file.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub name: String,
    pub shapes: Vec<Shape>,
    pub visible: bool,
    /// Stacking order on the map; higher draws on top.
    pub z_index: i32,
    /// If set, each shape's default fill comes from this attribute.
    pub shading: Option<Shading>,
}

impl Layer {
    pub fn new(kind: LayerKind, name: &str) -> Layer {
        Layer {
            kind,
            name: name.to_string(),
            shapes: Vec::new(),
            visible: true,
            z_index: match kind {
                LayerKind::District => 0,
                LayerKind::TransitLine => 10,
                LayerKind::TransitStop => 20,
            },
            shading: None,
        }
    }

    /// Appends a feature, assigning the next ID and the layer's default style.
    pub fn push(&mut self, feature: Feature) -> ShapeID {
        let id = ShapeID(self.shapes.len());
        let style = self.default_style(&feature);
        self.shapes.push(Shape {
            id,
            feature,
            style,
            visible: true,
        });
        id
    }

    pub fn default_style(&self, feature: &Feature) -> Style {
        style::layer_default(self.kind, self.shading.as_ref(), &feature.attributes)
    }

    pub fn get(&self, id: ShapeID) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ShapeID) -> Option<&mut Shape> {
        self.shapes.get_mut(id.0)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_with(key: &str, value: AttrValue) -> Feature {
        let mut attributes = Attributes::new();
        attributes.set(key, value);
        Feature {
            geometry: Geometry::Point(LonLat::new(11.58, 48.15)),
            attributes,
        }
    }

    #[test]
    fn test_attribute_accessors() {
        let feature = feature_with(attr::POSTAL_CODE, AttrValue::Text("80331".to_string()));
        assert_eq!(feature.attributes.text(attr::POSTAL_CODE), Some("80331"));
        assert_eq!(feature.attributes.number(attr::POSTAL_CODE), None);
        assert_eq!(feature.attributes.text("missing"), None);

        let feature = feature_with(attr::PARK_COVERAGE, AttrValue::Number(4.3));
        assert_eq!(feature.attributes.number(attr::PARK_COVERAGE), Some(4.3));
        assert_eq!(feature.attributes.text(attr::PARK_COVERAGE), None);
    }

    #[test]
    fn test_push_assigns_dense_ids() {
        let mut layer = Layer::new(LayerKind::TransitStop, "Stops");
        let a = layer.push(feature_with(attr::STOP_TYPE, AttrValue::Text("tram".to_string())));
        let b = layer.push(feature_with(attr::STOP_TYPE, AttrValue::Text("bus".to_string())));
        assert_eq!(a, ShapeID(0));
        assert_eq!(b, ShapeID(1));
        assert_eq!(layer.len(), 2);
        assert!(layer.get(b).is_some());
        assert!(layer.get(ShapeID(2)).is_none());
    }

    #[test]
    fn test_layer_stacking_defaults() {
        let districts = Layer::new(LayerKind::District, "Districts");
        let lines = Layer::new(LayerKind::TransitLine, "Lines");
        let stops = Layer::new(LayerKind::TransitStop, "Stops");
        assert!(districts.z_index < lines.z_index);
        assert!(lines.z_index < stops.z_index);
    }
}
