use crate::events::Directive;
use crate::features::{attr, AttrValue, Layer, LayerKind, Shape};
use crate::Dashboard;

/// The first shape whose attribute matches the query after trimming
/// whitespace on both sides. Numbers match their compact rendering, so a
/// postal code that loaded as 80331.0 still matches "80331". A linear scan;
/// layers here are a few hundred shapes at most.
pub fn find_by_attribute<'a>(layer: &'a Layer, key: &str, value: &str) -> Option<&'a Shape> {
    let needle = value.trim();
    layer.shapes.iter().find(|shape| {
        match shape.feature.attributes.get(key) {
            Some(AttrValue::Text(x)) => x.trim() == needle,
            Some(AttrValue::Number(x)) => crate::features::compact_number(*x) == needle,
            None => false,
        }
    })
}

impl Dashboard {
    /// The sidebar's postal code search. A hit moves the highlight to the
    /// district; a miss logs and changes nothing.
    pub fn submit_postal_code(&mut self, code: &str) -> Vec<Directive> {
        let id = match find_by_attribute(&self.districts, attr::POSTAL_CODE, code) {
            Some(shape) => shape.id,
            None => {
                warn!("No district has postal code {:?}", code);
                return Vec::new();
            }
        };
        self.select(LayerKind::District, id)
    }
}
