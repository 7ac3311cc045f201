use crate::features::{attr, Layer};
use crate::Dashboard;

/// Everything the amenity comparison chart needs, in district order. Index i
/// of each series describes the district at index i of the labels.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    /// Drawn as bars.
    pub bars: Series,
    /// Drawn as a line over the bars.
    pub line: Series,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

pub fn district_chart(districts: &Layer) -> ChartData {
    let mut labels = Vec::new();
    let mut cafes = Vec::new();
    let mut education = Vec::new();
    for (idx, shape) in districts.shapes.iter().enumerate() {
        let attributes = &shape.feature.attributes;
        labels.push(match attributes.text(attr::NAME) {
            Some(name) => name.to_string(),
            None => format!("Shape {}", idx + 1),
        });
        // Missing counts chart as zero rather than gapping the axis
        cafes.push(attributes.number(attr::CAFES).unwrap_or(0.0));
        education.push(attributes.number(attr::EDUCATION).unwrap_or(0.0));
    }
    ChartData {
        labels,
        bars: Series {
            name: "Eateries".to_string(),
            values: cafes,
        },
        line: Series {
            name: "Education Facilities".to_string(),
            values: education,
        },
    }
}

impl Dashboard {
    pub fn district_chart(&self) -> ChartData {
        district_chart(&self.districts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{AttrValue, Attributes, Feature, Geometry, LayerKind, LonLat};

    fn district(name: Option<&str>, cafes: Option<f64>, education: Option<f64>) -> Feature {
        let mut attributes = Attributes::new();
        if let Some(name) = name {
            attributes.set(attr::NAME, AttrValue::Text(name.to_string()));
        }
        if let Some(cafes) = cafes {
            attributes.set(attr::CAFES, AttrValue::Number(cafes));
        }
        if let Some(education) = education {
            attributes.set(attr::EDUCATION, AttrValue::Number(education));
        }
        Feature {
            geometry: Geometry::Polygon(vec![vec![
                LonLat::new(11.5, 48.1),
                LonLat::new(11.6, 48.1),
                LonLat::new(11.55, 48.2),
                LonLat::new(11.5, 48.1),
            ]]),
            attributes,
        }
    }

    #[test]
    fn test_chart_follows_district_order() {
        let mut layer = Layer::new(LayerKind::District, "Districts");
        layer.push(district(Some("Altstadt-Lehel"), Some(120.0), Some(8.0)));
        layer.push(district(Some("Maxvorstadt"), Some(95.0), Some(21.0)));

        let chart = district_chart(&layer);
        assert_eq!(
            chart.labels,
            vec!["Altstadt-Lehel".to_string(), "Maxvorstadt".to_string()]
        );
        assert_eq!(chart.bars.name, "Eateries");
        assert_eq!(chart.bars.values, vec![120.0, 95.0]);
        assert_eq!(chart.line.name, "Education Facilities");
        assert_eq!(chart.line.values, vec![8.0, 21.0]);
    }

    #[test]
    fn test_missing_attributes_fall_back() {
        let mut layer = Layer::new(LayerKind::District, "Districts");
        layer.push(district(None, None, Some(3.0)));
        layer.push(district(Some("Sendling"), Some(40.0), None));

        let chart = district_chart(&layer);
        assert_eq!(chart.labels[0], "Shape 1");
        assert_eq!(chart.labels[1], "Sendling");
        assert_eq!(chart.bars.values, vec![0.0, 40.0]);
        assert_eq!(chart.line.values, vec![3.0, 0.0]);
    }

    #[test]
    fn test_empty_layer_charts_empty() {
        let chart = district_chart(&Layer::new(LayerKind::District, "Districts"));
        assert!(chart.labels.is_empty());
        assert!(chart.bars.values.is_empty());
        assert!(chart.line.values.is_empty());
    }
}
