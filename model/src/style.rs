use std::fmt;

use crate::features::{compact_number, Attributes, LayerKind};

/// A palette color, kept as the hex string the renderer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(&'static str);

impl Color {
    pub const fn new(hex: &'static str) -> Color {
        Color(hex)
    }

    pub fn hex(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const WHITE: Color = Color::new("#ffffff");
/// The teal outline marking the selected shape.
pub const HIGHLIGHT: Color = Color::new("#48ffed");
const TRANSIT_LINE_RED: Color = Color::new("#d73027");
const STOP_BLUE: Color = Color::new("#3388ff");

/// How one shape draws. Plain data handed to the renderer; all the decisions
/// happen in the core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Outline color.
    pub color: Color,
    /// Outline width in pixels.
    pub weight: f64,
    pub fill_color: Color,
    pub fill_opacity: f64,
}

impl Style {
    /// The selection treatment: thick teal outline, more opaque fill. The fill
    /// color stays, so a highlighted district keeps its choropleth bucket.
    pub fn highlighted(self) -> Style {
        Style {
            color: HIGHLIGHT,
            weight: 4.0,
            fill_color: self.fill_color,
            fill_opacity: 0.9,
        }
    }
}

const DISTRICT_BASE: Style = Style {
    color: WHITE,
    weight: 2.0,
    fill_color: PARK_COVERAGE_BUCKETS[0].1,
    fill_opacity: 0.7,
};

const TRANSIT_LINE_BASE: Style = Style {
    color: TRANSIT_LINE_RED,
    weight: 3.0,
    fill_color: TRANSIT_LINE_RED,
    fill_opacity: 0.0,
};

const TRANSIT_STOP_BASE: Style = Style {
    color: WHITE,
    weight: 1.0,
    fill_color: STOP_BLUE,
    fill_opacity: 0.8,
};

/// Park coverage as a percentage of district area, bucketed for the
/// choropleth. Ascending; a value belongs to the last threshold at or below
/// it, and anything past the top keeps the darkest green.
const PARK_COVERAGE_BUCKETS: [(f64, Color); 6] = [
    (0.0, Color::new("#FFEDA0")),
    (2.5, Color::new("#FED976")),
    (4.3, Color::new("#edf8e9")),
    (7.1, Color::new("#bae4b3")),
    (16.0, Color::new("#74c476")),
    (50.0, Color::new("#31a354")),
];

/// Step function from a numeric attribute to a palette color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    /// Ascending thresholds. The first entry is also the fallback for values
    /// below every threshold and for shapes missing the attribute entirely.
    buckets: Vec<(f64, Color)>,
}

impl ColorScale {
    pub fn new(buckets: Vec<(f64, Color)>) -> ColorScale {
        assert!(!buckets.is_empty());
        ColorScale { buckets }
    }

    pub fn park_coverage() -> ColorScale {
        ColorScale::new(PARK_COVERAGE_BUCKETS.to_vec())
    }

    /// Thresholds are inclusive: eval(2.5) is already the second bucket.
    pub fn eval(&self, value: f64) -> Color {
        let mut color = self.buckets[0].1;
        for (threshold, bucket) in &self.buckets {
            if value >= *threshold {
                color = *bucket;
            } else {
                break;
            }
        }
        color
    }

    pub fn eval_opt(&self, value: Option<f64>) -> Color {
        match value {
            Some(x) => self.eval(x),
            None => self.buckets[0].1,
        }
    }

    /// One band per bucket. A swatch is the scale evaluated at its own
    /// threshold, never a color picked independently.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut entries = Vec::new();
        for (idx, (threshold, _)) in self.buckets.iter().enumerate() {
            entries.push(LegendEntry {
                lower: *threshold,
                upper: self.buckets.get(idx + 1).map(|(next, _)| *next),
                color: self.eval(*threshold),
            });
        }
        entries
    }

    /// Resolves user input like "#ffeda0" to the palette color it names, if
    /// the scale uses it.
    pub fn color_matching(&self, hex: &str) -> Option<Color> {
        self.buckets
            .iter()
            .map(|(_, color)| *color)
            .find(|color| color.hex().eq_ignore_ascii_case(hex.trim()))
    }
}

/// One row of the choropleth legend, covering lower..upper. The last band is
/// open-ended.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: Option<f64>,
    pub color: Color,
}

impl fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(
                f,
                "{} {} - {}",
                self.color,
                compact_number(self.lower),
                compact_number(upper)
            ),
            None => write!(f, "{} {}+", self.color, compact_number(self.lower)),
        }
    }
}

/// Ties a layer's default fill to one numeric attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct Shading {
    pub attribute: String,
    pub scale: ColorScale,
}

/// The style a shape starts with, before any highlighting. Shaded layers get
/// their fill from the scale; everything else is fixed per kind.
pub(crate) fn layer_default(
    kind: LayerKind,
    shading: Option<&Shading>,
    attributes: &Attributes,
) -> Style {
    let mut style = match kind {
        LayerKind::District => DISTRICT_BASE,
        LayerKind::TransitLine => TRANSIT_LINE_BASE,
        LayerKind::TransitStop => TRANSIT_STOP_BASE,
    };
    if let Some(shading) = shading {
        style.fill_color = shading.scale.eval_opt(attributes.number(&shading.attribute));
    }
    style
}
