use crate::chart::ChartData;
use crate::features::{LayerKind, ShapeID};
use crate::rents::{RentEstimate, RentQuery};
use crate::style::{Color, Style};
use crate::Dashboard;

/// What the presentation layer reports in. One enum so a consumer's event
/// loop is a single match.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    FeatureClicked { layer: LayerKind, id: ShapeID },
    ZoomChanged(f64),
    LegendSwatchClicked(Color),
    ResetRequested,
    PostalCodeSubmitted(String),
    CalculatorSubmitted(RentQuery),
}

/// What the core asks the presentation layer to do in response. Directives
/// carry everything needed to apply them; the consumer never has to read the
/// dashboard back.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    Restyle {
        layer: LayerKind,
        id: ShapeID,
        style: Style,
    },
    /// A partition of the layer: every shape appears in exactly one list.
    ShapeVisibility {
        layer: LayerKind,
        shown: Vec<ShapeID>,
        hidden: Vec<ShapeID>,
    },
    LayerVisibility {
        layer: LayerKind,
        visible: bool,
    },
    SendToBack {
        layer: LayerKind,
    },
    HighlightChanged {
        selected: Option<(LayerKind, ShapeID)>,
    },
    ChartDataChanged(ChartData),
    CalculatorResult(RentEstimate),
}

impl Dashboard {
    /// The single entry point for interaction. Everything a consumer can do
    /// routes through here; the returned directives are ordered for direct
    /// application.
    pub fn handle(&mut self, event: Event) -> Vec<Directive> {
        match event {
            Event::FeatureClicked { layer, id } => self.select(layer, id),
            Event::ZoomChanged(zoom) => self.set_zoom(zoom),
            Event::LegendSwatchClicked(color) => self.filter_by_color(color),
            Event::ResetRequested => self.reset(),
            Event::PostalCodeSubmitted(code) => self.submit_postal_code(&code),
            Event::CalculatorSubmitted(query) => {
                vec![Directive::CalculatorResult(self.rents.estimate(&query))]
            }
        }
    }
}
