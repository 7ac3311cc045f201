#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod chart;
pub mod districts;
mod events;
mod features;
mod filters;
mod highlight;
mod import;
mod lookup;
pub mod rents;
mod style;
pub mod transit;
mod visibility;

use std::path::Path;

use anyhow::Result;

pub use crate::chart::{ChartData, Series};
pub use crate::events::{Directive, Event};
pub use crate::features::{
    attr, AttrValue, Attributes, Feature, Geometry, Layer, LayerKind, LonLat, Shape, ShapeID,
};
pub use crate::lookup::find_by_attribute;
pub use crate::rents::{RentEstimate, RentQuery, RentRecord, RentTable};
pub use crate::style::{Color, ColorScale, LegendEntry, Shading, Style, HIGHLIGHT};
pub use crate::visibility::{cluster_radius, min_zoom_for_stop};

/// Munich city center, where the base map opens.
pub const MAP_CENTER: LonLat = LonLat::new(11.582, 48.1581);
pub const INITIAL_ZOOM: f64 = 11.5;
pub const MIN_ZOOM: f64 = 7.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Everything on the dashboard: the three map layers, the rent dataset, and
/// the interaction state. All mutation goes through methods that return
/// Directives, so a renderer only ever has to follow instructions.
pub struct Dashboard {
    pub districts: Layer,
    pub transit_lines: Layer,
    pub stops: Layer,
    pub rents: RentTable,

    highlighted: Option<(LayerKind, ShapeID)>,
    zoom: f64,
    color_filter: Option<Color>,
}

impl Dashboard {
    /// A dashboard with nothing loaded. Every operation works on this; layers
    /// fill in as sources arrive, in any order.
    pub fn empty() -> Dashboard {
        Dashboard {
            districts: Layer::new(LayerKind::District, "Districts"),
            transit_lines: Layer::new(LayerKind::TransitLine, "Transit lines"),
            stops: Layer::new(LayerKind::TransitStop, "Transit stops"),
            rents: RentTable::empty(),

            highlighted: None,
            zoom: INITIAL_ZOOM,
            color_filter: None,
        }
    }

    /// Loads whichever of the four well-known files exist in the directory.
    /// Each source fails independently; a missing or unparseable file is
    /// logged and its layer stays empty.
    pub fn load_from_dir(dir: &Path) -> Dashboard {
        let mut dashboard = Dashboard::empty();
        // Install directives are dropped here; a consumer starting from files
        // draws the full state anyway.
        if let Some(layer) = read_source(dir, "districts.geojson", districts::load) {
            dashboard.install_districts(layer);
        }
        if let Some(layer) = read_source(dir, "transit_lines.geojson", transit::load_lines) {
            dashboard.install_transit_lines(layer);
        }
        if let Some(layer) = read_source(dir, "transit_stops.geojson", transit::load_stops) {
            dashboard.install_stops(layer);
        }
        if let Some(table) = read_source(dir, "rents.csv", rents::load) {
            dashboard.install_rents(table);
        }
        dashboard
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::District => &self.districts,
            LayerKind::TransitLine => &self.transit_lines,
            LayerKind::TransitStop => &self.stops,
        }
    }

    pub(crate) fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::District => &mut self.districts,
            LayerKind::TransitLine => &mut self.transit_lines,
            LayerKind::TransitStop => &mut self.stops,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn highlighted(&self) -> Option<(LayerKind, ShapeID)> {
        self.highlighted
    }

    pub fn color_filter(&self) -> Option<Color> {
        self.color_filter
    }

    /// Replaces the district layer. Emits fresh chart data, since the chart
    /// summarizes districts.
    pub fn install_districts(&mut self, layer: Layer) -> Vec<Directive> {
        debug_assert_eq!(layer.kind, LayerKind::District);
        let mut directives = self.drop_highlight_in(LayerKind::District);
        self.districts = layer;
        directives.push(Directive::ChartDataChanged(self.district_chart()));
        directives
    }

    pub fn install_transit_lines(&mut self, layer: Layer) -> Vec<Directive> {
        debug_assert_eq!(layer.kind, LayerKind::TransitLine);
        let mut directives = self.drop_highlight_in(LayerKind::TransitLine);
        self.transit_lines = layer;
        // Bring the new layer in line with the current zoom right away.
        directives.extend(self.recompute_visibility());
        directives
    }

    pub fn install_stops(&mut self, layer: Layer) -> Vec<Directive> {
        debug_assert_eq!(layer.kind, LayerKind::TransitStop);
        let mut directives = self.drop_highlight_in(LayerKind::TransitStop);
        self.stops = layer;
        directives.extend(self.recompute_visibility());
        directives
    }

    pub fn install_rents(&mut self, table: RentTable) {
        self.rents = table;
    }

    /// The legend for the district choropleth.
    pub fn legend(&self) -> Vec<LegendEntry> {
        match &self.districts.shading {
            Some(shading) => shading.scale.legend(),
            None => ColorScale::park_coverage().legend(),
        }
    }

    /// Replacing a layer invalidates any highlight pointing into it.
    fn drop_highlight_in(&mut self, kind: LayerKind) -> Vec<Directive> {
        if self.highlighted.map(|(k, _)| k) == Some(kind) {
            self.highlighted = None;
            return vec![Directive::HighlightChanged { selected: None }];
        }
        Vec::new()
    }
}

fn read_source<T>(
    dir: &Path,
    filename: &str,
    load: impl FnOnce(fs_err::File) -> Result<T>,
) -> Option<T> {
    let path = dir.join(filename);
    let file = match fs_err::File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            error!("Skipping {}: {}", filename, err);
            return None;
        }
    };
    match load(file) {
        Ok(data) => Some(data),
        Err(err) => {
            error!("Skipping {}: {}", filename, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dashboard_tolerates_every_event() {
        let mut dashboard = Dashboard::empty();
        assert!(dashboard
            .handle(Event::FeatureClicked {
                layer: LayerKind::District,
                id: ShapeID(0),
            })
            .is_empty());
        assert!(dashboard.handle(Event::ResetRequested).is_empty());
        assert!(dashboard
            .handle(Event::PostalCodeSubmitted("80331".to_string()))
            .is_empty());
        // Zoom still updates internal state, but with no overlays loaded
        // there's nothing to show or hide.
        assert!(dashboard.handle(Event::ZoomChanged(15.0)).is_empty());
        assert_eq!(dashboard.zoom(), 15.0);
    }

    #[test]
    fn test_zoom_clamps_to_map_bounds() {
        let mut dashboard = Dashboard::empty();
        dashboard.handle(Event::ZoomChanged(25.0));
        assert_eq!(dashboard.zoom(), MAX_ZOOM);
        dashboard.handle(Event::ZoomChanged(-2.0));
        assert_eq!(dashboard.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_missing_directory_loads_empty() {
        let dashboard = Dashboard::load_from_dir(Path::new("/nonexistent"));
        assert!(dashboard.districts.is_empty());
        assert!(dashboard.transit_lines.is_empty());
        assert!(dashboard.stops.is_empty());
        assert!(dashboard.rents.is_empty());
    }
}
