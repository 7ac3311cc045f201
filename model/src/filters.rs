use crate::events::Directive;
use crate::style::Color;
use crate::Dashboard;

impl Dashboard {
    /// Shows only the districts whose choropleth bucket matches the clicked
    /// legend swatch; every other district hides. Matching goes by each
    /// shape's default fill, so a highlighted district still counts under its
    /// own bucket.
    pub fn filter_by_color(&mut self, color: Color) -> Vec<Directive> {
        if self.districts.is_empty() {
            return Vec::new();
        }
        self.color_filter = Some(color);

        let fills: Vec<Color> = self
            .districts
            .shapes
            .iter()
            .map(|shape| self.districts.default_style(&shape.feature).fill_color)
            .collect();
        let mut shown = Vec::new();
        let mut hidden = Vec::new();
        for (shape, fill) in self.districts.shapes.iter_mut().zip(fills) {
            shape.visible = fill == color;
            if shape.visible {
                shown.push(shape.id);
            } else {
                hidden.push(shape.id);
            }
        }
        vec![Directive::ShapeVisibility {
            layer: self.districts.kind,
            shown,
            hidden,
        }]
    }

    /// The big reset button: all districts back on, transit overlays off, and
    /// the district layer pushed below every overlay.
    pub fn reset(&mut self) -> Vec<Directive> {
        self.color_filter = None;
        let mut directives = Vec::new();

        if !self.districts.is_empty() {
            let mut shown = Vec::new();
            for shape in &mut self.districts.shapes {
                shape.visible = true;
                shown.push(shape.id);
            }
            self.districts.visible = true;
            directives.push(Directive::ShapeVisibility {
                layer: self.districts.kind,
                shown,
                hidden: Vec::new(),
            });

            let overlay_floor = self.transit_lines.z_index.min(self.stops.z_index);
            if self.districts.z_index >= overlay_floor {
                self.districts.z_index = overlay_floor - 1;
            }
            directives.push(Directive::SendToBack {
                layer: self.districts.kind,
            });
        }

        for kind in [self.transit_lines.kind, self.stops.kind] {
            let layer = self.layer_mut(kind);
            if !layer.is_empty() {
                layer.visible = false;
                directives.push(Directive::LayerVisibility {
                    layer: kind,
                    visible: false,
                });
            }
        }

        directives
    }
}
