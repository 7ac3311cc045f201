use crate::events::Directive;
use crate::features::{LayerKind, ShapeID};
use crate::Dashboard;

impl Dashboard {
    /// Moves the highlight to one shape. The previously highlighted shape, if
    /// any, goes back to its layer's default style first, so no click sequence
    /// can leave two shapes highlighted.
    pub fn select(&mut self, kind: LayerKind, id: ShapeID) -> Vec<Directive> {
        if self.layer(kind).get(id).is_none() {
            warn!("Click on unknown {} in the {} layer, ignoring", id, kind);
            return Vec::new();
        }

        let mut directives = Vec::new();
        if let Some(restyle) = self.restore_highlighted() {
            directives.push(restyle);
        }

        let layer = self.layer_mut(kind);
        if let Some(shape) = layer.get_mut(id) {
            shape.style = shape.style.highlighted();
            directives.push(Directive::Restyle {
                layer: kind,
                id,
                style: shape.style,
            });
        }
        self.highlighted = Some((kind, id));
        directives.push(Directive::HighlightChanged {
            selected: self.highlighted,
        });
        directives
    }

    /// Clears the highlight, if there is one. A no-op otherwise.
    pub fn clear_highlight(&mut self) -> Vec<Directive> {
        match self.restore_highlighted() {
            Some(restyle) => vec![restyle, Directive::HighlightChanged { selected: None }],
            None => Vec::new(),
        }
    }

    /// Puts the currently highlighted shape back to its default style and
    /// forgets it.
    fn restore_highlighted(&mut self) -> Option<Directive> {
        let (kind, id) = self.highlighted.take()?;
        let style = {
            let layer = self.layer(kind);
            let shape = layer.get(id)?;
            layer.default_style(&shape.feature)
        };
        let layer = self.layer_mut(kind);
        if let Some(shape) = layer.get_mut(id) {
            shape.style = style;
        }
        Some(Directive::Restyle {
            layer: kind,
            id,
            style,
        })
    }
}
