//! Grid element - children tiled on a fixed rows x columns lattice.

use crate::components::{Image, RectTransform};
use crate::context::{self, UiContext};
use crate::error::{Result, UiError};
use crate::node::Node;
use crate::types::{PropertyBag, PropertyValue, vec2};

use super::{Element, ElementRef, TransformRef};

/// A background node plus a 2D array of optional child elements.
///
/// Cells tile from the top-right corner going left/down: cell (0, 0) is
/// the top-right tile. Each child receives an anchor rectangle of size
/// `(1/rows, 1/cols)`.
pub struct Grid {
    wrap: Node,
    items: Vec<Option<ElementRef>>,
    rows: usize,
    cols: usize,
    discriminator: u64,
}

impl Grid {
    pub fn new(ctx: &UiContext, rows: usize, cols: usize) -> Self {
        let wrap = Node::new(ctx)
            .with_component(Image::panel())
            .with_component(RectTransform::new());

        Self {
            wrap,
            items: (0..rows * cols).map(|_| None).collect(),
            rows,
            cols,
            discriminator: context::next_discriminator(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Place `element` in the given cell, reparenting it under the grid
    /// background and assigning its computed anchor rectangle.
    ///
    /// Out-of-range indices are a configuration error and fail fast.
    pub fn set_element(&mut self, row: usize, col: usize, element: ElementRef) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(UiError::GridIndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let width = 1.0 / self.rows as f32;
        let height = 1.0 / self.cols as f32;

        {
            let mut child = element.borrow_mut();
            child.set_parent(&self.wrap.name());
            if let Some(transform) = child.transform() {
                transform.set_anchor_max(vec2(
                    1.0 - row as f32 * width,
                    1.0 - col as f32 * height,
                ));
                transform.set_anchor_min(vec2(
                    1.0 - row as f32 * width - width,
                    1.0 - col as f32 * height - height,
                ));
            }
        }

        self.items[row * self.cols + col] = Some(element);
        Ok(())
    }

    pub fn element_at(&self, row: usize, col: usize) -> Option<ElementRef> {
        self.items.get(row * self.cols + col)?.clone()
    }
}

impl Element for Grid {
    fn kind(&self) -> &'static str {
        "Grid"
    }

    fn discriminator(&self) -> u64 {
        self.discriminator
    }

    fn parent(&self) -> String {
        self.wrap.parent()
    }

    fn set_parent(&mut self, parent: &str) {
        self.wrap.set_parent(parent);
    }

    fn transform(&self) -> Option<TransformRef> {
        Some(TransformRef::new(&self.wrap))
    }

    /// Background node first, then each occupied cell in row-major order.
    fn render(&self) -> Vec<Node> {
        let mut nodes = vec![self.wrap.clone()];
        for item in self.items.iter().flatten() {
            nodes.extend(item.borrow().render());
        }
        nodes
    }

    fn dispose(&mut self) {
        for item in self.items.iter().flatten() {
            item.borrow_mut().dispose();
        }
    }

    fn properties(&self) -> PropertyBag {
        PropertyBag::from([("parent".to_string(), self.parent().into())])
    }

    fn set_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        match name {
            "parent" => match value.as_str() {
                Some(parent) => {
                    self.set_parent(parent);
                    Ok(())
                }
                None => Err(UiError::PropertyType {
                    target: "Grid",
                    property: name.to_string(),
                    expected: "string",
                    got: value.type_name(),
                }),
            },
            _ => Err(UiError::UnknownProperty {
                target: "Grid",
                property: name.to_string(),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Label, shared};
    use crate::types::Vec2;

    #[test]
    fn test_out_of_range_fails_fast() {
        let ctx = UiContext::detached();
        let mut grid = Grid::new(&ctx, 2, 2);

        let err = grid
            .set_element(2, 0, shared(Label::new(&ctx, "x")))
            .unwrap_err();
        assert_eq!(
            err,
            UiError::GridIndexOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            }
        );
    }

    #[test]
    fn test_anchors_tile_from_top_right() {
        let ctx = UiContext::detached();
        let mut grid = Grid::new(&ctx, 2, 2);

        let cell = shared(Label::new(&ctx, "a"));
        grid.set_element(0, 0, cell.clone()).unwrap();
        let transform = cell.borrow().transform().unwrap();
        assert_eq!(transform.anchor_max(), Vec2::ONE);
        assert_eq!(transform.anchor_min(), vec2(0.5, 0.5));

        let cell = shared(Label::new(&ctx, "b"));
        grid.set_element(1, 1, cell.clone()).unwrap();
        let transform = cell.borrow().transform().unwrap();
        assert_eq!(transform.anchor_max(), vec2(0.5, 0.5));
        assert_eq!(transform.anchor_min(), Vec2::ZERO);
    }

    #[test]
    fn test_children_reparent_under_background() {
        let ctx = UiContext::detached();
        let mut grid = Grid::new(&ctx, 1, 1);

        let cell = shared(Label::new(&ctx, "c"));
        grid.set_element(0, 0, cell.clone()).unwrap();
        assert_eq!(cell.borrow().parent(), grid.render()[0].name());
    }

    #[test]
    fn test_full_grid_render_count_and_order() {
        let ctx = UiContext::detached();
        let mut grid = Grid::new(&ctx, 2, 2);

        for row in 0..2 {
            for col in 0..2 {
                grid.set_element(row, col, shared(Label::new(&ctx, "cell")))
                    .unwrap();
            }
        }

        // Background first, then rows * cols children with one node each.
        let nodes = grid.render();
        assert_eq!(nodes.len(), 1 + 2 * 2);
        assert_eq!(nodes[0].name(), grid.render()[0].name());

        // Topological: every child references a node already emitted.
        let mut seen = vec![crate::node::ROOT_PARENT.to_string()];
        for node in &nodes {
            assert!(seen.contains(&node.parent()), "parent emitted before child");
            seen.push(node.name());
        }
    }
}
