// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The parsed shape tree handed over by a vector-document parser.
//!
//! A parser walks its source document (typically SVG) and produces one
//! [`ShapeNode`] per element: groups carry class labels and children,
//! leaf shapes carry their sampled geometry. Curves are expected to be
//! pre-sampled into point lists.

use crate::schema::ElementKind;

/// A 2D point in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Geometry carried by a shape element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum ShapeKind {
    /// A container with no geometry of its own.
    Group,
    /// A closed point list (`<polygon>`).
    Polygon { points: Vec<Point2D> },
    /// An open point list (`<polyline>`).
    Polyline { points: Vec<Point2D> },
    /// An axis-aligned rectangle.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// A circle or ellipse; `rx == ry` for circles.
    Circle { cx: f64, cy: f64, rx: f64, ry: f64 },
    /// A path, sampled into the points it passes through.
    Path { points: Vec<Point2D> },
}

impl ShapeKind {
    /// Short element name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Group => "group",
            ShapeKind::Polygon { .. } => "polygon",
            ShapeKind::Polyline { .. } => "polyline",
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Path { .. } => "path",
        }
    }
}

/// One element of the parsed document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeNode {
    pub shape: ShapeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub classes: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ShapeNode>,
}

impl ShapeNode {
    /// Creates a group with the given class labels and children.
    pub fn group<S: Into<String>>(classes: impl IntoIterator<Item = S>, children: Vec<ShapeNode>) -> Self {
        Self {
            shape: ShapeKind::Group,
            classes: classes.into_iter().map(Into::into).collect(),
            children,
        }
    }

    /// Creates a `<polygon>` leaf.
    pub fn polygon(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::leaf(ShapeKind::Polygon {
            points: points.into_iter().map(Point2D::from).collect(),
        })
    }

    /// Creates a `<polyline>` leaf.
    pub fn polyline(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::leaf(ShapeKind::Polyline {
            points: points.into_iter().map(Point2D::from).collect(),
        })
    }

    /// Creates a `<rect>` leaf.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::leaf(ShapeKind::Rect {
            x,
            y,
            width,
            height,
        })
    }

    /// Creates a `<circle>` leaf.
    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::leaf(ShapeKind::Circle { cx, cy, rx: r, ry: r })
    }

    /// Creates a `<path>` leaf from its sampled points.
    pub fn path(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::leaf(ShapeKind::Path {
            points: points.into_iter().map(Point2D::from).collect(),
        })
    }

    fn leaf(shape: ShapeKind) -> Self {
        Self {
            shape,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns true if this node is a group.
    pub fn is_group(&self) -> bool {
        matches!(self.shape, ShapeKind::Group)
    }

    /// The element kind, decided by the first class token.
    pub fn element_kind(&self) -> ElementKind {
        ElementKind::classify(&self.classes)
    }

    /// Returns true if any class token equals `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The point list of a `<polygon>` or `<polyline>` element.
    pub fn points(&self) -> Option<&[Point2D]> {
        match &self.shape {
            ShapeKind::Polygon { points } | ShapeKind::Polyline { points } => Some(points),
            _ => None,
        }
    }

    /// The first child, which defines the outline of most plan objects.
    pub fn first_child(&self) -> Option<&ShapeNode> {
        self.children.first()
    }

    /// Children carrying the given class token, in document order.
    pub fn children_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a ShapeNode> + 'a {
        self.children.iter().filter(move |child| child.has_class(class))
    }

    /// Group children, in document order.
    pub fn child_groups(&self) -> impl Iterator<Item = &ShapeNode> {
        self.children.iter().filter(|child| child.is_group())
    }
}

/// Split a raw `class` attribute into tokens.
pub fn parse_class_list(class_attr: &str) -> Vec<String> {
    class_attr.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_splits_on_any_whitespace() {
        assert_eq!(
            parse_class_list("  Space \t Kitchen\nOpen "),
            vec!["Space", "Kitchen", "Open"]
        );
        assert!(parse_class_list("   ").is_empty());
    }

    #[test]
    fn element_kind_from_classes() {
        let wall = ShapeNode::group(["Wall", "External"], vec![]);
        assert_eq!(wall.element_kind(), ElementKind::Wall);
        assert!(wall.has_class("External"));
        assert!(!wall.has_class("Wall External"));
    }

    #[test]
    fn points_only_for_point_lists() {
        let polygon = ShapeNode::polygon([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(polygon.points().map(<[_]>::len), Some(3));
        assert!(ShapeNode::rect(0.0, 0.0, 1.0, 1.0).points().is_none());
        assert!(ShapeNode::path([(0.0, 0.0)]).points().is_none());
    }

    #[test]
    fn child_lookups_keep_document_order() {
        let floor = ShapeNode::group(
            ["Floor"],
            vec![
                ShapeNode::polygon([(0.0, 0.0)]),
                ShapeNode::group(["Floorplan", "Main"], vec![]),
                ShapeNode::group(["Dimension"], vec![]),
                ShapeNode::group(["Floorplan"], vec![]),
            ],
        );
        let plans: Vec<_> = floor.children_with_class("Floorplan").collect();
        assert_eq!(plans.len(), 2);
        assert!(plans[0].has_class("Main"));
        assert_eq!(floor.child_groups().count(), 3);
        assert_eq!(floor.first_child().map(|c| c.shape.name()), Some("polygon"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_document_tree() {
        let json = r#"{
            "shape": {"type": "group"},
            "classes": ["Space", "Bath"],
            "children": [
                {"shape": {"type": "polygon", "points": [{"x": 0, "y": 0}, {"x": 2, "y": 0}, {"x": 2, "y": 2}]}},
                {"shape": {"type": "circle", "cx": 1, "cy": 1, "rx": 0.5, "ry": 0.5}}
            ]
        }"#;
        let node: ShapeNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.element_kind(), ElementKind::Space);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].points().map(<[_]>::len), Some(3));
        assert_eq!(node.children[1].shape.name(), "circle");
    }
}
