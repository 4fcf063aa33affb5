//! Vector annotations drawn over the grid.

use crate::action::{Action, ActionDomain};
use crate::bridge::ActionListener;
use crate::color::CellColor;
use crate::tools::ToolKind;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for annotations.
pub type AnnotationId = Uuid;

/// Kinds of annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// Straight segment from the first to the last point.
    Line,
    /// Axis-aligned rectangle spanned by the first and last point.
    Rectangle,
    /// Polyline through every point.
    FreeDraw,
}

impl AnnotationKind {
    /// The annotation a tool draws, if it draws one.
    pub fn from_tool(tool: ToolKind) -> Option<Self> {
        match tool {
            ToolKind::Line => Some(AnnotationKind::Line),
            ToolKind::Rectangle => Some(AnnotationKind::Rectangle),
            ToolKind::FreeDraw => Some(AnnotationKind::FreeDraw),
            ToolKind::VoxelPlace | ToolKind::Eraser | ToolKind::Pan => None,
        }
    }
}

/// A vector annotation, in grid-space coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub kind: AnnotationKind,
    /// Points in the order they were drawn.
    pub points: Vec<Point>,
    pub color: CellColor,
    /// Stroke width in screen pixels.
    pub thickness: f64,
}

impl Annotation {
    /// Create a new annotation with a single point.
    pub fn new(kind: AnnotationKind, start: Point, color: CellColor, thickness: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            points: vec![start],
            color,
            thickness,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Annotations with fewer than two points are stored but not drawn.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Get the bounding box in grid coordinates.
    pub fn bounds(&self) -> Rect {
        let points: &[Point] = match self.kind {
            AnnotationKind::FreeDraw => &self.points,
            AnnotationKind::Line | AnnotationKind::Rectangle => match (self.points.first(), self.points.last()) {
                (Some(first), Some(last)) => return Rect::from_points(*first, *last),
                _ => &[],
            },
        };
        let Some(first) = points.first() else {
            return Rect::ZERO;
        };
        points
            .iter()
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
    }

    /// Get the path representation for rendering.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if !self.is_renderable() {
            return path;
        }
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        match self.kind {
            AnnotationKind::Line => {
                path.move_to(first);
                path.line_to(last);
            }
            AnnotationKind::Rectangle => {
                let rect = Rect::from_points(first, last);
                path.move_to((rect.x0, rect.y0));
                path.line_to((rect.x1, rect.y0));
                path.line_to((rect.x1, rect.y1));
                path.line_to((rect.x0, rect.y1));
                path.close_path();
            }
            AnnotationKind::FreeDraw => {
                path.move_to(first);
                for p in &self.points[1..] {
                    path.line_to(*p);
                }
            }
        }
        path
    }
}

/// Owns the annotation list and the annotation being drawn.
///
/// List order is draw order, which is also stacking order.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    current: Option<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished annotations, back to front.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The annotation currently being drawn.
    pub fn current(&self) -> Option<&Annotation> {
        self.current.as_ref()
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Begin drawing with `tool`. Returns false for tools that don't annotate.
    pub fn start_annotation(
        &mut self,
        tool: ToolKind,
        start: Point,
        color: CellColor,
        thickness: f64,
    ) -> bool {
        let Some(kind) = AnnotationKind::from_tool(tool) else {
            return false;
        };
        if self.current.is_some() {
            log::debug!("Discarding unfinished annotation");
        }
        self.current = Some(Annotation::new(kind, start, color, thickness));
        true
    }

    /// Append a point to the annotation being drawn.
    pub fn update_annotation(&mut self, point: Point) {
        if let Some(current) = &mut self.current {
            current.add_point(point);
        }
    }

    /// Finish the annotation being drawn and return its `AnnotationAdd` action.
    pub fn end_annotation(&mut self) -> Option<Action> {
        let annotation = self.current.take()?;
        let index = self.annotations.len();
        self.annotations.push(annotation.clone());
        Some(Action::AnnotationAdd { annotation, index })
    }

    /// Remove an annotation by id, remembering where it was.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> Option<Action> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        let annotation = self.annotations.remove(index);
        Some(Action::AnnotationRemove { annotation, index })
    }

    /// Remove every finished annotation. Returns None if there were none.
    pub fn clear_annotations(&mut self) -> Option<Action> {
        if self.annotations.is_empty() {
            return None;
        }
        let previous = std::mem::take(&mut self.annotations);
        Some(Action::AnnotationClear { previous })
    }

    /// Restore the state an action recorded as "previous".
    pub fn apply_action(&mut self, action: &Action) {
        match action {
            Action::AnnotationAdd { annotation, .. } => {
                self.annotations.retain(|a| a.id != annotation.id);
            }
            Action::AnnotationRemove { annotation, index } => {
                let index = (*index).min(self.annotations.len());
                self.annotations.insert(index, annotation.clone());
            }
            Action::AnnotationClear { previous } => {
                self.annotations = previous.clone();
            }
            _ => {}
        }
    }
}

impl ActionListener for AnnotationStore {
    fn domain(&self) -> ActionDomain {
        ActionDomain::Annotations
    }

    fn apply_action(&mut self, action: &Action) {
        AnnotationStore::apply_action(self, action);
    }
}
