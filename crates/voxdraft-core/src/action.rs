//! Undoable edit records.
//!
//! Every action describes one completed edit and carries enough state to
//! restore what came before it. Stores only know how to move *backwards*
//! (restore the previous state); replaying an action forwards is done by
//! applying its [`Action::invert`]ed form.

use crate::annotation::Annotation;
use crate::geometry::CellAddress;
use crate::grid::{emptied, BatchOperation, Cell, GridData};
use std::fmt;

/// Which store owns an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionDomain {
    Grid,
    Annotations,
}

/// Tag of an [`Action`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    VoxelPlace,
    VoxelRemove,
    VoxelBatch,
    VoxelClear,
    AnnotationAdd,
    AnnotationRemove,
    AnnotationClear,
}

impl ActionKind {
    pub fn domain(self) -> ActionDomain {
        match self {
            ActionKind::VoxelPlace
            | ActionKind::VoxelRemove
            | ActionKind::VoxelBatch
            | ActionKind::VoxelClear => ActionDomain::Grid,
            ActionKind::AnnotationAdd
            | ActionKind::AnnotationRemove
            | ActionKind::AnnotationClear => ActionDomain::Annotations,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::VoxelPlace => "voxel place",
            ActionKind::VoxelRemove => "voxel remove",
            ActionKind::VoxelBatch => "voxel batch",
            ActionKind::VoxelClear => "voxel clear",
            ActionKind::AnnotationAdd => "annotation add",
            ActionKind::AnnotationRemove => "annotation remove",
            ActionKind::AnnotationClear => "annotation clear",
        };
        f.write_str(name)
    }
}

/// A completed, undoable edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A single cell was placed outside a gesture batch.
    VoxelPlace {
        address: CellAddress,
        cell: Cell,
        previous: Option<Cell>,
    },
    /// A single occupied cell was erased outside a gesture batch.
    VoxelRemove { address: CellAddress, removed: Cell },
    /// Net effect of one drag gesture, one operation per touched cell.
    VoxelBatch { operations: Vec<BatchOperation> },
    /// The whole grid was cleared; holds the grid as it was.
    VoxelClear { previous: GridData },
    /// An annotation was appended at `index`.
    AnnotationAdd { annotation: Annotation, index: usize },
    /// An annotation was removed from `index`.
    AnnotationRemove { annotation: Annotation, index: usize },
    /// All annotations were removed; holds the list as it was.
    AnnotationClear { previous: Vec<Annotation> },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::VoxelPlace { .. } => ActionKind::VoxelPlace,
            Action::VoxelRemove { .. } => ActionKind::VoxelRemove,
            Action::VoxelBatch { .. } => ActionKind::VoxelBatch,
            Action::VoxelClear { .. } => ActionKind::VoxelClear,
            Action::AnnotationAdd { .. } => ActionKind::AnnotationAdd,
            Action::AnnotationRemove { .. } => ActionKind::AnnotationRemove,
            Action::AnnotationClear { .. } => ActionKind::AnnotationClear,
        }
    }

    pub fn domain(&self) -> ActionDomain {
        self.kind().domain()
    }

    /// The action whose *undo* has the same effect as redoing `self`.
    pub fn invert(&self) -> Action {
        match self {
            Action::VoxelPlace {
                address,
                cell,
                previous: None,
            } => Action::VoxelRemove {
                address: *address,
                removed: cell.clone(),
            },
            Action::VoxelPlace {
                address,
                cell,
                previous: Some(previous),
            } => Action::VoxelPlace {
                address: *address,
                cell: previous.clone(),
                previous: Some(cell.clone()),
            },
            Action::VoxelRemove { address, removed } => Action::VoxelPlace {
                address: *address,
                cell: removed.clone(),
                previous: None,
            },
            Action::VoxelBatch { operations } => Action::VoxelBatch {
                operations: operations.iter().map(BatchOperation::inverted).collect(),
            },
            Action::VoxelClear { previous } => Action::VoxelClear {
                previous: emptied(previous),
            },
            Action::AnnotationAdd { annotation, index } => Action::AnnotationRemove {
                annotation: annotation.clone(),
                index: *index,
            },
            Action::AnnotationRemove { annotation, index } => Action::AnnotationAdd {
                annotation: annotation.clone(),
                index: *index,
            },
            Action::AnnotationClear { .. } => Action::AnnotationClear {
                previous: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationKind;
    use crate::color::{CellColor, PALETTE};
    use crate::geometry::GridPos;
    use kurbo::Point;

    fn address() -> CellAddress {
        CellAddress::new(GridPos::new(0, 1), GridPos::new(2, 3))
    }

    #[test]
    fn test_domains() {
        assert_eq!(ActionKind::VoxelBatch.domain(), ActionDomain::Grid);
        assert_eq!(ActionKind::VoxelClear.domain(), ActionDomain::Grid);
        assert_eq!(ActionKind::AnnotationRemove.domain(), ActionDomain::Annotations);
    }

    #[test]
    fn test_place_on_empty_inverts_to_remove() {
        let cell = Cell::new(GridPos::new(2, 3), PALETTE[0]);
        let place = Action::VoxelPlace {
            address: address(),
            cell: cell.clone(),
            previous: None,
        };
        let inverse = place.invert();
        assert_eq!(
            inverse,
            Action::VoxelRemove {
                address: address(),
                removed: cell,
            }
        );
        assert_eq!(inverse.invert(), place);
    }

    #[test]
    fn test_recolor_inverts_by_swapping() {
        let old = Cell::new(GridPos::new(2, 3), PALETTE[0]);
        let new = Cell::new(GridPos::new(2, 3), PALETTE[1]);
        let place = Action::VoxelPlace {
            address: address(),
            cell: new.clone(),
            previous: Some(old.clone()),
        };
        assert_eq!(
            place.invert(),
            Action::VoxelPlace {
                address: address(),
                cell: old,
                previous: Some(new),
            }
        );
    }

    #[test]
    fn test_batch_inverts_every_operation() {
        let cell = Cell::new(GridPos::new(2, 3), CellColor::black());
        let batch = Action::VoxelBatch {
            operations: vec![BatchOperation {
                address: address(),
                previous: None,
                new: Some(cell.clone()),
            }],
        };
        let Action::VoxelBatch { operations } = batch.invert() else {
            panic!("expected a batch");
        };
        assert_eq!(operations[0].previous, Some(cell));
        assert!(operations[0].new.is_none());
        assert_eq!(batch.invert().invert(), batch);
    }

    #[test]
    fn test_annotation_add_and_remove_are_inverse() {
        let annotation = Annotation::new(
            AnnotationKind::Line,
            Point::new(0.0, 0.0),
            CellColor::black(),
            2.0,
        );
        let add = Action::AnnotationAdd {
            annotation: annotation.clone(),
            index: 3,
        };
        assert_eq!(
            add.invert(),
            Action::AnnotationRemove {
                annotation,
                index: 3,
            }
        );
        assert_eq!(add.invert().invert(), add);
    }

    #[test]
    fn test_clear_inverts_to_empty_snapshot() {
        let clear = Action::AnnotationClear {
            previous: vec![Annotation::new(
                AnnotationKind::FreeDraw,
                Point::ZERO,
                CellColor::black(),
                1.0,
            )],
        };
        assert_eq!(
            clear.invert(),
            Action::AnnotationClear {
                previous: Vec::new(),
            }
        );
    }
}
