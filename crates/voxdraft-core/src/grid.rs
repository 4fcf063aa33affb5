//! Chunked voxel grid storage and edit batching.

use crate::action::{Action, ActionDomain};
use crate::bridge::ActionListener;
use crate::color::CellColor;
use crate::config::GridConfig;
use crate::geometry::{CellAddress, GridPos};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Unique identifier for cells.
pub type CellId = Uuid;

/// An occupied cell. Empty cells have no entry at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Position local to the owning chunk.
    pub position: GridPos,
    pub color: CellColor,
    pub id: CellId,
}

impl Cell {
    /// Create a cell with a fresh id.
    pub fn new(position: GridPos, color: CellColor) -> Self {
        Self {
            position,
            color,
            id: Uuid::new_v4(),
        }
    }
}

/// A square block of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub position: GridPos,
    /// Cells per axis.
    pub size: u32,
    /// Occupied cells, keyed by local position.
    pub cells: HashMap<GridPos, Cell>,
}

impl Chunk {
    /// Create an empty chunk.
    pub fn new(position: GridPos, size: u32) -> Self {
        Self {
            position,
            size,
            cells: HashMap::new(),
        }
    }
}

/// All chunks of a grid, keyed by chunk position.
pub type GridData = HashMap<GridPos, Chunk>;

/// Build an empty grid covering the whole configured extent.
fn empty_grid(config: &GridConfig) -> GridData {
    let size = config.grid_size as i32;
    (0..size)
        .flat_map(|cx| (0..size).map(move |cy| GridPos::new(cx, cy)))
        .map(|pos| (pos, Chunk::new(pos, config.chunk_size)))
        .collect()
}

/// Copy of a grid with the same chunks but no cells.
pub fn emptied(grid: &GridData) -> GridData {
    grid.iter()
        .map(|(pos, chunk)| (*pos, Chunk::new(chunk.position, chunk.size)))
        .collect()
}

/// Net effect of a gesture on one cell.
///
/// `previous` is the state before the gesture started, `new` the state after
/// its last touch. `None` means empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOperation {
    pub address: CellAddress,
    pub previous: Option<Cell>,
    pub new: Option<Cell>,
}

impl BatchOperation {
    /// The same operation with `previous` and `new` swapped.
    pub fn inverted(&self) -> Self {
        Self {
            address: self.address,
            previous: self.new.clone(),
            new: self.previous.clone(),
        }
    }
}

/// Operations accumulated while a batch is open.
#[derive(Debug, Clone, Default)]
struct PendingBatch {
    operations: Vec<BatchOperation>,
    /// Position of each touched cell in `operations`.
    index: HashMap<CellAddress, usize>,
}

impl PendingBatch {
    /// Record an edit; the first touch of a cell fixes its `previous` state.
    fn note(&mut self, address: CellAddress, previous: Option<Cell>, new: Option<Cell>) {
        if let Some(&i) = self.index.get(&address) {
            self.operations[i].new = new;
        } else {
            self.index.insert(address, self.operations.len());
            self.operations.push(BatchOperation {
                address,
                previous,
                new,
            });
        }
    }

    fn touched(&self, address: &CellAddress) -> bool {
        self.index.contains_key(address)
    }
}

/// Owns the voxel data of the grid.
///
/// Edits return the [`Action`] that describes them (or `None` while a batch
/// is collecting them); the caller hands that action to the history.
#[derive(Debug, Clone)]
pub struct GridStore {
    config: GridConfig,
    chunks: GridData,
    batch: Option<PendingBatch>,
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridStore {
    /// Create a store with every chunk allocated and empty.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            chunks: empty_grid(&config),
            batch: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// All chunks, for rendering.
    pub fn chunks(&self) -> &GridData {
        &self.chunks
    }

    pub fn chunk(&self, position: GridPos) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// The cell at an address, if occupied.
    pub fn cell(&self, address: CellAddress) -> Option<&Cell> {
        self.chunks
            .get(&address.chunk)
            .and_then(|chunk| chunk.cells.get(&address.voxel))
    }

    /// Iterate over every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &Cell)> {
        self.chunks.values().flat_map(|chunk| {
            chunk
                .cells
                .iter()
                .map(move |(voxel, cell)| (CellAddress::new(chunk.position, *voxel), cell))
        })
    }

    /// Colors of all occupied cells in address order.
    pub fn cell_colors(&self) -> BTreeMap<CellAddress, CellColor> {
        self.cells().map(|(addr, cell)| (addr, cell.color)).collect()
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.chunks.values().map(|chunk| chunk.cells.len()).sum()
    }

    /// Check if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.chunks.values().all(|chunk| chunk.cells.is_empty())
    }

    /// Place (or recolor) a cell.
    ///
    /// Outside a batch this returns a `VoxelPlace` action. Addresses whose
    /// chunk does not exist are dropped.
    pub fn place_cell(&mut self, address: CellAddress, color: CellColor) -> Option<Action> {
        let Some(chunk) = self.chunks.get_mut(&address.chunk) else {
            log::trace!("Dropping placement outside grid at chunk {}", address.chunk);
            return None;
        };
        let cell = Cell::new(address.voxel, color);
        let previous = chunk.cells.insert(address.voxel, cell.clone());

        match &mut self.batch {
            Some(batch) => {
                batch.note(address, previous, Some(cell));
                None
            }
            None => Some(Action::VoxelPlace {
                address,
                cell,
                previous,
            }),
        }
    }

    /// Erase a cell if present.
    ///
    /// Outside a batch this returns a `VoxelRemove` action when something was
    /// erased.
    pub fn remove_cell(&mut self, address: CellAddress) -> Option<Action> {
        let Some(chunk) = self.chunks.get_mut(&address.chunk) else {
            log::trace!("Dropping removal outside grid at chunk {}", address.chunk);
            return None;
        };
        let removed = chunk.cells.remove(&address.voxel);

        match &mut self.batch {
            Some(batch) => {
                // Erasing an empty cell the gesture never touched changes nothing.
                if removed.is_some() || batch.touched(&address) {
                    batch.note(address, removed, None);
                }
                None
            }
            None => removed.map(|removed| Action::VoxelRemove { address, removed }),
        }
    }

    /// Open an edit batch, discarding any operations still pending.
    pub fn start_batch(&mut self) {
        self.batch = Some(PendingBatch::default());
    }

    /// Close the batch and return its `VoxelBatch` action, if it changed anything.
    ///
    /// Safe to call when no batch is open.
    pub fn end_batch(&mut self) -> Option<Action> {
        let batch = self.batch.take()?;
        if batch.operations.is_empty() {
            return None;
        }
        Some(Action::VoxelBatch {
            operations: batch.operations,
        })
    }

    /// Check if a batch is currently open.
    pub fn is_in_batch(&self) -> bool {
        self.batch.is_some()
    }

    /// Empty every chunk and return a `VoxelClear` action holding the old grid.
    pub fn clear_grid(&mut self) -> Action {
        let cleared = emptied(&self.chunks);
        let previous = std::mem::replace(&mut self.chunks, cleared);
        Action::VoxelClear { previous }
    }

    /// Rebuild the grid empty for a new configuration.
    ///
    /// This is a structural change and produces no action.
    pub fn reset_grid(&mut self, config: GridConfig) {
        self.config = config;
        self.chunks = empty_grid(&config);
        self.batch = None;
    }

    /// Set a cell to the given state (None = empty).
    fn restore(&mut self, address: CellAddress, state: Option<&Cell>) {
        let Some(chunk) = self.chunks.get_mut(&address.chunk) else {
            log::trace!("Ignoring restore outside grid at chunk {}", address.chunk);
            return;
        };
        match state {
            Some(cell) => {
                chunk.cells.insert(address.voxel, cell.clone());
            }
            None => {
                chunk.cells.remove(&address.voxel);
            }
        }
    }

    /// Restore the state an action recorded as "previous".
    ///
    /// This always moves backwards; to replay an action, apply its inverse.
    pub fn apply_action(&mut self, action: &Action) {
        match action {
            Action::VoxelPlace {
                address, previous, ..
            } => self.restore(*address, previous.as_ref()),
            Action::VoxelRemove { address, removed } => self.restore(*address, Some(removed)),
            Action::VoxelBatch { operations } => {
                for op in operations.iter().rev() {
                    self.restore(op.address, op.previous.as_ref());
                }
            }
            Action::VoxelClear { previous } => {
                self.chunks = previous.clone();
            }
            _ => {}
        }
    }
}

impl ActionListener for GridStore {
    fn domain(&self) -> ActionDomain {
        ActionDomain::Grid
    }

    fn apply_action(&mut self, action: &Action) {
        GridStore::apply_action(self, action);
    }
}
