//! Grid layout on a virtual, expanding table.
//!
//! Row 0 holds the root. Each further row holds the unvisited neighbors of
//! the previous row's occupied cells, placed near the average column of
//! their parents. Whenever a row needs more columns than the table has,
//! every existing row is padded on both sides to keep it centered.
//!
//! Positions are `(column, row)` pairs of whole numbers; they are not
//! normalized here since the renderer rescales them anyway.

use std::collections::HashSet;

use log::{debug, trace};

use topovis_core::{geometry::Point, identifier::NodeId};

use super::{Engine, PositionMap, next_layer};
use crate::{error::TopoError, graph::Graph};

type Row = Vec<Option<NodeId>>;

/// The alternative, grid-based layout engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockLayout;

impl BlockLayout {
    pub fn new() -> Self {
        Self
    }

    /// Lays the graph out on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::Layout`] when a node would land outside the table.
    pub fn layout(&self, graph: &Graph) -> Result<PositionMap, TopoError> {
        let table = self.table(graph)?;

        let mut positions = PositionMap::new();
        for (row_index, row) in table.iter().enumerate() {
            for (column, cell) in row.iter().enumerate() {
                if let Some(node) = cell {
                    positions.insert(node.clone(), Point::new(column as f32, row_index as f32));
                }
            }
        }

        debug!(nodes = positions.len(), rows = table.len(); "Block layout finished");
        Ok(positions)
    }

    fn table(&self, graph: &Graph) -> Result<Vec<Row>, TopoError> {
        let root = graph.root().clone();
        let mut visited = HashSet::from([root.clone()]);
        let mut table: Vec<Row> = vec![vec![Some(root)]];
        let mut width = 1;

        loop {
            let (parents, avg) = match table.last() {
                Some(previous) => occupied(previous),
                None => break,
            };

            let next = next_layer(graph, &parents, &mut visited);
            if next.is_empty() {
                break;
            }

            width = width.max(next.len());
            for row in &mut table {
                pad(row, width);
            }

            let mut new_row: Row = vec![None; width];
            for (offset, node) in next.into_iter().enumerate() {
                let column = offset
                    .checked_sub(avg / 2)
                    .filter(|&column| column < width)
                    .ok_or_else(|| {
                        TopoError::Layout(format!(
                            "node `{node}` falls outside the table: column {} of {width} in row {}",
                            offset as isize - (avg / 2) as isize,
                            table.len()
                        ))
                    })?;

                new_row[column] = Some(node);
            }

            trace!(row = table.len(), width, avg; "Block row placed");
            table.push(new_row);
        }

        Ok(table)
    }
}

impl Engine for BlockLayout {
    fn calculate(&self, graph: &Graph) -> Result<PositionMap, TopoError> {
        self.layout(graph)
    }
}

/// Returns the nodes of a row and the integer mean of their column indices.
fn occupied(row: &[Option<NodeId>]) -> (Vec<NodeId>, usize) {
    let cells: Vec<(usize, &NodeId)> = row
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| cell.as_ref().map(|node| (index, node)))
        .collect();

    if cells.is_empty() {
        return (Vec::new(), 0);
    }

    let avg = cells.iter().map(|(index, _)| index).sum::<usize>() / cells.len();
    let nodes = cells.into_iter().map(|(_, node)| node.clone()).collect();
    (nodes, avg)
}

/// Pads `row` to `width`: half of the missing cells on the left, the rest on the right.
fn pad(row: &mut Row, width: usize) {
    let Some(diff) = width.checked_sub(row.len()).filter(|&diff| diff > 0) else {
        return;
    };

    let left = diff / 2;
    row.splice(0..0, std::iter::repeat_n(None, left));
    row.resize(width, None);
}
