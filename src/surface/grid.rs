//! Height-field grid: fixed planar x/z layout with per-point heights.

use bytemuck::{Pod, Zeroable};

use super::color::ColorMap;
use crate::params::SurfaceParams;

/// Vertex data for the line mesh (position + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Rows of heights over a static x/z plane.
///
/// Row 0 is the newest slice; higher rows are progressively older.
pub struct SurfaceGrid {
    rows: usize,
    columns: usize,
    /// Planar coordinates, row-major, set once in `new`
    xz: Vec<[f32; 2]>,
    /// Heights, row-major
    heights: Vec<f32>,
}

impl SurfaceGrid {
    /// Create a flat grid spanning `-span/2 ..= span/2` on both axes
    pub fn new(params: &SurfaceParams) -> Self {
        let rows = params.rows;
        let columns = params.columns;
        let half_span = params.span / 2.0;
        let x_step = params.column_step();
        let z_step = params.row_step();

        let mut xz = Vec::with_capacity(rows * columns);
        for i in 0..rows {
            for j in 0..columns {
                xz.push([
                    -half_span + j as f32 * x_step,
                    -half_span + i as f32 * z_step,
                ]);
            }
        }

        Self {
            rows,
            columns,
            xz,
            heights: vec![0.0; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn height(&self, row: usize, column: usize) -> f32 {
        self.heights[row * self.columns + column]
    }

    pub fn row_heights(&self, row: usize) -> &[f32] {
        let start = row * self.columns;
        &self.heights[start..start + self.columns]
    }

    pub(super) fn row_heights_mut(&mut self, row: usize) -> &mut [f32] {
        let start = row * self.columns;
        &mut self.heights[start..start + self.columns]
    }

    /// (x, height, z) of one grid point
    pub fn point(&self, row: usize, column: usize) -> [f32; 3] {
        let idx = row * self.columns + column;
        let [x, z] = self.xz[idx];
        [x, self.heights[idx], z]
    }

    /// Move every row one slice deeper; the deepest row is discarded.
    ///
    /// Rows are copied from the highest index down so no row is overwritten
    /// before it has moved. Row 0 keeps its old heights until rewritten.
    pub(super) fn shift_rows(&mut self) {
        let columns = self.columns;
        for i in (1..self.rows).rev() {
            let src = (i - 1) * columns;
            self.heights.copy_within(src..src + columns, i * columns);
        }
    }

    /// Fill `out` with one colored vertex per grid point, row-major
    pub fn write_vertices(&self, colors: &ColorMap, out: &mut Vec<Vertex>) {
        out.clear();
        out.extend(self.xz.iter().zip(&self.heights).map(|(&[x, z], &h)| Vertex {
            position: [x, h, z],
            color: colors.color(h),
        }));
    }

    /// Line-list indices: horizontal segments between adjacent columns of
    /// each row
    pub fn line_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.rows * (self.columns - 1) * 2);
        for i in 0..self.rows {
            for j in 0..self.columns - 1 {
                let start = (i * self.columns + j) as u32;
                indices.extend_from_slice(&[start, start + 1]);
            }
        }
        indices
    }
}
