//! Per-frame waterfall update driven by the loudness history.

use super::grid::SurfaceGrid;
use crate::audio::AmplitudeHistory;
use crate::error::WindowSizeError;
use crate::params::SurfaceParams;

/// Rewrites the surface once per rendered frame
pub struct SurfaceUpdater {
    bias: f32,
    gain: f32,
    /// Reused window snapshot (avoids a per-frame allocation)
    window: Vec<f32>,
}

impl SurfaceUpdater {
    pub fn new(params: &SurfaceParams) -> Self {
        Self {
            bias: params.bias,
            gain: params.gain,
            window: Vec::with_capacity(params.columns),
        }
    }

    /// Snapshot the history and advance the surface by one frame
    pub fn tick(
        &mut self,
        history: &AmplitudeHistory,
        grid: &mut SurfaceGrid,
    ) -> Result<(), WindowSizeError> {
        history.read_window_into(&mut self.window);
        apply_window(&self.window, self.bias, self.gain, grid)
    }

    /// Advance the surface by one frame using an explicit window
    pub fn tick_with_window(
        &self,
        window: &[f32],
        grid: &mut SurfaceGrid,
    ) -> Result<(), WindowSizeError> {
        apply_window(window, self.bias, self.gain, grid)
    }
}

/// Shift rows deeper, then map the window (oldest first) into row 0.
///
/// The shift runs before row 0 is rewritten, so row 1 always holds the
/// previous frame's row 0. Heights are stored unclamped. A window whose
/// length differs from the grid width leaves the grid untouched.
fn apply_window(
    window: &[f32],
    bias: f32,
    gain: f32,
    grid: &mut SurfaceGrid,
) -> Result<(), WindowSizeError> {
    if window.len() != grid.columns() {
        return Err(WindowSizeError {
            expected: grid.columns(),
            actual: window.len(),
        });
    }

    grid.shift_rows();

    for (height, &loudness) in grid.row_heights_mut(0).iter_mut().zip(window) {
        *height = (loudness + bias) * gain;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_row(grid: &SurfaceGrid, row: usize, expected: &[f32]) {
        for (j, (&actual, &want)) in grid.row_heights(row).iter().zip(expected).enumerate() {
            assert!(
                (actual - want).abs() < 1e-4,
                "row {} column {}: expected {}, got {}",
                row,
                j,
                want,
                actual
            );
        }
    }

    #[test]
    fn test_silent_history_draws_bias_plane() {
        let params = SurfaceParams::with_size(4);
        let history = AmplitudeHistory::new(4);
        let mut grid = SurfaceGrid::new(&params);
        let mut updater = SurfaceUpdater::new(&params);

        updater.tick(&history, &mut grid).unwrap();

        assert_row(&grid, 0, &[1.5, 1.5, 1.5, 1.5]);
        assert_row(&grid, 1, &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_waterfall_scenario() {
        let params = SurfaceParams::with_size(4);
        let history = AmplitudeHistory::new(4);
        let mut grid = SurfaceGrid::new(&params);
        let mut updater = SurfaceUpdater::new(&params);

        updater.tick(&history, &mut grid).unwrap();
        assert_row(&grid, 0, &[1.5, 1.5, 1.5, 1.5]);

        history.write(1.0);
        assert_eq!(history.read_window(), vec![0.0, 0.0, 0.0, 1.0]);
        updater.tick(&history, &mut grid).unwrap();

        assert_row(&grid, 0, &[1.5, 1.5, 1.5, 16.5]);
        assert_row(&grid, 1, &[1.5, 1.5, 1.5, 1.5]);
        assert_row(&grid, 2, &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_row_one_is_previous_row_zero() {
        let params = SurfaceParams::with_size(5);
        let mut grid = SurfaceGrid::new(&params);
        let updater = SurfaceUpdater::new(&params);

        let windows = [
            [0.1, 0.2, 0.3, 0.4, 0.5],
            [0.9, 0.0, 0.7, 0.0, 0.2],
            [0.0, 0.0, 0.0, 0.0, 3.0],
        ];

        updater.tick_with_window(&windows[0], &mut grid).unwrap();
        for window in &windows[1..] {
            let previous: Vec<f32> = grid.row_heights(0).to_vec();
            updater.tick_with_window(window, &mut grid).unwrap();

            assert_eq!(grid.row_heights(1), previous.as_slice());
            let expected: Vec<f32> = window.iter().map(|l| params.height_for(*l)).collect();
            assert_eq!(grid.row_heights(0), expected.as_slice());
        }
    }

    #[test]
    fn test_constant_window_converges() {
        let params = SurfaceParams::with_size(6);
        let mut grid = SurfaceGrid::new(&params);
        let updater = SurfaceUpdater::new(&params);
        let window = [0.3; 6];

        for _ in 0..grid.rows() {
            updater.tick_with_window(&window, &mut grid).unwrap();
        }

        let expected = params.height_for(0.3);
        for row in 0..grid.rows() {
            assert!(grid.row_heights(row).iter().all(|&h| h == expected));
        }
    }

    #[test]
    fn test_large_transient_kept_unclamped() {
        let params = SurfaceParams::with_size(3);
        let mut grid = SurfaceGrid::new(&params);
        let updater = SurfaceUpdater::new(&params);

        updater.tick_with_window(&[0.0, 5.0, 0.0], &mut grid).unwrap();
        assert!((grid.height(0, 1) - 76.5).abs() < 1e-3);
    }

    #[test]
    fn test_planar_coordinates_never_change() {
        let params = SurfaceParams::with_size(4);
        let mut grid = SurfaceGrid::new(&params);
        let updater = SurfaceUpdater::new(&params);
        let before: Vec<[f32; 3]> = (0..4)
            .flat_map(|i| (0..4).map(move |j| (i, j)))
            .map(|(i, j)| grid.point(i, j))
            .collect();

        for _ in 0..10 {
            updater.tick_with_window(&[0.4, 0.1, 0.9, 0.2], &mut grid).unwrap();
        }

        for (idx, old) in before.iter().enumerate() {
            let now = grid.point(idx / 4, idx % 4);
            assert_eq!(now[0], old[0]);
            assert_eq!(now[2], old[2]);
        }
    }

    #[test]
    fn test_mismatched_window_rejected() {
        let params = SurfaceParams::with_size(4);
        let mut grid = SurfaceGrid::new(&params);
        let mut updater = SurfaceUpdater::new(&params);

        updater
            .tick_with_window(&[0.2, 0.2, 0.2, 0.2], &mut grid)
            .unwrap();
        let before: Vec<f32> = (0..4).flat_map(|i| grid.row_heights(i).to_vec()).collect();

        let err = updater
            .tick_with_window(&[1.0, 1.0, 1.0, 1.0, 1.0], &mut grid)
            .unwrap_err();
        assert_eq!(
            err,
            WindowSizeError {
                expected: 4,
                actual: 5
            }
        );

        let short_history = AmplitudeHistory::new(3);
        assert!(updater.tick(&short_history, &mut grid).is_err());

        let after: Vec<f32> = (0..4).flat_map(|i| grid.row_heights(i).to_vec()).collect();
        assert_eq!(before, after);
    }
}
