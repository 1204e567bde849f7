use super::*;
use crate::foundation::core::Color;
use crate::render::raster::{RenderOpts, raster_size};

/// Cell `(row, col)` appends its index as one base-`R*C` digit to the red channel, so every
/// leaf's red value spells out the path that reached it.
fn path_encoding_grid(rows: usize, cols: usize) -> TransformGrid {
    let base = rows * cols;
    let functions: Vec<Vec<Vec<Vec<String>>>> = (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    vec![vec![
                        format!("r0*{base}+{}", row * cols + col),
                        "g0".to_string(),
                        "b0".to_string(),
                    ]]
                })
                .collect()
        })
        .collect();
    TransformGrid::compile_expressions(&functions, 1).unwrap()
}

#[derive(Default)]
struct Recorder {
    leaves: Vec<(u32, u32, ColorState)>,
}

impl LeafVisitor for Recorder {
    fn leaf(&mut self, x: u32, y: u32, state: &ColorState) {
        self.leaves.push((x, y, state.clone()));
    }
}

fn start() -> ColorState {
    ColorState::new([Color::new(0.0, 0.0, 0.0)]).unwrap()
}

#[test]
fn every_pixel_is_visited_exactly_once() {
    for layout in [Layout::RowsDown, Layout::RowsAcross] {
        for (rows, cols) in [(1, 1), (1, 3), (2, 2), (2, 3), (3, 1), (3, 2)] {
            for depth in 0..=3u32 {
                let grid = path_encoding_grid(rows, cols);
                let opts = RenderOpts {
                    layout,
                    ..RenderOpts::default()
                };
                let (w, h) = raster_size(rows, cols, depth, &opts).unwrap();
                let sub = Subdivision::new(&grid, depth, layout);
                let mut rec = Recorder::default();
                sub.run(&start(), &mut rec);

                let mut hits = vec![0u32; (w * h) as usize];
                for (x, y, _) in &rec.leaves {
                    assert!(*x < w && *y < h, "leaf ({x},{y}) outside {w}x{h}");
                    hits[(y * w + x) as usize] += 1;
                }
                assert!(
                    hits.iter().all(|&n| n == 1),
                    "{layout:?} {rows}x{cols} depth {depth}: {hits:?}"
                );
            }
        }
    }
}

#[test]
fn siblings_see_independent_states() {
    let grid = path_encoding_grid(2, 3);
    let sub = Subdivision::new(&grid, 2, Layout::RowsDown);
    let mut rec = Recorder::default();
    sub.run(&start(), &mut rec);

    let mut reds: Vec<u64> = rec.leaves.iter().map(|l| l.2.primary().r as u64).collect();
    reds.sort_unstable();
    // 36 leaves, each with a distinct two-digit base-6 path.
    assert_eq!(reds, (0..36).collect::<Vec<u64>>());
}

#[test]
fn rows_down_places_rows_vertically() {
    let grid = path_encoding_grid(2, 3);
    let sub = Subdivision::new(&grid, 1, Layout::RowsDown);
    let mut rec = Recorder::default();
    sub.run(&start(), &mut rec);
    // Row-major visiting order, and cell index = row * cols + col.
    let placed: Vec<(u32, u32, u64)> = rec
        .leaves
        .iter()
        .map(|(x, y, s)| (*x, *y, s.primary().r as u64))
        .collect();
    assert_eq!(
        placed,
        vec![
            (0, 0, 0),
            (1, 0, 1),
            (2, 0, 2),
            (0, 1, 3),
            (1, 1, 4),
            (2, 1, 5)
        ]
    );
}

#[test]
fn rows_across_places_rows_horizontally() {
    let grid = path_encoding_grid(2, 3);
    let sub = Subdivision::new(&grid, 1, Layout::RowsAcross);
    let mut rec = Recorder::default();
    sub.run(&start(), &mut rec);
    let positions: Vec<(u32, u32)> = rec.leaves.iter().map(|(x, y, _)| (*x, *y)).collect();
    assert_eq!(
        positions,
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
    );
}

#[test]
fn path_to_inverts_placement() {
    for layout in [Layout::RowsDown, Layout::RowsAcross] {
        let grid = path_encoding_grid(3, 2);
        let sub = Subdivision::new(&grid, 3, layout);
        let mut rec = Recorder::default();
        sub.run(&start(), &mut rec);

        for (x, y, state) in &rec.leaves {
            let path = sub.path_to(*x, *y);
            assert_eq!(path.len(), 3);
            let replayed = path
                .iter()
                .fold(start(), |s, &(row, col)| grid.cell(row, col).apply(&s));
            assert_eq!(&replayed, state, "{layout:?} at ({x},{y})");
        }
    }
}

#[test]
fn depth_zero_is_a_single_leaf_with_the_initial_state() {
    let grid = path_encoding_grid(2, 2);
    let sub = Subdivision::new(&grid, 0, Layout::RowsDown);
    let mut rec = Recorder::default();
    sub.run(&start(), &mut rec);
    assert_eq!(rec.leaves, vec![(0, 0, start())]);
    assert!(sub.path_to(0, 0).is_empty());
}
