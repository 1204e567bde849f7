use super::*;
use crate::foundation::core::{Color, ColorState};

fn identity_cell(n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| vec![format!("r{i}"), format!("g{i}"), format!("b{i}")])
        .collect()
}

#[test]
fn compiles_rectangular_expression_grid() {
    let functions = vec![
        vec![identity_cell(2), identity_cell(2), identity_cell(2)],
        vec![identity_cell(2), identity_cell(2), identity_cell(2)],
    ];
    let grid = TransformGrid::compile_expressions(&functions, 2).unwrap();
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 3);
    assert_eq!(grid.numcolors(), 2);
    assert_eq!(grid.kind(), TransformKind::Arithmetic);
    assert_eq!(grid.iter().count(), 6);

    let s = ColorState::new([Color::new(1.0, 2.0, 3.0), Color::new(4.0, 5.0, 6.0)]).unwrap();
    assert_eq!(grid.cell(1, 2).apply(&s), s);
}

#[test]
fn unequal_row_widths_fail_first() {
    // The second row is short *and* its cell has the wrong color count; width wins.
    let functions = vec![
        vec![identity_cell(1), identity_cell(1)],
        vec![identity_cell(2)],
    ];
    let err = TransformGrid::compile_expressions(&functions, 1).unwrap_err();
    assert!(matches!(err, QuiltError::Shape(ref m) if m.contains("width")), "{err}");
}

#[test]
fn color_count_mismatch_is_a_shape_error() {
    let functions = vec![vec![identity_cell(1)]];
    let err = TransformGrid::compile_expressions(&functions, 2).unwrap_err();
    assert!(matches!(err, QuiltError::Shape(ref m) if m.contains("color functions")));
}

#[test]
fn channel_count_mismatch_is_a_shape_error() {
    let functions = vec![vec![vec![vec!["r0".to_string(), "g0".to_string()]]]];
    let err = TransformGrid::compile_expressions(&functions, 1).unwrap_err();
    assert!(matches!(err, QuiltError::Shape(ref m) if m.contains("channel")));
}

#[test]
fn formula_errors_carry_their_location() {
    let functions = vec![vec![vec![vec!["r0", "g0", "b1"]]]];
    let err = TransformGrid::compile_expressions(&functions, 1).unwrap_err();
    match err {
        QuiltError::Parse(m) => {
            assert!(m.contains("cell (0,0) color 0 channel 2"), "{m}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_grids_are_rejected() {
    let none: Vec<Vec<Vec<Vec<String>>>> = vec![];
    assert!(matches!(
        TransformGrid::compile_expressions(&none, 1),
        Err(QuiltError::Shape(_))
    ));
    let no_cols: Vec<Vec<Vec<Vec<String>>>> = vec![vec![]];
    assert!(matches!(
        TransformGrid::compile_expressions(&no_cols, 1),
        Err(QuiltError::Shape(_))
    ));
}

#[test]
fn color_count_bounds() {
    let functions = vec![vec![identity_cell(1)]];
    assert!(matches!(
        TransformGrid::compile_expressions(&functions, 0),
        Err(QuiltError::Bounds(_))
    ));
    assert!(matches!(
        TransformGrid::compile_permutations(&[vec![vec![0; 11]]], 11),
        Err(QuiltError::Bounds(_))
    ));
}

#[test]
fn permutation_grid_validation() {
    let ok = TransformGrid::compile_permutations(&[vec![vec![1, 0], vec![0, 0]]], 2).unwrap();
    assert_eq!(ok.kind(), TransformKind::Permutation);
    assert_eq!(ok.cols(), 2);

    assert!(matches!(
        TransformGrid::compile_permutations(&[vec![vec![0]]], 2),
        Err(QuiltError::Shape(_))
    ));
    assert!(matches!(
        TransformGrid::compile_permutations(&[vec![vec![0, 2]]], 2),
        Err(QuiltError::Bounds(_))
    ));
    assert!(matches!(
        TransformGrid::compile_permutations(&[vec![vec![0]], vec![]], 1),
        Err(QuiltError::Shape(_))
    ));
}

#[test]
fn identity_grid_has_identity_cells() {
    let grid = TransformGrid::identity(2, 3, 1).unwrap();
    let s = ColorState::new([Color::new(7.0, 8.0, 9.0)]).unwrap();
    for (_, _, cell) in grid.iter() {
        assert_eq!(cell.apply(&s), s);
    }
    assert!(TransformGrid::identity(0, 3, 1).is_err());
}
