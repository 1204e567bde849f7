use super::*;
use crate::transform::grid::TransformKind;

#[test]
fn parses_expression_requests_with_both_color_forms() {
    let req = RenderRequest::from_json(
        r#"{
            "iterations": 2,
            "colors": [[10, 20, 30], {"r": 1, "g": 2, "b": 3}],
            "functions": [[ [["r0","g0","b0"], ["r1","g1","b1"]] ]],
            "name": "ignored"
        }"#,
    )
    .unwrap();
    assert_eq!(req.iterations, 2);
    assert_eq!(req.functions.dims(), (1, 1));
    assert_eq!(req.numframes, None);

    let s = req.initial_state().unwrap();
    assert_eq!(s.get(0), Some(Color::new(10.0, 20.0, 30.0)));
    assert_eq!(s.get(1), Some(Color::new(1.0, 2.0, 3.0)));
    assert_eq!(req.compile_grid().unwrap().kind(), TransformKind::Arithmetic);
}

#[test]
fn parses_permutation_requests() {
    let req = RenderRequest::from_json(
        r#"{"iterations": 1, "colors": [[0,0,0],[255,255,255]],
            "functions": [[[0,1],[1,0]],[[1,0],[0,1]]], "numframes": 4}"#,
    )
    .unwrap();
    assert!(matches!(req.functions, FunctionGrid::Permutations(_)));
    assert_eq!(req.numframes, Some(4));
    let grid = req.compile_grid().unwrap();
    assert_eq!(grid.kind(), TransformKind::Permutation);
    assert_eq!((grid.rows(), grid.cols()), (2, 2));
}

#[test]
fn color_count_and_shape_are_validated() {
    let mut req = RenderRequest {
        iterations: 0,
        colors: vec![],
        functions: FunctionGrid::Permutations(vec![vec![vec![0]]]),
        numframes: None,
    };
    assert!(matches!(req.initial_state(), Err(QuiltError::Bounds(_))));

    req.colors = vec![ColorSpec::Triple(vec![0.0, 0.0, 0.0]); 11];
    assert!(matches!(req.initial_state(), Err(QuiltError::Bounds(_))));

    req.colors = vec![ColorSpec::Triple(vec![0.0, 0.0])];
    assert!(matches!(req.initial_state(), Err(QuiltError::Shape(_))));

    req.colors = vec![ColorSpec::Triple(vec![0.0, f64::NAN, 0.0])];
    assert!(matches!(req.initial_state(), Err(QuiltError::Shape(_))));
}

#[test]
fn out_of_range_initial_channels_are_accepted() {
    let req = RenderRequest::from_json(
        r#"{"iterations": 0, "colors": [[-10, 300, 0]], "functions": [[[0]]]}"#,
    )
    .unwrap();
    assert_eq!(
        req.initial_state().unwrap().primary(),
        Color::new(-10.0, 300.0, 0.0)
    );
}

#[test]
fn negative_iterations_fail_to_parse() {
    let err = RenderRequest::from_json(
        r#"{"iterations": -1, "colors": [[0,0,0]], "functions": [[[0]]]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, QuiltError::Serde(_)));
}

#[test]
fn serializes_back_to_an_equivalent_request() {
    let req = RenderRequest {
        iterations: 3,
        colors: vec![Color::new(1.0, 2.0, 3.0).into()],
        functions: FunctionGrid::Expressions(vec![vec![vec![vec![
            "r0+1".to_string(),
            "g0".to_string(),
            "b0".to_string(),
        ]]]]),
        numframes: Some(2),
    };
    let json = req.to_json_pretty().unwrap();
    assert_eq!(RenderRequest::from_json(&json).unwrap(), req);
}
