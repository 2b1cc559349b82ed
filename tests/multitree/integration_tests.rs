use approx::assert_abs_diff_eq;
use multitree_rs::prelude::*;

fn grid_points(n: usize) -> Vec<f64> {
    // Deterministic, well-spread 2-D points.
    (0..n)
        .flat_map(|i| {
            let x = (i % 5) as f64;
            let y = (i / 5) as f64 + 0.3 * ((i * 7 % 11) as f64 / 11.0);
            [x, y]
        })
        .collect()
}

#[test]
fn test_concrete_pairwise_scenario() {
    // Three points on a line, kernel = absolute difference. The sum
    // touching point 0 is |0-1| + |0-2| = 3.
    let set = PointSet::new(&[0.0, 1.0, 2.0], 1).unwrap();

    let model = MultiTree::new()
        .leaf_size(1)
        .absolute_tolerance(0.0)
        .build()
        .unwrap();

    let result = model.compute(&EuclideanKernel, &[&set, &set]).unwrap();
    assert_abs_diff_eq!(result.potentials()[0][0], 3.0);
    assert_abs_diff_eq!(result.potentials()[0][1], 2.0);
    assert_abs_diff_eq!(result.potentials()[0][2], 3.0);
    assert_abs_diff_eq!(result.total_sum(), 4.0);

    let naive = model.compute_naive(&EuclideanKernel, &[&set, &set]).unwrap();
    assert_abs_diff_eq!(naive.potentials()[0][0], 3.0);

    let summary = result.maximum_relative_error(&naive).unwrap();
    assert_abs_diff_eq!(summary.max_absolute, 0.0);
}

#[test]
fn test_large_leaf_forces_direct_evaluation() {
    // Leaf size >= n makes the root a leaf: one base case, no prunes.
    let coords = grid_points(12);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(2.0);

    let model = MultiTree::new()
        .leaf_size(12)
        .absolute_tolerance(0.5)
        .build()
        .unwrap();

    let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();
    let naive = model.compute_naive(&kernel, &[&set, &set, &set]).unwrap();

    assert_eq!(result.num_finite_difference_prunes, 0);
    // C(12, 3) exact evaluations.
    assert_eq!(result.num_direct_evaluations, 220);
    for (a, b) in result.potentials()[0].iter().zip(&naive.potentials()[0]) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
}

#[test]
fn test_three_body_agreement_within_tolerance() {
    // 20 points, dimension 2, arity 3.
    let coords = grid_points(20);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(1.5);
    let tolerance = 0.01;

    let model = MultiTree::new()
        .leaf_size(4)
        .absolute_tolerance(tolerance)
        .build()
        .unwrap();

    let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();
    let naive = model.compute_naive(&kernel, &[&set, &set, &set]).unwrap();

    // The global estimate honors the absolute tolerance.
    assert!((result.total_sum() - naive.total_sum()).abs() <= tolerance + 1e-9);
    assert!(result.error_spent() <= tolerance + 1e-12);
    // Every tuple is accounted for exactly once: C(20, 3).
    assert_abs_diff_eq!(result.tuples_accounted(), 1140.0, epsilon = 1e-6);
    assert_abs_diff_eq!(naive.tuples_accounted(), 1140.0, epsilon = 1e-6);
}

#[test]
fn test_pruning_on_separated_clusters() {
    // Two tight, far-apart clusters: cross-cluster triples are negligible
    // under a narrow Gaussian and must be pruned, not enumerated.
    let mut coords = Vec::new();
    for i in 0..10 {
        coords.extend_from_slice(&[0.01 * i as f64, 0.02 * i as f64]);
    }
    for i in 0..10 {
        coords.extend_from_slice(&[100.0 + 0.01 * i as f64, 100.0 + 0.02 * i as f64]);
    }
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(0.5);
    let tolerance = 1e-6;

    let model = MultiTree::new()
        .leaf_size(4)
        .absolute_tolerance(tolerance)
        .build()
        .unwrap();

    let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();
    let naive = model.compute_naive(&kernel, &[&set, &set, &set]).unwrap();

    assert!(result.num_finite_difference_prunes > 0, "expected prunes");
    assert!(
        result.num_direct_evaluations < naive.num_direct_evaluations,
        "pruning should skip part of the tuple space"
    );
    for (a, b) in result.potentials()[0].iter().zip(&naive.potentials()[0]) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-4);
    }
}

#[test]
fn test_bichromatic_pairs() {
    let a = PointSet::new(&[0.0, 1.0, 2.0, 3.0], 1).unwrap();
    let b = PointSet::new(&[10.0, 11.0], 1).unwrap();

    let model = MultiTree::new().leaf_size(2).build().unwrap();
    let result = model.compute(&EuclideanKernel, &[&a, &b]).unwrap();
    let naive = model.compute_naive(&EuclideanKernel, &[&a, &b]).unwrap();

    // Two result vectors, one per distinct set; all 4 * 2 pairs count.
    assert_eq!(result.potentials().len(), 2);
    assert_abs_diff_eq!(result.tuples_accounted(), 8.0);
    for set in 0..2 {
        for (x, y) in result.potentials()[set].iter().zip(&naive.potentials()[set]) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
    }
    // Point 10.0 sees distances 10 + 9 + 8 + 7.
    assert_abs_diff_eq!(result.potentials()[1][0], 34.0, epsilon = 1e-12);
}

#[test]
fn test_determinism() {
    let coords = grid_points(20);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(1.0);

    let model = MultiTree::new()
        .leaf_size(3)
        .absolute_tolerance(0.05)
        .build()
        .unwrap();

    let first = model.compute(&kernel, &[&set, &set, &set]).unwrap();
    let second = model.compute(&kernel, &[&set, &set, &set]).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.num_finite_difference_prunes,
        second.num_finite_difference_prunes
    );
    assert_eq!(first.num_exclusion_prunes, second.num_exclusion_prunes);
    assert_eq!(first.num_direct_evaluations, second.num_direct_evaluations);
}

#[test]
fn test_relative_error_report_is_signed() {
    let coords = grid_points(15);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(1.5);

    let model = MultiTree::new()
        .leaf_size(3)
        .absolute_tolerance(0.02)
        .build()
        .unwrap();

    let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();
    let naive = model.compute_naive(&kernel, &[&set, &set, &set]).unwrap();
    let summary = result.maximum_relative_error(&naive).unwrap();

    assert!(summary.max_absolute.is_finite());
    assert!(summary.max_positive >= 0.0);
    assert!(summary.max_negative <= 0.0);
    assert!(
        summary.max_absolute >= summary.max_positive.abs()
            && summary.max_absolute >= summary.max_negative.abs()
    );
}

#[test]
fn test_error_handling() {
    let set = PointSet::new(&[0.0, 1.0, 2.0], 1).unwrap();
    let flat = PointSet::new(&[0.0, 0.0, 1.0, 1.0], 2).unwrap();
    let model = MultiTree::new().build().unwrap();

    // Slot count must match arity.
    match model.compute(&EuclideanKernel, &[&set]) {
        Err(MultiTreeError::ArityMismatch { arity: 2, sets: 1 }) => (),
        other => panic!("expected ArityMismatch, got {:?}", other),
    }

    // Dimensionality must agree across slots.
    match model.compute(&EuclideanKernel, &[&set, &flat]) {
        Err(MultiTreeError::MismatchedDimensions { .. }) => (),
        other => panic!("expected MismatchedDimensions, got {:?}", other),
    }
}

#[test]
fn test_naive_safety_limit() {
    let coords: Vec<f64> = (0..200).map(|i| i as f64).collect();
    let set = PointSet::new(&coords, 1).unwrap();

    let model = MultiTree::new().naive_limit(100.0).build().unwrap();
    match model.compute_naive(&EuclideanKernel, &[&set, &set]) {
        Err(MultiTreeError::NaiveCostExceeded { .. }) => (),
        other => panic!("expected NaiveCostExceeded, got {:?}", other),
    }
}

#[cfg(feature = "cpu")]
#[test]
fn test_ndarray_integration() {
    use ndarray::Array2;

    let data = Array2::from_shape_vec((3, 1), vec![0.0, 1.0, 2.0]).unwrap();
    let set = PointSet::new(&data, 1).unwrap();

    let model = MultiTree::new().leaf_size(1).build().unwrap();
    let result = model.compute(&EuclideanKernel, &[&set, &set]).unwrap();
    assert_abs_diff_eq!(result.potentials()[0][0], 3.0);
}

#[test]
fn test_dump_and_display() {
    let set = PointSet::new(&[0.0, 1.0, 2.0], 1).unwrap();
    let model = MultiTree::new().leaf_size(1).build().unwrap();
    let result = model.compute(&EuclideanKernel, &[&set, &set]).unwrap();

    let mut buffer = Vec::new();
    result.dump(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("0 0 "));

    let shown = format!("{}", result);
    assert!(shown.contains("Direct evaluations"));
}
