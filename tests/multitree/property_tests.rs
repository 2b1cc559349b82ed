use approx::assert_abs_diff_eq;
use multitree_rs::prelude::*;
use rand::prelude::*;

fn random_points(rng: &mut StdRng, n: usize, dims: usize, scale: f64) -> Vec<f64> {
    (0..n * dims).map(|_| rng.gen::<f64>() * scale).collect()
}

/// A point sampled uniformly inside the box spanned by two corner points.
fn point_inside(rng: &mut StdRng, bound: &BoundingBox<f64>) -> Vec<f64> {
    (0..bound.dims())
        .map(|d| bound.lower()[d] + rng.gen::<f64>() * bound.width(d))
        .collect()
}

#[test]
fn euclidean_bound_is_sound() {
    let mut rng = StdRng::seed_from_u64(7);
    let kernel = EuclideanKernel;

    for _ in 0..200 {
        let corners_a = random_points(&mut rng, 2, 3, 10.0);
        let corners_b = random_points(&mut rng, 2, 3, 10.0);
        let box_a = BoundingBox::from_indexed(&corners_a, 3, &[0, 1]);
        let box_b = BoundingBox::from_indexed(&corners_b, 3, &[0, 1]);
        let (lower, upper) = kernel.bound(&[&box_a, &box_b]);

        for _ in 0..20 {
            let p = point_inside(&mut rng, &box_a);
            let q = point_inside(&mut rng, &box_b);
            let value = kernel.evaluate(&[&p, &q]);
            assert!(
                value >= lower - 1e-9 && value <= upper + 1e-9,
                "value {} escapes bound [{}, {}]",
                value,
                lower,
                upper
            );
        }
    }
}

#[test]
fn gaussian_bound_is_sound() {
    let mut rng = StdRng::seed_from_u64(11);
    let kernel = ThreeBodyGaussianKernel::new(2.0);

    for _ in 0..200 {
        let boxes: Vec<BoundingBox<f64>> = (0..3)
            .map(|_| {
                let corners = random_points(&mut rng, 2, 2, 6.0);
                BoundingBox::from_indexed(&corners, 2, &[0, 1])
            })
            .collect();
        let regions: Vec<&BoundingBox<f64>> = boxes.iter().collect();
        let (lower, upper) = kernel.bound(&regions);
        assert!(lower >= 0.0 && upper <= 1.0 + 1e-12);

        for _ in 0..20 {
            let points: Vec<Vec<f64>> =
                boxes.iter().map(|b| point_inside(&mut rng, b)).collect();
            let views: Vec<&[f64]> = points.iter().map(Vec::as_slice).collect();
            let value = kernel.evaluate(&views);
            assert!(
                value >= lower - 1e-12 && value <= upper + 1e-12,
                "value {} escapes bound [{}, {}]",
                value,
                lower,
                upper
            );
        }
    }
}

#[test]
fn budget_is_conserved() {
    let mut rng = StdRng::seed_from_u64(23);
    let coords = random_points(&mut rng, 30, 2, 4.0);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(1.0);

    for &tolerance in &[0.0, 1e-6, 1e-3, 0.1, 2.0] {
        let model = MultiTree::new()
            .leaf_size(4)
            .absolute_tolerance(tolerance)
            .build()
            .unwrap();
        let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();
        assert!(
            result.error_spent() <= tolerance + 1e-12,
            "error spent {} exceeds tolerance {}",
            result.error_spent(),
            tolerance
        );
    }
}

#[test]
fn every_tuple_is_accounted_once() {
    let mut rng = StdRng::seed_from_u64(31);

    for &(n, leaf_size, tolerance) in &[(10, 1, 0.0), (25, 4, 0.01), (40, 8, 1.0)] {
        let coords = random_points(&mut rng, n, 3, 5.0);
        let set = PointSet::new(&coords, 3).unwrap();
        let kernel = ThreeBodyGaussianKernel::new(1.5);

        let model = MultiTree::new()
            .leaf_size(leaf_size)
            .absolute_tolerance(tolerance)
            .build()
            .unwrap();
        let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();

        // C(n, 3) unordered triples.
        let expected = (n * (n - 1) * (n - 2) / 6) as f64;
        assert_abs_diff_eq!(result.tuples_accounted(), expected, epsilon = 1e-6);
    }
}

#[test]
fn zero_tolerance_matches_naive() {
    let mut rng = StdRng::seed_from_u64(43);
    let coords = random_points(&mut rng, 24, 2, 3.0);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(0.8);

    let model = MultiTree::new()
        .leaf_size(3)
        .absolute_tolerance(0.0)
        .build()
        .unwrap();

    let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();
    let naive = model.compute_naive(&kernel, &[&set, &set, &set]).unwrap();

    // Same sums up to accumulation order.
    for (a, b) in result.potentials()[0].iter().zip(&naive.potentials()[0]) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(result.total_sum(), naive.total_sum(), epsilon = 1e-9);
    assert_eq!(result.error_spent(), 0.0);
}

#[test]
fn total_sum_stays_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(59);
    let coords = random_points(&mut rng, 32, 2, 4.0);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(1.2);

    let naive = MultiTree::new()
        .build()
        .unwrap()
        .compute_naive(&kernel, &[&set, &set, &set])
        .unwrap();

    for &tolerance in &[1e-4, 1e-2, 0.5] {
        let model = MultiTree::new()
            .leaf_size(4)
            .absolute_tolerance(tolerance)
            .build()
            .unwrap();
        let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();
        let drift = (result.total_sum() - naive.total_sum()).abs();
        assert!(
            drift <= tolerance + 1e-9,
            "total sum drift {} exceeds tolerance {}",
            drift,
            tolerance
        );
    }
}

#[test]
fn relative_tolerance_keeps_accounting_exact() {
    let mut rng = StdRng::seed_from_u64(61);
    let coords = random_points(&mut rng, 30, 2, 4.0);
    let set = PointSet::new(&coords, 2).unwrap();
    let kernel = ThreeBodyGaussianKernel::new(1.0);

    let model = MultiTree::new()
        .leaf_size(4)
        .absolute_tolerance(1e-3)
        .relative_tolerance(1e-3)
        .build()
        .unwrap();
    let result = model.compute(&kernel, &[&set, &set, &set]).unwrap();

    let expected = (30 * 29 * 28 / 6) as f64;
    assert_abs_diff_eq!(result.tuples_accounted(), expected, epsilon = 1e-6);
    assert!(result.is_finalized());
    assert!(result.total_sum().is_finite());
}

#[test]
fn bichromatic_counts_partition() {
    // Counters across prune kinds and direct evaluations must cover the
    // full cross product, independent of tolerance.
    let mut rng = StdRng::seed_from_u64(67);
    let coords_a = random_points(&mut rng, 18, 2, 4.0);
    let coords_b = random_points(&mut rng, 13, 2, 4.0);
    let a = PointSet::new(&coords_a, 2).unwrap();
    let b = PointSet::new(&coords_b, 2).unwrap();

    for &tolerance in &[0.0, 0.05, 5.0] {
        let model = MultiTree::new()
            .leaf_size(3)
            .absolute_tolerance(tolerance)
            .build()
            .unwrap();
        let result = model.compute(&EuclideanKernel, &[&a, &b]).unwrap();
        assert_abs_diff_eq!(result.tuples_accounted(), (18 * 13) as f64, epsilon = 1e-9);

        let naive = model.compute_naive(&EuclideanKernel, &[&a, &b]).unwrap();
        assert_eq!(naive.num_direct_evaluations, 18 * 13);
    }
}
