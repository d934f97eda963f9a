use super::*;

// ---- Sphere ----

#[test]
fn test_sphere_optimum() {
    let x = vec![0.0; 10];
    assert!((sphere(&x)).abs() < 1e-10);
}

#[test]
fn test_sphere_known_value() {
    // sphere([1,2,3]) = 1 + 4 + 9 = 14
    assert!((sphere(&[1.0, 2.0, 3.0]) - 14.0).abs() < 1e-10);
}

#[test]
fn test_sphere_empty() {
    assert!((sphere(&[])).abs() < 1e-10);
}

#[test]
fn test_sphere_symmetry() {
    let x = vec![1.5, -2.3, 4.7];
    let neg_x: Vec<f64> = x.iter().map(|xi| -xi).collect();
    assert!((sphere(&x) - sphere(&neg_x)).abs() < 1e-10);
}

// ---- Rosenbrock ----

#[test]
fn test_rosenbrock_optimum() {
    let x = vec![1.0; 5];
    assert!((rosenbrock(&x)).abs() < 1e-10);
}

#[test]
fn test_rosenbrock_known_value() {
    // rosenbrock([0,0]) = 100*(0-0)^2 + (1-0)^2 = 1
    assert!((rosenbrock(&[0.0, 0.0]) - 1.0).abs() < 1e-10);
}

#[test]
fn test_rosenbrock_single_dim() {
    // windows(2) on a single element is empty
    assert!((rosenbrock(&[5.0])).abs() < 1e-10);
}

// ---- Rastrigin ----

#[test]
fn test_rastrigin_optimum() {
    assert!((rastrigin(&[0.0; 6])).abs() < 1e-10);
}

#[test]
fn test_rastrigin_at_integer() {
    // cos(2π) = 1, so each unit coordinate adds 1
    assert!((rastrigin(&[1.0, -1.0]) - 2.0).abs() < 1e-10);
}

#[test]
fn test_rastrigin_always_nonnegative() {
    for x in [[0.3, -4.2], [5.12, 5.12], [-2.5, 0.5]] {
        assert!(rastrigin(&x) >= 0.0);
    }
}

// ---- Ackley1 ----

#[test]
fn test_ackley1_optimum() {
    assert!(ackley1(&[0.0; 5]).abs() < 1e-10);
}

#[test]
fn test_ackley1_known_value() {
    // 20 - 20*exp(-0.2) at x = [1]
    let expected = 20.0 - 20.0 * (-0.2_f64).exp();
    assert!((ackley1(&[1.0]) - expected).abs() < 1e-10);
}

#[test]
fn test_ackley1_empty() {
    assert_eq!(ackley1(&[]), 0.0);
}

// ---- Griewank ----

#[test]
fn test_griewank_optimum() {
    assert!(griewank(&[0.0; 3]).abs() < 1e-10);
}

#[test]
fn test_griewank_divisor_index() {
    // second coordinate is divided by sqrt(2)
    let expected = 2.0 / 4000.0 - 1.0_f64.cos() * (1.0 / 2.0_f64.sqrt()).cos() + 1.0;
    assert!((griewank(&[1.0, 1.0]) - expected).abs() < 1e-12);
}

// ---- Alpine1 ----

#[test]
fn test_alpine1_optimum() {
    assert!(alpine1(&[0.0; 4]).abs() < 1e-10);
}

#[test]
fn test_alpine1_known_value() {
    // |(-1)·sin(-1) - 0.1| = sin(1) - 0.1
    assert!((alpine1(&[-1.0]) - (1.0_f64.sin() - 0.1)).abs() < 1e-12);
}

// ---- Salomon ----

#[test]
fn test_salomon_optimum() {
    assert!(salomon(&[0.0; 3]).abs() < 1e-10);
}

#[test]
fn test_salomon_unit_ring() {
    // on the unit sphere the cosine term vanishes
    assert!((salomon(&[0.6, 0.8]) - 0.1).abs() < 1e-10);
}

// ---- Quartic ----

#[test]
fn test_quartic_optimum() {
    assert!(quartic(&[0.0; 4]).abs() < 1e-10);
}

#[test]
fn test_quartic_weights_by_index() {
    // 1·1 + 2·16 = 33
    assert!((quartic(&[1.0, 2.0]) - 33.0).abs() < 1e-10);
}

#[test]
fn test_quartic_is_deterministic() {
    let x = [0.4, -0.9, 1.1];
    assert_eq!(quartic(&x), quartic(&x));
}

// ---- Rotated hyper-ellipsoid ----

#[test]
fn test_rotated_hyper_ellipsoid_known_value() {
    // 1 + (1 + 4) + (1 + 4 + 9) = 20
    assert!((rotated_hyper_ellipsoid(&[1.0, 2.0, 3.0]) - 20.0).abs() < 1e-10);
}

#[test]
fn test_rotated_hyper_ellipsoid_empty() {
    assert_eq!(rotated_hyper_ellipsoid(&[]), 0.0);
}

// ---- High-conditioned elliptic ----

#[test]
fn test_high_conditioned_elliptic_single_dim() {
    assert!((high_conditioned_elliptic(&[2.0]) - 4.0).abs() < 1e-10);
}

#[test]
fn test_high_conditioned_elliptic_condition_number() {
    let first = high_conditioned_elliptic(&[1.0, 0.0, 0.0]);
    let last = high_conditioned_elliptic(&[0.0, 0.0, 1.0]);
    assert!((last / first - 1e6).abs() < 1e-3);
}

// ---- all_benchmarks() metadata ----

#[test]
fn test_all_benchmarks_count() {
    assert_eq!(all_benchmarks().len(), 10);
}

#[test]
fn test_all_benchmarks_valid_bounds() {
    for info in all_benchmarks() {
        assert!(
            info.bounds.0 < info.bounds.1,
            "{} has inverted bounds",
            info.name
        );
    }
}

#[test]
fn test_all_benchmarks_names_unique() {
    let benchmarks = all_benchmarks();
    let mut names: Vec<&str> = benchmarks.iter().map(|b| b.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), benchmarks.len());
}

#[test]
fn test_all_benchmarks_reach_optimum() {
    for info in all_benchmarks() {
        let at = if info.name == "Rosenbrock" { 1.0 } else { 0.0 };
        let value = (info.function)(&[at; 5]);
        assert!(
            (value - info.optimum).abs() < 1e-10,
            "{} evaluates to {value} at its optimum",
            info.name
        );
    }
}

#[test]
fn test_all_benchmarks_nonnegative_inside_bounds() {
    for info in all_benchmarks() {
        let (lo, hi) = info.bounds;
        for t in [0.1, 0.37, 0.5, 0.81] {
            let x = [lo + t * (hi - lo), lo + (1.0 - t) * (hi - lo), lo + 0.5 * t * (hi - lo)];
            assert!((info.function)(&x) >= -1e-12, "{} negative at {x:?}", info.name);
        }
    }
}
