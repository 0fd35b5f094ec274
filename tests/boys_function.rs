//! Integration tests for the batched Boys function evaluator

mod common;

use boys::algorithm::boys::{GRID_SPACING, SMALL_ORDER_THRESHOLD};
use boys::prelude::*;
use common::{SAMPLE_BATCH, assert_allclose_f64, create_evaluator, linspace_step};

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_sample_batch_small_order() {
    let evaluator = create_evaluator();
    let f = evaluator.evaluate(3, &SAMPLE_BATCH).unwrap();
    let expected = ReferenceBoys.boys(3, &SAMPLE_BATCH).unwrap();

    assert_eq!(f.shape(), [4, BATCH_SIZE]);
    for order in 0..=3 {
        assert_allclose_f64(
            f.row(order),
            expected.row(order),
            1e-6,
            0.0,
            &format!("order 3, row {order}"),
        );
    }
}

#[test]
fn test_sample_batch_large_order() {
    let evaluator = create_evaluator();
    let f = evaluator.evaluate(6, &SAMPLE_BATCH).unwrap();
    let expected = ReferenceBoys.boys(6, &SAMPLE_BATCH).unwrap();

    assert_eq!(f.shape(), [7, BATCH_SIZE]);
    for order in 0..=6 {
        assert_allclose_f64(
            f.row(order),
            expected.row(order),
            1e-6,
            0.0,
            &format!("order 6, row {order}"),
        );
    }
}

#[test]
fn test_sample_batch_known_values() {
    // mpmath, 50 digits
    let f0 = [
        0.7108492693138488,
        0.4762427652530322,
        0.37419289797353583,
        0.3172953097882878,
        0.13823691390110465,
        0.13642335168949432,
        0.1346793440493639,
        0.1330005557291655,
    ];
    let f6 = [
        0.02747366592417267,
        0.004438735908541375,
        0.0008006107400452766,
        0.0001667478546425271,
        4.6581944989111005e-09,
        3.923363334648874e-09,
        3.31908316174076e-09,
        2.8196821473599404e-09,
    ];

    let f = boys::boys_function(6, &SAMPLE_BATCH).unwrap();
    assert_allclose_f64(f.row(0), &f0, 1e-10, 0.0, "F_0");
    assert_allclose_f64(f.row(6), &f6, 1e-10, 0.0, "F_6");
}

// ============================================================================
// Closed-form checks
// ============================================================================

#[test]
fn test_value_at_zero() {
    let evaluator = create_evaluator();
    for order in 0..=MAX_ORDER {
        let f = evaluator.evaluate(order, &[0.0]).unwrap();
        assert_eq!(f[(0, 0)], 1.0);
        for n in 0..=order {
            let expected = 1.0 / (2 * n + 1) as f64;
            assert!(
                ((f[(n, 0)] - expected) / expected).abs() < 1e-14,
                "F_{n}(0) = {} with order {order}",
                f[(n, 0)]
            );
        }
    }
}

#[test]
fn test_positive_and_decreasing() {
    let evaluator = create_evaluator();
    let mut x = linspace_step(80.0, 0.37);
    x.extend([150.0, 400.0, 1000.0]);

    for order in 0..=MAX_ORDER {
        let f = evaluator.evaluate_slice(order, &x).unwrap();
        for n in 0..=order {
            let row = f.row(n);
            assert!(row.iter().all(|&v| v > 0.0), "F_{n} not positive");
            for (i, pair) in row.windows(2).enumerate() {
                assert!(
                    pair[1] < pair[0],
                    "F_{n} not decreasing between x = {} and x = {}",
                    x[i],
                    x[i + 1]
                );
            }
        }
    }
}

#[test]
fn test_downward_recurrence_relation() {
    let evaluator = create_evaluator();
    let x = linspace_step(60.0, 0.73);

    for order in [3, MAX_ORDER] {
        let f = evaluator.evaluate_slice(order, &x).unwrap();
        for n in 0..order {
            for (i, &xi) in x.iter().enumerate() {
                let lhs = (2 * n + 1) as f64 * f[(n, i)];
                let rhs = 2.0 * xi * f[(n + 1, i)] + (-xi).exp();
                assert!(
                    ((lhs - rhs) / rhs).abs() < 1e-6,
                    "recurrence fails at order {order}, n = {n}, x = {xi}: {lhs} vs {rhs}"
                );
            }
        }
    }
}

// ============================================================================
// Branch consistency
// ============================================================================

#[test]
fn test_continuity_at_boundary() {
    let evaluator = create_evaluator();
    let x = [X_MAX - 1e-9, X_MAX, X_MAX + 1e-9];

    for order in 0..=MAX_ORDER {
        let f = evaluator.evaluate(order, &x).unwrap();
        for n in 0..=order {
            let row = f.row(n);
            assert_allclose_f64(&row[..1], &row[1..2], 1e-6, 0.0, "below vs at X_MAX");
            assert_allclose_f64(&row[2..], &row[1..2], 1e-6, 0.0, "above vs at X_MAX");
        }
    }
}

#[test]
fn test_small_order_rows_are_prefix_stable() {
    // Below the threshold each row is computed directly, so asking for more
    // orders never changes the lower rows.
    let evaluator = create_evaluator();
    let x = linspace_step(45.0, 0.61);
    let widest = evaluator
        .evaluate_slice(SMALL_ORDER_THRESHOLD - 1, &x)
        .unwrap();

    for order in 0..SMALL_ORDER_THRESHOLD {
        let f = evaluator.evaluate_slice(order, &x).unwrap();
        for n in 0..=order {
            assert_eq!(f.row(n), widest.row(n), "order {order}, row {n}");
        }
    }
}

#[test]
fn test_paths_agree_on_short_grid() {
    let evaluator = create_evaluator();
    let x: Vec<f64> = linspace_step(X_MAX - GRID_SPACING, 0.29);
    let top = evaluator.evaluate_slice(MAX_ORDER, &x).unwrap();

    for order in 0..MAX_ORDER {
        let f = evaluator.evaluate_slice(order, &x).unwrap();
        assert_allclose_f64(
            f.row(order),
            top.row(order),
            1e-12,
            0.0,
            &format!("F_{order} direct vs recurred from F_{MAX_ORDER}"),
        );
    }
}

#[test]
fn test_batch_independence() {
    let evaluator = create_evaluator();
    for order in [0, 2, 3, 4, 9, MAX_ORDER] {
        let batch = evaluator.evaluate(order, &SAMPLE_BATCH).unwrap();
        for (i, &xi) in SAMPLE_BATCH.iter().enumerate() {
            let single = evaluator.evaluate(order, &[xi]).unwrap();
            assert_eq!(single.column(0), batch.column(i), "order {order}, x = {xi}");
        }
    }
}

// ============================================================================
// Many batches
// ============================================================================

#[test]
fn test_evaluate_batches_matches_serial() {
    let batches: Vec<[f64; BATCH_SIZE]> = (0..100)
        .map(|b| std::array::from_fn(|i| (b * BATCH_SIZE + i) as f64 * 0.071))
        .collect();

    let serial = create_evaluator();
    let pooled = create_evaluator().with_parallelism(ParallelismConfig::new(Some(4), Some(1)));

    for order in [2, 7] {
        let results = pooled.evaluate_batches(order, &batches).unwrap();
        for (batch, result) in batches.iter().zip(&results) {
            assert_eq!(result, &serial.evaluate(order, batch).unwrap());
        }
    }
}

#[test]
fn test_domain_errors_produce_no_output() {
    let evaluator = create_evaluator();

    let err = evaluator.evaluate(MAX_ORDER + 1, &SAMPLE_BATCH).unwrap_err();
    assert!(matches!(
        err,
        Error::Domain(DomainError::OrderOutOfRange { order, max_order })
            if order == MAX_ORDER + 1 && max_order == MAX_ORDER
    ));

    let mut x = SAMPLE_BATCH;
    x[6] = -43.3;
    let err = evaluator.evaluate(3, &x).unwrap_err();
    assert_eq!(err.to_string(), "Domain error: argument x[6] = -43.3 is NaN or outside [0, f64::MAX / 2]");
}
