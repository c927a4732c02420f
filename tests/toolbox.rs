//! End-to-end flow: document → DataFrame → SampleSet → fit → evaluate →
//! write-back.

use anyhow::Result;

use rusty_toolbox::{
    Column, ColumnKind, DataFrame, Extrapolate, InterpError, Interpolator, Method, SampleSet,
};

const ATOL: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= ATOL
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn json_to_interpolation_to_new_column() -> Result<()> {
    init_logging();
    let doc = r#"{"t":[0,1,2,3,4],"signal":[0.0,0.8,0.9,0.1,-0.7],"site":["a","a","b","b","a"]}"#;
    let mut df = DataFrame::from_json(doc)?;
    assert_eq!(df.shape(), (5, 3));
    assert!(df.is_numeric("t")?);

    let interp = Interpolator::from_frame(&df, "t", "signal", Method::Akima, Extrapolate::Clamp)?;
    let grid: Vec<f64> = (0..=8).map(|i| i as f64 * 0.5).collect();
    let resampled = interp.evaluate_batch(&grid)?;

    // interpolant passes through the original samples
    for (i, &t) in [0.0, 1.0, 2.0, 3.0, 4.0].iter().enumerate() {
        assert!(approx_eq(resampled[(t * 2.0) as usize], df.get(i, "signal")?.as_f64().unwrap()));
    }

    // write the dense signal back into a fresh frame next to its grid
    let mut resampled_df = DataFrame::new();
    resampled_df.add_column(Column::from_f64s("t", grid))?;
    resampled_df.add_column(Column::from_f64s("signal", resampled))?;
    assert_eq!(resampled_df.shape(), (9, 2));

    // and the original frame is still intact for further mutation
    df.drop_column("site")?;
    assert_eq!(df.column_names(), vec!["t", "signal"]);
    Ok(())
}

#[test]
fn csv_ingestion_with_missing_rows_feeds_a_spline() -> Result<()> {
    init_logging();
    // row 2 has a missing y: dropped during sample extraction, not an error
    let text = "x,y\n0.0,0.0\n1.0,\n2.0,4.0\n3.0,9.0\n4.0,16.0\n5.0,25.0\n";
    let df = DataFrame::read_csv(text.as_bytes(), b',', true)?;
    assert_eq!(df.null_counts()[1], ("y".into(), 1));

    let samples = SampleSet::from_frame(&df, "x", "y")?;
    assert_eq!(samples.len(), 5);
    assert_eq!(samples.domain(), (0.0, 5.0));

    let interp = Interpolator::fit(samples, Method::CubicSpline, Extrapolate::Error)?;
    // x² is convex: the spline at 2.5 sits near 6.25, below the chord 6.5
    let y = interp.evaluate(2.5)?;
    assert!(y > 6.0 && y < 6.5, "got {y}");

    // natural spline integral over the domain lands near ∫₀⁵ x² = 41.67
    let integral = interp.integral(0.0, 5.0)?;
    assert!((integral - 125.0 / 3.0).abs() < 1.0, "got {integral}");
    Ok(())
}

#[test]
fn round_trip_then_refit_snapshot() -> Result<()> {
    let df = DataFrame::from_columns(vec![
        Column::from_f64s("x", vec![0.0, 1.0, 2.0, 3.0]),
        Column::from_f64s("y", vec![0.0, 1.0, 4.0, 9.0]),
    ])?;
    let back = DataFrame::from_json(&df.to_json())?;
    assert_eq!(back, df);

    let linear = Interpolator::from_frame(&back, "x", "y", Method::Linear, Extrapolate::Error)?;
    assert!(approx_eq(linear.evaluate(1.5)?, 2.5));

    // replace-on-refit: the old snapshot keeps answering while a new fit
    // over edited data takes its place
    let mut edited = back.clone();
    edited.set(3, "y", rusty_toolbox::Value::Float(0.0))?;
    let refit = Interpolator::from_frame(&edited, "x", "y", Method::Linear, Extrapolate::Error)?;
    assert!(approx_eq(linear.evaluate(3.0)?, 9.0));
    assert!(approx_eq(refit.evaluate(3.0)?, 0.0));
    Ok(())
}

#[test]
fn error_kinds_survive_the_module_boundary() {
    let df = DataFrame::from_columns(vec![
        Column::from_f64s("x", vec![1.0, 1.0, 2.0]),
        Column::from_f64s("y", vec![0.0, 0.0, 1.0]),
    ])
    .unwrap();

    // duplicate abscissa from frame-sourced samples
    assert!(matches!(
        SampleSet::from_frame(&df, "x", "y"),
        Err(InterpError::DuplicateAbscissa(x)) if x == 1.0
    ));

    // frame errors arrive wrapped but still distinguishable
    match SampleSet::from_frame(&df, "missing", "y") {
        Err(InterpError::Frame(rusty_toolbox::FrameError::ColumnNotFound(name))) => {
            assert_eq!(name, "missing");
        }
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }
}

#[test]
fn casted_column_feeds_interpolation() -> Result<()> {
    let df = DataFrame::from_columns(vec![
        Column::from_i64s("x", vec![0, 1, 2, 3, 4]),
        Column::from_i64s("y", vec![0, 1, 4, 9, 16]),
    ])?;
    // integer columns are accepted directly (widened during extraction)
    let interp = Interpolator::from_frame(&df, "x", "y", Method::Polynomial, Extrapolate::Error)?;
    assert!(approx_eq(interp.evaluate(0.5)?, 0.25));

    // explicit cast keeps the same numbers
    let as_float = df.column("y")?.cast(ColumnKind::Float64)?;
    assert_eq!(as_float.as_f64(2)?, Some(4.0));
    Ok(())
}
