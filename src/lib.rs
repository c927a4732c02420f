//! Columnar DataFrame and 1-D interpolation core.
//!
//! Two tightly related facilities intended to sit behind a scripting-host
//! binding layer:
//!
//! * [`frame`] — a typed columnar container with JSON/CSV import/export,
//!   structural row/column operations, and descriptive statistics.
//! * [`interp`] — an interpolation engine that fits linear, polynomial,
//!   cubic-spline, or Akima models to (x, y) samples drawn from two frame
//!   columns (or raw slices) and evaluates them with an explicit
//!   extrapolation policy.
//!
//! ```
//! use rusty_toolbox::{DataFrame, Extrapolate, Interpolator, Method};
//!
//! let df = DataFrame::from_json(r#"{"x":[0,1,2,3],"y":[0,1,4,9]}"#)?;
//! let interp = Interpolator::from_frame(&df, "x", "y", Method::CubicSpline, Extrapolate::Error)?;
//! let y = interp.evaluate(1.5)?;
//! assert!(y > 1.0 && y < 2.5);
//! # Ok::<(), rusty_toolbox::InterpError>(())
//! ```
//!
//! Every fallible operation returns a typed error ([`FrameError`] /
//! [`InterpError`]); the crate never logs in place of returning one and
//! never coerces ambiguous input.

pub mod frame;
pub mod interp;

pub use frame::{Column, ColumnKind, DataFrame, FrameError, Row, Value};
pub use interp::{Extrapolate, InterpError, Interpolator, Method, SampleSet};
