//! Interpolation engine: validated samples in, fitted immutable models out.
//!
//! ```text
//!   DataFrame columns (or raw slices)
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  SampleSet    │  pair, drop missing, sort, reject duplicate x
//!   └──────────────┘
//!        │  Interpolator::fit(method, policy)
//!        ▼
//!   ┌──────────────┐
//!   │ FittedModel   │  segment / polynomial coefficients, immutable
//!   └──────────────┘
//!        │
//!        ▼
//!   evaluate · evaluate_batch · derivative · integral
//! ```

mod akima;
pub mod error;
mod interpolator;
mod model;
mod polynomial;
pub mod sample;
mod spline;

pub use error::InterpError;
pub use interpolator::{Extrapolate, Interpolator, Method};
pub use sample::SampleSet;
