//! Columnar data layer: typed columns, the DataFrame container, and its
//! document formats.
//!
//! Architecture:
//! ```text
//!   .json / .csv document
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ json / csv    │  parse + per-column kind inference
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  DataFrame    │  Vec<Column>, shared row count
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ stats / rows  │  descriptive statistics, filtering, null handling
//!   └──────────────┘
//! ```

pub mod column;
mod csv;
pub mod error;
#[allow(clippy::module_inception)]
pub mod frame;
mod json;
mod stats;

pub use column::{Column, ColumnKind, Value};
pub use error::FrameError;
pub use frame::{DataFrame, Row};
