//! Report series for the presentation layer.
//!
//! The engine does not draw anything. It hands the emitter the data behind
//! each chart: per-employee totals and means, per-department sums and the
//! overtime/delay scatter.

mod summary;

pub use summary::{DepartmentTotals, EmployeeSeries, ReportSummary, ScatterPoint, summarize};
