//! scene-differ
//!
//! Structural differencing for in-memory 3D scenes. Two scenes that should be
//! semantically identical (for instance the same asset imported through two code
//! paths, or re-imported after a serialization round trip) are walked side by
//! side and every mismatch is collected into a readable report.
//!
//! High-level modules
//! - `config`: comparison settings (float tolerance, channel counts)
//! - `data_structures`: the scene and mesh records being compared
//! - `differ`: the comparison engine and its report accumulator
//! - `report`: report storage and the sinks it can be emitted to
//! - `tolerance`: exact and approximate float equality policies
//!

pub mod config;
pub mod data_structures;
pub mod differ;
pub mod report;
pub mod tolerance;

// Re-exports commonly used types for convenience in downstream code.
pub use config::DifferConfig;
pub use data_structures::mesh::{Color4, MAX_COLOR_SETS, MAX_TEXTURE_COORDS, Mesh, Vec3};
pub use data_structures::scene::Scene;
pub use differ::Differ;
pub use report::{LogSink, Report, ReportSink, WriterSink};
pub use tolerance::Tolerance;
