//! Format implementations
//!
//! Template formats read and write [`crate::ir::nodes::Document`]s. `wordml` is the working
//! format; `treeviz` is an outline for inspection.

pub mod icons;
pub mod treeviz;
pub mod wordml;

pub use treeviz::TreevizFormat;
pub use wordml::WordmlFormat;
