//! Assembler tests
//!
//! Block sequences rendered into in-memory documents, checked node by node.

mod ordering;
mod report;
mod skipping;
mod totality;
