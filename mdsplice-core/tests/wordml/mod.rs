//! WordprocessingML tests
//!
//! Fixture templates spliced with fixture reports, checked through the XML.

mod splice;
