//! Library components of the catalog CLI: logging setup, the CSV row
//! source and text rendering.

pub mod logging;
pub mod render;
pub mod source;
