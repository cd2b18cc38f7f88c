//! The compile driver: wires the parse -> preprocess -> analyze -> transform
//! -> lower pipeline together into the single [`compile`] entry point.

mod driver;

pub use driver::compile;
