//! Transfer function control points
//!
//! A fixed row of slots filled from the live point picked on the histogram chart.

mod transfer_function;

pub use transfer_function::{ControlPoint, LivePoint, Slot, TransferFunctionModel};
