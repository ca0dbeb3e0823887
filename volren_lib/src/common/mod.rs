mod histogram;
mod value_range;

pub use histogram::Histogram;
pub use value_range::ValueRange;
