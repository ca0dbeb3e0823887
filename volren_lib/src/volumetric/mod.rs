mod gradient;
pub mod parse;
mod vol_reader;
mod volume_field;

pub use gradient::compute_gradient;
pub use vol_reader::DataSource;
pub use volume_field::VolumeField;
