pub mod geometry;
pub mod orbit;
pub mod path;
