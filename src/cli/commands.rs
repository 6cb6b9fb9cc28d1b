pub mod batch;
pub mod predict;

pub use batch::batch;
pub use predict::predict;
