mod trim;

pub use trim::{validate_cut_shapes, TrimStage};
