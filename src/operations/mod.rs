pub mod boolean;
pub mod creation;
pub mod layering;
pub mod shaping;
