mod center_column;
mod lofted;

pub use center_column::{CenterColumnShield, ShieldCylinder};
pub use lofted::{LayerPlan, LoftedLayers, ShellPlan};
