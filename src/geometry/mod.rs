mod curve;
mod equatorial;
mod plasma;
mod profile;

pub use curve::{Curve, CurveDomain};
pub use equatorial::EquatorialGeometry;
pub use plasma::PlasmaBoundary;
pub use profile::Profile;
