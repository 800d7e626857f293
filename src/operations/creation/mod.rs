mod make_plasma;
mod make_shield_cylinder;

pub use make_plasma::MakePlasma;
pub use make_shield_cylinder::MakeShieldCylinder;
