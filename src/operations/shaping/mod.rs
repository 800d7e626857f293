mod blanket_from_plasma;

pub use blanket_from_plasma::BlanketFromPlasma;
