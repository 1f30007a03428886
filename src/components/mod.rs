pub mod interpolate;
pub mod square;
pub mod stroke;
