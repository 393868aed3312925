//! 2D-Ansichten des Vermessungsgraphen: Projektion und Space-Schnappschuss.

pub mod projection;
pub mod space;

pub use projection::Projection2D;
pub use space::Space;
