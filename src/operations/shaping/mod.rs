mod extrude;
mod holes;
mod inset;
mod solidify;
mod wireframe;

pub use extrude::Extrude;
pub use holes::Holes;
pub use inset::Inset;
pub use solidify::Solidify;
pub use wireframe::Wireframe;
