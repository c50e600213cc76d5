mod make_cube;
mod make_cylinder;
mod make_grid;

pub use make_cube::MakeCube;
pub use make_cylinder::MakeCylinder;
pub use make_grid::MakeGrid;
