// Adapters layer: concrete implementations of the domain ports (filesystem,
// route files, coordinate sources, reporting).

pub mod coordinates;
pub mod report;
pub mod reporter;
pub mod route_file;
pub mod storage;
