mod directory;
mod routes;

pub use directory::*;
pub use routes::*;
