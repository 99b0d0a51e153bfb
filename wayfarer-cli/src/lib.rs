mod graph_loader;
mod summary;

pub use graph_loader::*;
pub use summary::*;
