pub mod ir;
pub mod name;

pub use ir::*;
pub use name::*;
