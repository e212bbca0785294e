mod contrast;
mod select;
mod shell;
mod types;

pub use contrast::*;
pub use select::*;
pub use shell::*;
pub use types::*;
