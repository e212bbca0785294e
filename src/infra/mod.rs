mod host;
mod palette;

pub use host::*;
pub use palette::*;
