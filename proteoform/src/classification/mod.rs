mod level;
mod raw;
mod scanner;
mod structured;

pub use level::*;
pub use raw::*;
pub use scanner::*;
pub use structured::classify_term;
