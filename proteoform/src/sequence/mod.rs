mod amino_acid;
mod descriptor;
mod term;

pub use amino_acid::*;
pub use descriptor::*;
pub use term::*;
