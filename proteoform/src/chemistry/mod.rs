mod element;
#[macro_use]
mod formula;
mod mass_mode;
mod pro_forma;

pub use element::*;
pub use formula::*;
pub use mass_mode::*;
