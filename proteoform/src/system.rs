//! The unit system used for all masses in this crate, all masses are [`uom`] quantities.

pub use uom::si::f64::Mass;
pub use uom::si::mass::dalton;

/// Annotate the given number as being in Da
pub fn da(v: f64) -> Mass {
    Mass::new::<dalton>(v)
}

/// Get the value of the given mass in Da
pub fn in_da(mass: Mass) -> f64 {
    mass.get::<dalton>()
}
