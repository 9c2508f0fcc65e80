mod places;

pub use places::*;
