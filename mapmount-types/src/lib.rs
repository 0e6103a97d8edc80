//! Small value types shared by the `mapmount` crates: points on the globe (see [`geo`]) and
//! sizes of rendering surfaces (see [`cartesian`]).

pub mod cartesian;
pub mod geo;
