//! Candidate light synthesis from partition regions.
//!
//! Each leaf region becomes one [`Light`]: average luminance `m1/m0`,
//! variance `m2/m0 − (m1/m0)²`, average color from the color planes and a
//! luminance-weighted centroid. Lights are never culled here; hemisphere
//! filtering happens when records are emitted.

mod light;
mod synth;

pub use light::{cmp_energy, sort_ascending, sort_descending, total_energy, Light};
pub use synth::{synthesize, synthesize_all};
