//! Floating-point HDR image buffers and their I/O collaborators.
pub mod hdr;
pub mod io;
pub mod traits;

pub use self::hdr::HdrImage;
pub use self::traits::ImageView;
