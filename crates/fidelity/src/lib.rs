#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use fidelity_image as image;

#[doc(inline)]
pub use fidelity_imgproc as imgproc;

#[doc(inline)]
pub use fidelity_io as io;
