//! Output encoders (PPM, PNG).

mod png;
mod ppm;

pub use self::png::PngEncoder;
pub use self::ppm::PpmEncoder;
