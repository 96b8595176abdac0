//! Input drivers: quadrature decoding, position tracking, debouncing and
//! the GPIO control surface built from them

pub mod debounce;
pub mod position;
pub mod quadrature;
pub mod surface;

pub use debounce::{Debouncer, Edge};
pub use position::EncoderPosition;
pub use quadrature::{QuadratureDecoder, Step};
pub use surface::{ControlSurface, SurfaceError, EVENT_QUEUE_LEN};
