// Re-export commonly used types and functions
pub mod prelude {
    pub use crate::color::QuicDirection;
    pub use crate::frame::{QuicAckBlock, QuicFrame};
    pub use crate::loss::QuicLossSimulator;
    pub use crate::packet::{QuicPacketHeader, QUIC_PKT_FLAG_LONG_FORM};
    pub use crate::reset::{QuicStatelessReset, QUIC_STATELESS_RESET_TOKEN_LENGTH};
    pub use crate::tracer::{QuicTracer, QuicTracerConfig, QUIC_TRACE_CONTINUE};
    pub use crate::transport_parameters::{QuicHandshakeContext, QuicTransportParameters};
}

// Internal modules
mod color;
pub mod frame;
pub mod loss;
mod names;
pub mod packet;
pub mod reset;
pub mod tracer;
pub mod transport_parameters;
mod utils;

// Re-export prelude for convenience
pub use prelude::*;
