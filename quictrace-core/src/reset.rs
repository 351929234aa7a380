use std::io::Write;

use crate::utils::{format_hex, hexdump, TRACE_INDENT};

pub const QUIC_STATELESS_RESET_TOKEN_LENGTH: usize = 16;

/// Already-parsed stateless reset, supplied by the protocol engine: the
/// authenticating token plus whatever random padding filled the rest of the
/// datagram.
#[derive(Debug, Clone)]
pub struct QuicStatelessReset {
    pub stateless_reset_token: [u8; QUIC_STATELESS_RESET_TOKEN_LENGTH],
    pub rand: Vec<u8>,
}

impl QuicStatelessReset {
    pub(crate) fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{TRACE_INDENT}; Stateless Reset")?;
        writeln!(
            out,
            "{TRACE_INDENT}stateless_reset_token={} randlen={}",
            format_hex(&self.stateless_reset_token),
            self.rand.len(),
        )?;
        hexdump(out, &self.rand)
    }
}
