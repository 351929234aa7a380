use std::io::Write;

use crate::reset::QUIC_STATELESS_RESET_TOKEN_LENGTH;
use crate::utils::{format_hex, TRACE_INDENT};

/// Handshake message the transport parameters arrived in. Selects the
/// context-specific lines and whether the stateless-reset token is shown.
#[derive(Debug, Clone)]
pub enum QuicHandshakeContext {
    ClientHello {
        negotiated_version: u32,
        initial_version: u32,
    },
    EncryptedExtensions {
        supported_versions: Vec<u32>,
    },
    NewSessionTicket,
}

/// Already-parsed transport parameters, supplied by the protocol engine.
#[derive(Debug, Clone)]
pub struct QuicTransportParameters {
    pub context: QuicHandshakeContext,
    pub initial_max_stream_data: u32,
    pub initial_max_data: u32,
    pub initial_max_stream_id: u32,
    pub idle_timeout: u16,
    pub omit_connection_id: bool,
    pub max_packet_size: u16,
    pub stateless_reset_token: [u8; QUIC_STATELESS_RESET_TOKEN_LENGTH],
}

impl QuicTransportParameters {
    pub(crate) fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match &self.context {
            QuicHandshakeContext::ClientHello {
                negotiated_version,
                initial_version,
            } => {
                writeln!(
                    out,
                    "{TRACE_INDENT}; negotiated_version=0x{negotiated_version:08x}"
                )?;
                writeln!(
                    out,
                    "{TRACE_INDENT}; initial_version=0x{initial_version:08x}"
                )?;
            }
            QuicHandshakeContext::EncryptedExtensions { supported_versions } => {
                for (i, version) in supported_versions.iter().enumerate() {
                    writeln!(out, "{TRACE_INDENT}; supported_version[{i}]=0x{version:08x}")?;
                }
            }
            QuicHandshakeContext::NewSessionTicket => {}
        }

        writeln!(
            out,
            "{TRACE_INDENT}; initial_max_stream_data={}",
            self.initial_max_stream_data
        )?;
        writeln!(
            out,
            "{TRACE_INDENT}; initial_max_data={}",
            self.initial_max_data
        )?;
        writeln!(
            out,
            "{TRACE_INDENT}; initial_max_stream_id={}",
            self.initial_max_stream_id
        )?;
        writeln!(out, "{TRACE_INDENT}; idle_timeout={}", self.idle_timeout)?;
        writeln!(
            out,
            "{TRACE_INDENT}; omit_connection_id={}",
            self.omit_connection_id as u8
        )?;
        writeln!(
            out,
            "{TRACE_INDENT}; max_packet_size={}",
            self.max_packet_size
        )?;

        // The token only travels server-to-client
        match self.context {
            QuicHandshakeContext::EncryptedExtensions { .. }
            | QuicHandshakeContext::NewSessionTicket => {
                writeln!(
                    out,
                    "{TRACE_INDENT}; stateless_reset_token={}",
                    format_hex(&self.stateless_reset_token)
                )?;
            }
            QuicHandshakeContext::ClientHello { .. } => {}
        }

        Ok(())
    }
}
