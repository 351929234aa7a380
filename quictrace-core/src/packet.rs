use std::io::Write;

use crate::color::{AnsiPalette, QuicDirection};
use crate::names::{packet_type_name_long, packet_type_name_short};

// Header flags. LONG_FORM selects the long-header rendering path and the
// long-form type name table.
pub const QUIC_PKT_FLAG_NONE: u8 = 0x00;
pub const QUIC_PKT_FLAG_LONG_FORM: u8 = 0x01;
pub const QUIC_PKT_FLAG_KEY_PHASE: u8 = 0x04;

// Long header packet types
pub const QUIC_PKT_VERSION_NEGOTIATION: u8 = 0x01;
pub const QUIC_PKT_CLIENT_INITIAL: u8 = 0x02;
pub const QUIC_PKT_SERVER_STATELESS_RETRY: u8 = 0x03;
pub const QUIC_PKT_SERVER_CLEARTEXT: u8 = 0x04;
pub const QUIC_PKT_CLIENT_CLEARTEXT: u8 = 0x05;
pub const QUIC_PKT_0RTT_PROTECTED: u8 = 0x06;
pub const QUIC_PKT_1RTT_PROTECTED_K0: u8 = 0x07;
pub const QUIC_PKT_1RTT_PROTECTED_K1: u8 = 0x08;
pub const QUIC_PKT_PUBLIC_RESET: u8 = 0x09;

// Short header packet types
pub const QUIC_PKT_SHORT_01: u8 = 0x01;
pub const QUIC_PKT_SHORT_02: u8 = 0x02;
pub const QUIC_PKT_SHORT_03: u8 = 0x03;

/// Already-parsed packet header, supplied by the protocol engine. The
/// version field is only meaningful when the long-form flag is set.
#[derive(Debug, Clone, Copy)]
pub struct QuicPacketHeader {
    pub packet_type: u8,
    pub flags: u8,
    pub conn_id: u64,
    pub packet_number: u64,
    pub version: u32,
}

impl QuicPacketHeader {
    pub fn is_long_form(&self) -> bool {
        self.flags & QUIC_PKT_FLAG_LONG_FORM != 0
    }

    pub(crate) fn render<W: Write>(
        &self,
        out: &mut W,
        palette: &AnsiPalette,
        dir: QuicDirection,
    ) -> std::io::Result<()> {
        if self.is_long_form() {
            self.render_long(out, palette, dir)
        } else {
            self.render_short(out, palette, dir)
        }
    }

    fn render_long<W: Write>(
        &self,
        out: &mut W,
        palette: &AnsiPalette,
        dir: QuicDirection,
    ) -> std::io::Result<()> {
        writeln!(
            out,
            "{}{}{}(0x{:02x}) CID=0x{:016x} PKN={}{}{} V=0x{:08x}",
            palette.packet_label(dir),
            packet_type_name_long(self.packet_type),
            palette.reset(),
            self.packet_type,
            self.conn_id,
            palette.packet_number(dir),
            self.packet_number,
            palette.reset(),
            self.version,
        )
    }

    fn render_short<W: Write>(
        &self,
        out: &mut W,
        palette: &AnsiPalette,
        dir: QuicDirection,
    ) -> std::io::Result<()> {
        writeln!(
            out,
            "{}{}{}(0x{:02x}) CID=0x{:016x} PKN={}{}{}",
            palette.packet_label(dir),
            packet_type_name_short(self.packet_type),
            palette.reset(),
            self.packet_type,
            self.conn_id,
            palette.packet_number(dir),
            self.packet_number,
            palette.reset(),
        )
    }
}
