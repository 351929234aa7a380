use std::io::Write;

use crate::color::{AnsiPalette, QuicDirection};
use crate::names::{app_error_name, frame_type_name, transport_error_name};
use crate::reset::QUIC_STATELESS_RESET_TOKEN_LENGTH;
use crate::utils::{format_hex, TRACE_INDENT};

// Frame type bytes. STREAM and ACK occupy type ranges on the wire; the
// values below are the canonical base bytes, with the per-frame flag bits
// OR-ed back in for display.
pub const QUIC_FRAME_PADDING: u8 = 0x00;
pub const QUIC_FRAME_RST_STREAM: u8 = 0x01;
pub const QUIC_FRAME_CONNECTION_CLOSE: u8 = 0x02;
pub const QUIC_FRAME_MAX_DATA: u8 = 0x04;
pub const QUIC_FRAME_MAX_STREAM_DATA: u8 = 0x05;
pub const QUIC_FRAME_MAX_STREAM_ID: u8 = 0x06;
pub const QUIC_FRAME_PING: u8 = 0x07;
pub const QUIC_FRAME_BLOCKED: u8 = 0x08;
pub const QUIC_FRAME_STREAM_BLOCKED: u8 = 0x09;
pub const QUIC_FRAME_STREAM_ID_BLOCKED: u8 = 0x0a;
pub const QUIC_FRAME_NEW_CONNECTION_ID: u8 = 0x0b;
pub const QUIC_FRAME_STOP_SENDING: u8 = 0x0c;
pub const QUIC_FRAME_ACK: u8 = 0xa0;
pub const QUIC_FRAME_STREAM: u8 = 0xc0;

// STREAM type-byte flag fields
pub(crate) fn stream_fin_bit(flags: u8) -> u8 {
    (flags >> 5) & 0x1
}

pub(crate) fn stream_ss_bits(flags: u8) -> u8 {
    (flags >> 3) & 0x3
}

pub(crate) fn stream_oo_bits(flags: u8) -> u8 {
    (flags >> 1) & 0x3
}

pub(crate) fn stream_d_bit(flags: u8) -> u8 {
    flags & 0x1
}

// ACK type-byte flag fields
pub(crate) fn ack_n_bit(flags: u8) -> u8 {
    (flags >> 4) & 0x1
}

pub(crate) fn ack_ll_bits(flags: u8) -> u8 {
    (flags >> 2) & 0x3
}

pub(crate) fn ack_mm_bits(flags: u8) -> u8 {
    flags & 0x3
}

/// One additional acknowledged range, encoded relative to the previously
/// decoded one: skip `gap + 1` packet numbers downwards, then acknowledge
/// `block_length` packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuicAckBlock {
    pub gap: u32,
    pub block_length: u64,
}

/// Already-parsed frame, supplied by the protocol engine. Closed set of the
/// frame kinds the protocol defines; unstandardized wire values never reach
/// this type.
#[derive(Debug, Clone)]
pub enum QuicFrame {
    Stream {
        flags: u8,
        stream_id: u32,
        fin: bool,
        offset: u64,
        data_length: usize,
    },
    Ack {
        flags: u8,
        largest_ack: u64,
        ack_delay: u32,
        first_ack_block_length: u64,
        blocks: Vec<QuicAckBlock>,
    },
    RstStream {
        stream_id: u32,
        app_error_code: u32,
        final_offset: u64,
    },
    ConnectionClose {
        error_code: u32,
        reason_length: usize,
    },
    MaxData {
        max_data: u64,
    },
    MaxStreamData {
        stream_id: u32,
        max_stream_data: u64,
    },
    MaxStreamId {
        max_stream_id: u32,
    },
    Ping,
    Blocked,
    StreamBlocked {
        stream_id: u32,
    },
    StreamIdBlocked,
    NewConnectionId {
        seq: u16,
        conn_id: u64,
        stateless_reset_token: [u8; QUIC_STATELESS_RESET_TOKEN_LENGTH],
    },
    StopSending {
        stream_id: u32,
        app_error_code: u32,
    },
    Padding {
        length: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuicAckBlockRange {
    pub(crate) gap: u32,
    pub(crate) block_length: u64,
    /// `[high, low]` closed interval; `None` for a zero-length block, which
    /// still moves the cursor but acknowledges nothing displayable.
    pub(crate) range: Option<(u64, u64)>,
}

/// Rebuilds the acknowledged packet-number intervals from the compact
/// gap/length encoding. Returns the first interval `[largest_ack, min_ack]`
/// and one entry per additional block, in wire order.
///
/// No bounds are enforced: a malformed block length wraps the cursor around
/// u64 instead of failing, matching the reference decoder's output on such
/// input.
pub(crate) fn reconstruct_ack_ranges(
    largest_ack: u64,
    first_ack_block_length: u64,
    blocks: &[QuicAckBlock],
) -> ((u64, u64), Vec<QuicAckBlockRange>) {
    let mut min_ack = largest_ack.wrapping_sub(first_ack_block_length);
    let first_range = (largest_ack, min_ack);

    let mut cursor = min_ack;
    let mut ranges = Vec::with_capacity(blocks.len());
    for blk in blocks {
        // The gap plus the boundary packet number it represents
        cursor = cursor.wrapping_sub(blk.gap as u64 + 1);
        if blk.block_length == 0 {
            ranges.push(QuicAckBlockRange {
                gap: blk.gap,
                block_length: 0,
                range: None,
            });
            continue;
        }
        min_ack = cursor.wrapping_sub(blk.block_length - 1);
        ranges.push(QuicAckBlockRange {
            gap: blk.gap,
            block_length: blk.block_length,
            range: Some((cursor, min_ack)),
        });
        cursor = min_ack;
    }

    (first_range, ranges)
}

impl QuicFrame {
    /// Canonical numeric type byte, without per-frame flag bits.
    pub fn wire_type(&self) -> u8 {
        match self {
            QuicFrame::Padding { .. } => QUIC_FRAME_PADDING,
            QuicFrame::RstStream { .. } => QUIC_FRAME_RST_STREAM,
            QuicFrame::ConnectionClose { .. } => QUIC_FRAME_CONNECTION_CLOSE,
            QuicFrame::MaxData { .. } => QUIC_FRAME_MAX_DATA,
            QuicFrame::MaxStreamData { .. } => QUIC_FRAME_MAX_STREAM_DATA,
            QuicFrame::MaxStreamId { .. } => QUIC_FRAME_MAX_STREAM_ID,
            QuicFrame::Ping => QUIC_FRAME_PING,
            QuicFrame::Blocked => QUIC_FRAME_BLOCKED,
            QuicFrame::StreamBlocked { .. } => QUIC_FRAME_STREAM_BLOCKED,
            QuicFrame::StreamIdBlocked => QUIC_FRAME_STREAM_ID_BLOCKED,
            QuicFrame::NewConnectionId { .. } => QUIC_FRAME_NEW_CONNECTION_ID,
            QuicFrame::StopSending { .. } => QUIC_FRAME_STOP_SENDING,
            QuicFrame::Ack { .. } => QUIC_FRAME_ACK,
            QuicFrame::Stream { .. } => QUIC_FRAME_STREAM,
        }
    }

    pub(crate) fn render<W: Write>(
        &self,
        out: &mut W,
        palette: &AnsiPalette,
        dir: QuicDirection,
    ) -> std::io::Result<()> {
        let frame_type = self.wire_type();
        write!(
            out,
            "{}{}{}",
            palette.frame_label(dir),
            frame_type_name(frame_type),
            palette.reset(),
        )?;
        self.render_type_byte(out, frame_type)?;
        self.render_details(out)
    }

    // The header line ends with the reconstructed type byte; STREAM and ACK
    // also show their flag-bit decomposition.
    fn render_type_byte<W: Write>(&self, out: &mut W, frame_type: u8) -> std::io::Result<()> {
        match self {
            QuicFrame::Stream { flags, .. } => writeln!(
                out,
                "(0x{:02x}) F=0x{:02x} SS=0x{:02x} OO=0x{:02x} D=0x{:02x}",
                frame_type | flags,
                stream_fin_bit(*flags),
                stream_ss_bits(*flags),
                stream_oo_bits(*flags),
                stream_d_bit(*flags),
            ),
            QuicFrame::Ack { flags, .. } => writeln!(
                out,
                "(0x{:02x}) N=0x{:02x} LL=0x{:02x} MM=0x{:02x}",
                frame_type | flags,
                ack_n_bit(*flags),
                ack_ll_bits(*flags),
                ack_mm_bits(*flags),
            ),
            _ => writeln!(out, "(0x{frame_type:02x})"),
        }
    }

    fn render_details<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self {
            QuicFrame::Stream {
                stream_id,
                fin,
                offset,
                data_length,
                ..
            } => writeln!(
                out,
                "{TRACE_INDENT}stream_id=0x{:08x} fin={} offset={} data_length={}",
                stream_id, *fin as u8, offset, data_length,
            ),
            QuicFrame::Ack {
                largest_ack,
                ack_delay,
                first_ack_block_length,
                blocks,
                ..
            } => {
                writeln!(
                    out,
                    "{TRACE_INDENT}num_blks={} largest_ack={} ack_delay={}",
                    blocks.len(),
                    largest_ack,
                    ack_delay,
                )?;
                let (first_range, ranges) =
                    reconstruct_ack_ranges(*largest_ack, *first_ack_block_length, blocks);
                writeln!(
                    out,
                    "{TRACE_INDENT}first_ack_block_length={}; [{}..{}]",
                    first_ack_block_length, first_range.0, first_range.1,
                )?;
                for blk in &ranges {
                    match blk.range {
                        Some((high, low)) => writeln!(
                            out,
                            "{TRACE_INDENT}gap={} ack_block_length={}; [{}..{}]",
                            blk.gap, blk.block_length, high, low,
                        )?,
                        None => writeln!(
                            out,
                            "{TRACE_INDENT}gap={} ack_block_length={}",
                            blk.gap, blk.block_length,
                        )?,
                    }
                }
                Ok(())
            }
            QuicFrame::RstStream {
                stream_id,
                app_error_code,
                final_offset,
            } => writeln!(
                out,
                "{TRACE_INDENT}stream_id=0x{:08x} app_error_code={}(0x{:08x}) final_offset={}",
                stream_id,
                app_error_name(*app_error_code),
                app_error_code,
                final_offset,
            ),
            QuicFrame::ConnectionClose {
                error_code,
                reason_length,
            } => writeln!(
                out,
                "{TRACE_INDENT}error_code={}(0x{:08x}) reason_length={}",
                transport_error_name(*error_code),
                error_code,
                reason_length,
            ),
            QuicFrame::MaxData { max_data } => {
                writeln!(out, "{TRACE_INDENT}max_data={max_data}")
            }
            QuicFrame::MaxStreamData {
                stream_id,
                max_stream_data,
            } => writeln!(
                out,
                "{TRACE_INDENT}stream_id=0x{stream_id:08x} max_stream_data={max_stream_data}",
            ),
            QuicFrame::MaxStreamId { max_stream_id } => {
                writeln!(out, "{TRACE_INDENT}max_stream_id=0x{max_stream_id:08x}")
            }
            QuicFrame::StreamBlocked { stream_id } => {
                writeln!(out, "{TRACE_INDENT}stream_id=0x{stream_id:08x}")
            }
            QuicFrame::NewConnectionId {
                seq,
                conn_id,
                stateless_reset_token,
            } => writeln!(
                out,
                "{TRACE_INDENT}seq={} conn_id=0x{:016x} stateless_reset_token={}",
                seq,
                conn_id,
                format_hex(stateless_reset_token),
            ),
            QuicFrame::StopSending {
                stream_id,
                app_error_code,
            } => writeln!(
                out,
                "{TRACE_INDENT}stream_id=0x{:08x} app_error_code={}(0x{:08x})",
                stream_id,
                app_error_name(*app_error_code),
                app_error_code,
            ),
            QuicFrame::Padding { length } => {
                writeln!(out, "{TRACE_INDENT}length={length}")
            }
            QuicFrame::Ping | QuicFrame::Blocked | QuicFrame::StreamIdBlocked => Ok(()),
        }
    }
}
