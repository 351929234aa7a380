use std::io::{self, Write};
use std::time::Instant;
use tracing::warn;

use crate::color::{AnsiPalette, QuicDirection};
use crate::frame::QuicFrame;
use crate::packet::QuicPacketHeader;
use crate::reset::QuicStatelessReset;
use crate::transport_parameters::QuicTransportParameters;
use crate::utils::{hexdump, TRACE_INDENT};

/// Status code every callback returns to the protocol engine. The tracer is
/// best-effort and never asks the engine to abort.
pub const QUIC_TRACE_CONTINUE: i32 = 0;

const DEFAULT_COLOR_OUTPUT: bool = false;

#[derive(Clone, Default)]
pub struct QuicTracerConfig {
    color_output: Option<bool>,
}

impl QuicTracerConfig {
    pub fn set_color_output(&mut self, color_output: bool) {
        self.color_output = Some(color_output);
    }

    pub(crate) fn get_color_output(&self) -> bool {
        self.color_output.unwrap_or(DEFAULT_COLOR_OUTPUT)
    }
}

/// Trace formatter for one connection. Owns its output sink, color choice
/// and clock epoch; the protocol engine drives it through the `on_*`
/// callbacks and must do so from a single thread.
pub struct QuicTracer<W: Write> {
    sink: W,
    palette: AnsiPalette,
    epoch: Instant,
}

impl QuicTracer<io::Stderr> {
    pub fn new(config: &QuicTracerConfig) -> Self {
        Self::with_sink(config, io::stderr())
    }
}

impl<W: Write> QuicTracer<W> {
    pub fn with_sink(config: &QuicTracerConfig, sink: W) -> Self {
        Self {
            sink,
            palette: AnsiPalette::new(config.get_color_output()),
            epoch: Instant::now(),
        }
    }

    pub fn set_color_output(&mut self, color_output: bool) {
        self.palette.set_enabled(color_output);
    }

    /// Restarts the elapsed-time prefix from zero.
    pub fn reset_timestamp(&mut self) {
        self.epoch = Instant::now();
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    pub fn on_send_packet(&mut self, hd: &QuicPacketHeader) -> i32 {
        let res = self.write_packet(hd, QuicDirection::Send);
        report("send packet", res)
    }

    pub fn on_recv_packet(&mut self, hd: &QuicPacketHeader) -> i32 {
        let res = self.write_packet(hd, QuicDirection::Recv);
        report("recv packet", res)
    }

    pub fn on_send_frame(&mut self, _hd: &QuicPacketHeader, frame: &QuicFrame) -> i32 {
        let res = self.write_frame(frame, QuicDirection::Send);
        report("send frame", res)
    }

    pub fn on_recv_frame(&mut self, _hd: &QuicPacketHeader, frame: &QuicFrame) -> i32 {
        let res = self.write_frame(frame, QuicDirection::Recv);
        report("recv frame", res)
    }

    pub fn on_handshake_completed(&mut self) -> i32 {
        let res = (|| {
            self.write_timestamp()?;
            writeln!(self.sink, "QUIC handshake has completed")
        })();
        report("handshake completed", res)
    }

    pub fn on_recv_version_negotiation(
        &mut self,
        _hd: &QuicPacketHeader,
        offered_versions: &[u32],
    ) -> i32 {
        let res = (|| {
            for version in offered_versions {
                writeln!(self.sink, "{TRACE_INDENT}version=0x{version:08x}")?;
            }
            Ok(())
        })();
        report("version negotiation", res)
    }

    pub fn on_recv_stateless_reset(
        &mut self,
        _hd: &QuicPacketHeader,
        reset: &QuicStatelessReset,
    ) -> i32 {
        report("stateless reset", reset.render(&mut self.sink))
    }

    pub fn print_transport_params(&mut self, params: &QuicTransportParameters) -> i32 {
        report("transport params", params.render(&mut self.sink))
    }

    pub fn print_stream_data(&mut self, stream_id: u32, data: &[u8]) -> i32 {
        let res = (|| {
            writeln!(
                self.sink,
                "{TRACE_INDENT}ordered STREAM data stream_id=0x{stream_id:08x}"
            )?;
            hexdump(&mut self.sink, data)
        })();
        report("stream data", res)
    }

    fn write_packet(&mut self, hd: &QuicPacketHeader, dir: QuicDirection) -> io::Result<()> {
        self.write_timestamp()?;
        match dir {
            QuicDirection::Send => write!(self.sink, "TX ")?,
            QuicDirection::Recv => write!(self.sink, "RX ")?,
        }
        hd.render(&mut self.sink, &self.palette, dir)
    }

    fn write_frame(&mut self, frame: &QuicFrame, dir: QuicDirection) -> io::Result<()> {
        write!(self.sink, "{TRACE_INDENT}")?;
        frame.render(&mut self.sink, &self.palette, dir)
    }

    fn write_timestamp(&mut self) -> io::Result<()> {
        let micros = self.epoch.elapsed().as_micros() as i64;
        write!(
            self.sink,
            "{}t={}.{:06}{} ",
            self.palette.timestamp(),
            micros / 1_000_000,
            micros % 1_000_000,
            self.palette.reset(),
        )
    }
}

// A failing sink degrades the trace, never the connection.
fn report(context: &str, res: io::Result<()>) -> i32 {
    if let Err(err) = res {
        warn!("Failed to write {} trace: {}", context, err);
    }
    QUIC_TRACE_CONTINUE
}
