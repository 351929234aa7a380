/// Direction of the traced packet or frame, as seen by the local endpoint.
/// Only selects the TX/RX label and the color pair; carries no protocol
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuicDirection {
    Send,
    Recv,
}

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_TIMESTAMP: &str = "\x1b[33m";
const ANSI_SEND_LABEL: &str = "\x1b[1;35m";
const ANSI_RECV_LABEL: &str = "\x1b[1;36m";
const ANSI_SEND_PKT_NUM: &str = "\x1b[38;5;40m";
const ANSI_RECV_PKT_NUM: &str = "\x1b[38;5;51m";

/// ANSI escape selection. When disabled every accessor returns an empty
/// string, so callers can embed the accessors in format strings
/// unconditionally.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AnsiPalette {
    enabled: bool,
}

impl AnsiPalette {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn escape(&self, code: &'static str) -> &'static str {
        if self.enabled {
            code
        } else {
            ""
        }
    }

    pub(crate) fn reset(&self) -> &'static str {
        self.escape(ANSI_RESET)
    }

    pub(crate) fn timestamp(&self) -> &'static str {
        self.escape(ANSI_TIMESTAMP)
    }

    pub(crate) fn packet_label(&self, dir: QuicDirection) -> &'static str {
        self.escape(match dir {
            QuicDirection::Send => ANSI_SEND_LABEL,
            QuicDirection::Recv => ANSI_RECV_LABEL,
        })
    }

    pub(crate) fn frame_label(&self, dir: QuicDirection) -> &'static str {
        self.packet_label(dir)
    }

    pub(crate) fn packet_number(&self, dir: QuicDirection) -> &'static str {
        self.escape(match dir {
            QuicDirection::Send => ANSI_SEND_PKT_NUM,
            QuicDirection::Recv => ANSI_RECV_PKT_NUM,
        })
    }
}
