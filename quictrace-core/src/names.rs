//! Numeric-code to display-string tables. Every lookup is total: wire
//! values that are not (yet) standardized fall back to "UNKNOWN".

use crate::frame::{
    QUIC_FRAME_ACK, QUIC_FRAME_BLOCKED, QUIC_FRAME_CONNECTION_CLOSE, QUIC_FRAME_MAX_DATA,
    QUIC_FRAME_MAX_STREAM_DATA, QUIC_FRAME_MAX_STREAM_ID, QUIC_FRAME_NEW_CONNECTION_ID,
    QUIC_FRAME_PADDING, QUIC_FRAME_PING, QUIC_FRAME_RST_STREAM, QUIC_FRAME_STOP_SENDING,
    QUIC_FRAME_STREAM, QUIC_FRAME_STREAM_BLOCKED, QUIC_FRAME_STREAM_ID_BLOCKED,
};
use crate::packet::{
    QUIC_PKT_0RTT_PROTECTED, QUIC_PKT_1RTT_PROTECTED_K0, QUIC_PKT_1RTT_PROTECTED_K1,
    QUIC_PKT_CLIENT_CLEARTEXT, QUIC_PKT_CLIENT_INITIAL, QUIC_PKT_PUBLIC_RESET,
    QUIC_PKT_SERVER_CLEARTEXT, QUIC_PKT_SERVER_STATELESS_RETRY, QUIC_PKT_SHORT_01,
    QUIC_PKT_SHORT_02, QUIC_PKT_SHORT_03, QUIC_PKT_VERSION_NEGOTIATION,
};

// Transport error codes
pub const QUIC_NO_ERROR: u32 = 0x80000000;
pub const QUIC_INTERNAL_ERROR: u32 = 0x80000001;
pub const QUIC_FLOW_CONTROL_ERROR: u32 = 0x80000003;
pub const QUIC_STREAM_ID_ERROR: u32 = 0x80000004;
pub const QUIC_STREAM_STATE_ERROR: u32 = 0x80000005;
pub const QUIC_FINAL_OFFSET_ERROR: u32 = 0x80000006;
pub const QUIC_FRAME_FORMAT_ERROR: u32 = 0x80000007;
pub const QUIC_TRANSPORT_PARAMETER_ERROR: u32 = 0x80000008;
pub const QUIC_VERSION_NEGOTIATION_ERROR: u32 = 0x80000009;
pub const QUIC_PROTOCOL_VIOLATION: u32 = 0x8000000a;

// FRAME_ERROR carries the offending frame type in its low byte
const QUIC_FRAME_ERROR_BASE: u32 = 0x80000100;
const QUIC_FRAME_ERROR_LAST: u32 = 0x800001ff;

// Application error codes
pub const QUIC_APP_STOPPING: u32 = 0x00000000;

pub(crate) fn packet_type_name_long(packet_type: u8) -> &'static str {
    match packet_type {
        QUIC_PKT_VERSION_NEGOTIATION => "Version Negotiation",
        QUIC_PKT_CLIENT_INITIAL => "Client Initial",
        QUIC_PKT_SERVER_STATELESS_RETRY => "Server Stateless Retry",
        QUIC_PKT_SERVER_CLEARTEXT => "Server Cleartext",
        QUIC_PKT_CLIENT_CLEARTEXT => "Client Cleartext",
        QUIC_PKT_0RTT_PROTECTED => "0-RTT Protected",
        QUIC_PKT_1RTT_PROTECTED_K0 => "1-RTT Protected (key phase 0)",
        QUIC_PKT_1RTT_PROTECTED_K1 => "1-RTT Protected (key phase 1)",
        QUIC_PKT_PUBLIC_RESET => "Public Reset",
        _ => "UNKNOWN",
    }
}

pub(crate) fn packet_type_name_short(packet_type: u8) -> &'static str {
    match packet_type {
        QUIC_PKT_SHORT_01 => "Short 01",
        QUIC_PKT_SHORT_02 => "Short 02",
        QUIC_PKT_SHORT_03 => "Short 03",
        _ => "UNKNOWN",
    }
}

pub(crate) fn frame_type_name(frame_type: u8) -> &'static str {
    match frame_type {
        QUIC_FRAME_PADDING => "PADDING",
        QUIC_FRAME_RST_STREAM => "RST_STREAM",
        QUIC_FRAME_CONNECTION_CLOSE => "CONNECTION_CLOSE",
        QUIC_FRAME_MAX_DATA => "MAX_DATA",
        QUIC_FRAME_MAX_STREAM_DATA => "MAX_STREAM_DATA",
        QUIC_FRAME_MAX_STREAM_ID => "MAX_STREAM_ID",
        QUIC_FRAME_PING => "PING",
        QUIC_FRAME_BLOCKED => "BLOCKED",
        QUIC_FRAME_STREAM_BLOCKED => "STREAM_BLOCKED",
        QUIC_FRAME_STREAM_ID_BLOCKED => "STREAM_ID_BLOCKED",
        QUIC_FRAME_NEW_CONNECTION_ID => "NEW_CONNECTION_ID",
        QUIC_FRAME_STOP_SENDING => "STOP_SENDING",
        QUIC_FRAME_ACK => "ACK",
        QUIC_FRAME_STREAM => "STREAM",
        _ => "UNKNOWN",
    }
}

pub(crate) fn transport_error_name(error_code: u32) -> &'static str {
    match error_code {
        QUIC_NO_ERROR => "NO_ERROR",
        QUIC_INTERNAL_ERROR => "INTERNAL_ERROR",
        QUIC_FLOW_CONTROL_ERROR => "FLOW_CONTROL_ERROR",
        QUIC_STREAM_ID_ERROR => "STREAM_ID_ERROR",
        QUIC_STREAM_STATE_ERROR => "STREAM_STATE_ERROR",
        QUIC_FINAL_OFFSET_ERROR => "FINAL_OFFSET_ERROR",
        QUIC_FRAME_FORMAT_ERROR => "FRAME_FORMAT_ERROR",
        QUIC_TRANSPORT_PARAMETER_ERROR => "TRANSPORT_PARAMETER_ERROR",
        QUIC_VERSION_NEGOTIATION_ERROR => "VERSION_NEGOTIATION_ERROR",
        QUIC_PROTOCOL_VIOLATION => "PROTOCOL_VIOLATION",
        _ => {
            // Range check only after the exact matches have failed
            if (QUIC_FRAME_ERROR_BASE..=QUIC_FRAME_ERROR_LAST).contains(&error_code) {
                "FRAME_ERROR"
            } else {
                "UNKNOWN"
            }
        }
    }
}

pub(crate) fn app_error_name(app_error_code: u32) -> &'static str {
    match app_error_code {
        QUIC_APP_STOPPING => "STOPPING",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_packet_types_all_named() {
        for packet_type in QUIC_PKT_VERSION_NEGOTIATION..=QUIC_PKT_PUBLIC_RESET {
            assert_ne!(packet_type_name_long(packet_type), "UNKNOWN");
        }
        assert_eq!(packet_type_name_long(0x00), "UNKNOWN");
        assert_eq!(packet_type_name_long(0x0a), "UNKNOWN");
    }

    #[test]
    fn test_short_packet_types_all_named() {
        for packet_type in QUIC_PKT_SHORT_01..=QUIC_PKT_SHORT_03 {
            assert_ne!(packet_type_name_short(packet_type), "UNKNOWN");
        }
        assert_eq!(packet_type_name_short(0x04), "UNKNOWN");
    }

    #[test]
    fn test_frame_types_all_named() {
        let known = [
            QUIC_FRAME_PADDING,
            QUIC_FRAME_RST_STREAM,
            QUIC_FRAME_CONNECTION_CLOSE,
            QUIC_FRAME_MAX_DATA,
            QUIC_FRAME_MAX_STREAM_DATA,
            QUIC_FRAME_MAX_STREAM_ID,
            QUIC_FRAME_PING,
            QUIC_FRAME_BLOCKED,
            QUIC_FRAME_STREAM_BLOCKED,
            QUIC_FRAME_STREAM_ID_BLOCKED,
            QUIC_FRAME_NEW_CONNECTION_ID,
            QUIC_FRAME_STOP_SENDING,
            QUIC_FRAME_ACK,
            QUIC_FRAME_STREAM,
        ];
        for frame_type in known {
            assert_ne!(frame_type_name(frame_type), "UNKNOWN");
        }
        assert_eq!(frame_type_name(0x03), "UNKNOWN");
        assert_eq!(frame_type_name(0xff), "UNKNOWN");
    }

    #[test]
    fn test_transport_error_names() {
        let test_cases = vec![
            (QUIC_NO_ERROR, "NO_ERROR"),
            (QUIC_INTERNAL_ERROR, "INTERNAL_ERROR"),
            (QUIC_FLOW_CONTROL_ERROR, "FLOW_CONTROL_ERROR"),
            (QUIC_STREAM_ID_ERROR, "STREAM_ID_ERROR"),
            (QUIC_STREAM_STATE_ERROR, "STREAM_STATE_ERROR"),
            (QUIC_FINAL_OFFSET_ERROR, "FINAL_OFFSET_ERROR"),
            (QUIC_FRAME_FORMAT_ERROR, "FRAME_FORMAT_ERROR"),
            (QUIC_TRANSPORT_PARAMETER_ERROR, "TRANSPORT_PARAMETER_ERROR"),
            (QUIC_VERSION_NEGOTIATION_ERROR, "VERSION_NEGOTIATION_ERROR"),
            (QUIC_PROTOCOL_VIOLATION, "PROTOCOL_VIOLATION"),
        ];

        for (code, expected) in test_cases {
            assert_eq!(transport_error_name(code), expected);
        }
    }

    #[test]
    fn test_frame_error_range_boundaries() {
        assert_eq!(transport_error_name(0x80000100), "FRAME_ERROR");
        assert_eq!(transport_error_name(0x800001ff), "FRAME_ERROR");
        assert_eq!(transport_error_name(0x800000ff), "UNKNOWN");
        assert_eq!(transport_error_name(0x80000200), "UNKNOWN");
    }

    #[test]
    fn test_app_error_names() {
        assert_eq!(app_error_name(QUIC_APP_STOPPING), "STOPPING");
        assert_eq!(app_error_name(0x1), "UNKNOWN");
    }
}
