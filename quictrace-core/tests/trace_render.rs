use quictrace_core::packet::{QUIC_PKT_CLIENT_INITIAL, QUIC_PKT_FLAG_NONE, QUIC_PKT_SHORT_01};
use quictrace_core::prelude::*;

fn long_header(packet_number: u64) -> QuicPacketHeader {
    QuicPacketHeader {
        packet_type: QUIC_PKT_CLIENT_INITIAL,
        flags: QUIC_PKT_FLAG_LONG_FORM,
        conn_id: 0xcafe,
        packet_number,
        version: 0xff000005,
    }
}

fn short_header(packet_number: u64) -> QuicPacketHeader {
    QuicPacketHeader {
        packet_type: QUIC_PKT_SHORT_01,
        flags: QUIC_PKT_FLAG_NONE,
        conn_id: 0xcafe,
        packet_number,
        version: 0,
    }
}

fn all_frames() -> Vec<QuicFrame> {
    vec![
        QuicFrame::Stream {
            flags: 0x3f,
            stream_id: 1,
            fin: true,
            offset: 100,
            data_length: 200,
        },
        QuicFrame::Ack {
            flags: 0x1f,
            largest_ack: 100,
            ack_delay: 10,
            first_ack_block_length: 10,
            blocks: vec![
                QuicAckBlock {
                    gap: 2,
                    block_length: 5,
                },
                QuicAckBlock {
                    gap: 0,
                    block_length: 0,
                },
            ],
        },
        QuicFrame::RstStream {
            stream_id: 1,
            app_error_code: 0,
            final_offset: 300,
        },
        QuicFrame::ConnectionClose {
            error_code: 0x80000001,
            reason_length: 4,
        },
        QuicFrame::MaxData { max_data: 1 << 20 },
        QuicFrame::MaxStreamData {
            stream_id: 1,
            max_stream_data: 1 << 16,
        },
        QuicFrame::MaxStreamId { max_stream_id: 20 },
        QuicFrame::Ping,
        QuicFrame::Blocked,
        QuicFrame::StreamBlocked { stream_id: 1 },
        QuicFrame::StreamIdBlocked,
        QuicFrame::NewConnectionId {
            seq: 1,
            conn_id: 0xfeed,
            stateless_reset_token: [0x11; QUIC_STATELESS_RESET_TOKEN_LENGTH],
        },
        QuicFrame::StopSending {
            stream_id: 1,
            app_error_code: 7,
        },
        QuicFrame::Padding { length: 120 },
    ]
}

fn replay_everything(color: bool) -> String {
    let mut config = QuicTracerConfig::default();
    config.set_color_output(color);
    let mut tracer = QuicTracer::with_sink(&config, Vec::new());
    tracer.reset_timestamp();

    let hd = long_header(1);
    assert_eq!(tracer.on_send_packet(&hd), QUIC_TRACE_CONTINUE);
    for frame in all_frames() {
        assert_eq!(tracer.on_send_frame(&hd, &frame), QUIC_TRACE_CONTINUE);
    }

    let hd = short_header(2);
    assert_eq!(tracer.on_recv_packet(&hd), QUIC_TRACE_CONTINUE);
    for frame in all_frames() {
        assert_eq!(tracer.on_recv_frame(&hd, &frame), QUIC_TRACE_CONTINUE);
    }

    assert_eq!(tracer.on_handshake_completed(), QUIC_TRACE_CONTINUE);
    assert_eq!(
        tracer.on_recv_version_negotiation(&hd, &[0xff000005, 0x1]),
        QUIC_TRACE_CONTINUE
    );
    assert_eq!(
        tracer.on_recv_stateless_reset(
            &hd,
            &QuicStatelessReset {
                stateless_reset_token: [0x22; QUIC_STATELESS_RESET_TOKEN_LENGTH],
                rand: (0u8..48).collect(),
            }
        ),
        QUIC_TRACE_CONTINUE
    );
    assert_eq!(
        tracer.print_transport_params(&QuicTransportParameters {
            context: QuicHandshakeContext::EncryptedExtensions {
                supported_versions: vec![0xff000005],
            },
            initial_max_stream_data: 1,
            initial_max_data: 2,
            initial_max_stream_id: 3,
            idle_timeout: 4,
            omit_connection_id: true,
            max_packet_size: 1200,
            stateless_reset_token: [0x33; QUIC_STATELESS_RESET_TOKEN_LENGTH],
        }),
        QUIC_TRACE_CONTINUE
    );
    assert_eq!(
        tracer.print_stream_data(9, b"payload bytes"),
        QUIC_TRACE_CONTINUE
    );

    String::from_utf8(tracer.into_sink()).unwrap()
}

#[test]
fn test_full_trace_without_color_has_no_escape_bytes() {
    let text = replay_everything(false);
    assert!(!text.is_empty());
    assert!(!text.bytes().any(|b| b == 0x1b));
}

#[test]
fn test_full_trace_with_color_pairs_every_escape_with_reset() {
    let text = replay_everything(true);

    let opens = text
        .matches('\x1b')
        .count()
        .checked_sub(text.matches("\x1b[0m").count())
        .unwrap();
    assert!(opens > 0);
    assert_eq!(
        opens,
        text.matches("\x1b[0m").count(),
        "each colorized segment must be closed by a reset sequence"
    );

    // Stripping the escapes yields the same trace as the uncolored run,
    // apart from the timestamps
    let mut stripped = text.clone();
    for code in [
        "\x1b[0m",
        "\x1b[33m",
        "\x1b[1;35m",
        "\x1b[1;36m",
        "\x1b[38;5;40m",
        "\x1b[38;5;51m",
    ] {
        stripped = stripped.replace(code, "");
    }
    assert!(!stripped.contains('\x1b'));

    let strip_stamp = |s: &str| {
        s.lines()
            .map(|l| {
                if let Some(rest) = l.strip_prefix("t=") {
                    rest.split_once(' ').map(|(_, tail)| tail).unwrap_or("")
                } else {
                    l
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(
        strip_stamp(&stripped),
        strip_stamp(&replay_everything(false))
    );
}

#[test]
fn test_every_line_is_newline_terminated() {
    let text = replay_everything(false);
    assert!(text.ends_with('\n'));
}

#[test]
fn test_trace_is_ordered_and_prefixed() {
    let text = replay_everything(false);
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("t=") && lines[0].contains("TX "));
    // 14 frames follow the TX packet line, each starting with the header
    // line of the frame
    assert!(lines[1].trim_start().starts_with("STREAM("));

    let rx = lines
        .iter()
        .position(|l| l.contains("RX "))
        .expect("RX packet line present");
    assert!(rx > 1);
    assert!(lines[rx].contains("Short 01(0x01)"));
    assert!(!lines[rx].contains("V=0x"), "short header omits the version");

    assert!(text.contains("QUIC handshake has completed"));
    assert!(text.contains("; Stateless Reset"));
    assert!(text.contains("stateless_reset_token=33333333333333333333333333333333"));
    assert!(text.contains("ordered STREAM data stream_id=0x00000009"));
}

#[test]
fn test_ack_ranges_render_in_wire_order() {
    let mut tracer = QuicTracer::with_sink(&QuicTracerConfig::default(), Vec::new());
    let hd = short_header(3);
    tracer.on_recv_frame(
        &hd,
        &QuicFrame::Ack {
            flags: 0,
            largest_ack: 100,
            ack_delay: 0,
            first_ack_block_length: 10,
            blocks: vec![QuicAckBlock {
                gap: 4,
                block_length: 3,
            }],
        },
    );

    let text = String::from_utf8(tracer.into_sink()).unwrap();
    let lines: Vec<&str> = text.lines().map(|l| l.trim_start()).collect();
    assert_eq!(lines[1], "num_blks=1 largest_ack=100 ack_delay=0");
    assert_eq!(lines[2], "first_ack_block_length=10; [100..90]");
    // Cursor: 90 - (4 + 1) = 85; low bound 85 - (3 - 1) = 83
    assert_eq!(lines[3], "gap=4 ack_block_length=3; [85..83]");
}
