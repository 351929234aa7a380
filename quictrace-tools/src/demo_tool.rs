use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use clap_num::number_range;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quictrace_core::prelude::*;
use quictrace_core::packet::{
    QUIC_PKT_CLIENT_INITIAL, QUIC_PKT_FLAG_NONE, QUIC_PKT_SERVER_CLEARTEXT, QUIC_PKT_SHORT_03,
    QUIC_PKT_VERSION_NEGOTIATION,
};

fn more_than_zero(s: &str) -> Result<u64, String> {
    number_range(s, 1, u64::MAX)
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let prob: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid probability"))?;
    if !(0.0..=1.0).contains(&prob) {
        return Err(format!("Probability {prob} must be within [0, 1]"));
    }
    Ok(prob)
}

// Replays a canned client/server exchange through the tracer so the output
// of every renderer can be eyeballed without a live connection.
fn replay_sample_exchange(tracer: &mut QuicTracer<std::io::Stderr>) {
    let client_initial = QuicPacketHeader {
        packet_type: QUIC_PKT_CLIENT_INITIAL,
        flags: QUIC_PKT_FLAG_LONG_FORM,
        conn_id: 0x5c0ffee1dab5,
        packet_number: 1,
        version: 0xff000005,
    };
    tracer.on_send_packet(&client_initial);
    tracer.on_send_frame(
        &client_initial,
        &QuicFrame::Stream {
            flags: 0x01,
            stream_id: 0,
            fin: false,
            offset: 0,
            data_length: 1218,
        },
    );
    tracer.print_transport_params(&QuicTransportParameters {
        context: QuicHandshakeContext::ClientHello {
            negotiated_version: 0xff000005,
            initial_version: 0xff000005,
        },
        initial_max_stream_data: 262144,
        initial_max_data: 1048576,
        initial_max_stream_id: 20,
        idle_timeout: 30,
        omit_connection_id: false,
        max_packet_size: 1452,
        stateless_reset_token: [0; QUIC_STATELESS_RESET_TOKEN_LENGTH],
    });

    let server_cleartext = QuicPacketHeader {
        packet_type: QUIC_PKT_SERVER_CLEARTEXT,
        flags: QUIC_PKT_FLAG_LONG_FORM,
        conn_id: 0x5c0ffee1dab5,
        packet_number: 1,
        version: 0xff000005,
    };
    tracer.on_recv_packet(&server_cleartext);
    tracer.on_recv_frame(
        &server_cleartext,
        &QuicFrame::Ack {
            flags: 0x00,
            largest_ack: 1,
            ack_delay: 0,
            first_ack_block_length: 0,
            blocks: vec![],
        },
    );
    tracer.print_transport_params(&QuicTransportParameters {
        context: QuicHandshakeContext::EncryptedExtensions {
            supported_versions: vec![0xff000005, 0xff000004],
        },
        initial_max_stream_data: 262144,
        initial_max_data: 1048576,
        initial_max_stream_id: 21,
        idle_timeout: 30,
        omit_connection_id: false,
        max_packet_size: 1452,
        stateless_reset_token: [0xa5; QUIC_STATELESS_RESET_TOKEN_LENGTH],
    });

    tracer.on_handshake_completed();

    let version_negotiation = QuicPacketHeader {
        packet_type: QUIC_PKT_VERSION_NEGOTIATION,
        flags: QUIC_PKT_FLAG_LONG_FORM,
        conn_id: 0x5c0ffee1dab5,
        packet_number: 0,
        version: 0,
    };
    tracer.on_recv_packet(&version_negotiation);
    tracer.on_recv_version_negotiation(&version_negotiation, &[0xff000005, 0xff000004]);

    let short = QuicPacketHeader {
        packet_type: QUIC_PKT_SHORT_03,
        flags: QUIC_PKT_FLAG_NONE,
        conn_id: 0x5c0ffee1dab5,
        packet_number: 2,
        version: 0,
    };
    tracer.on_recv_packet(&short);
    tracer.on_recv_frame(
        &short,
        &QuicFrame::Ack {
            flags: 0x01,
            largest_ack: 100,
            ack_delay: 20,
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
    );
    tracer.print_stream_data(0, b"hello quictrace\r\n");

    tracer.on_recv_stateless_reset(
        &short,
        &QuicStatelessReset {
            stateless_reset_token: [0xa5; QUIC_STATELESS_RESET_TOKEN_LENGTH],
            rand: (0u8..32).collect(),
        },
    );
}

fn main() -> Result<()> {
    let matches = Command::new("quictrace-demo-tool")
        .version("0.1.0")
        .about("Renders a sample QUIC trace and runs the loss simulator")
        .arg(
            Arg::new("color")
                .long("color")
                .short('c')
                .action(ArgAction::SetTrue)
                .help("Colorize the trace output with ANSI escapes"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64))
                .help("Seed for the loss simulator (random if omitted)"),
        )
        .arg(
            Arg::new("loss-rate")
                .long("loss-rate")
                .value_parser(parse_probability)
                .default_value("0.1")
                .help("Per-packet loss probability for the simulation run"),
        )
        .arg(
            Arg::new("trials")
                .long("trials")
                .value_parser(more_than_zero)
                .default_value("10000")
                .help("Number of Bernoulli trials to run"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut config = QuicTracerConfig::default();
    config.set_color_output(matches.get_flag("color"));

    let mut tracer = QuicTracer::new(&config);
    tracer.reset_timestamp();
    replay_sample_exchange(&mut tracer);

    let loss_rate = *matches
        .get_one::<f64>("loss-rate")
        .context("loss-rate has a default")?;
    let trials = *matches
        .get_one::<u64>("trials")
        .context("trials has a default")?;

    let mut simulator = QuicLossSimulator::new(matches.get_one::<u64>("seed").copied());
    let lost = (0..trials)
        .filter(|_| simulator.packet_lost(loss_rate))
        .count();
    info!(
        "Loss simulation: {}/{} packets dropped (target rate {})",
        lost, trials, loss_rate
    );

    Ok(())
}
