use std::fmt::Write as _;
use std::io::Write;

// Detail lines are aligned under the timestamp prefix of the packet line.
pub(crate) const TRACE_INDENT: &str = "           ";

const HEXDUMP_BYTES_PER_LINE: usize = 16;

pub(crate) fn format_hex(data: &[u8]) -> String {
    let mut res = String::with_capacity(data.len() * 2);
    for b in data {
        // Writing to a String cannot fail
        let _ = write!(res, "{b:02x}");
    }
    res
}

// `hexdump -C` style rows: offset, two groups of eight hex bytes, ASCII
// column, and a final line holding the total length as an offset.
pub(crate) fn hexdump<W: Write>(out: &mut W, data: &[u8]) -> std::io::Result<()> {
    for (row, chunk) in data.chunks(HEXDUMP_BYTES_PER_LINE).enumerate() {
        write!(out, "{:08x}", row * HEXDUMP_BYTES_PER_LINE)?;

        for (i, b) in chunk.iter().enumerate() {
            if i % 8 == 0 {
                write!(out, " ")?;
            }
            write!(out, " {b:02x}")?;
        }
        for i in chunk.len()..HEXDUMP_BYTES_PER_LINE {
            if i % 8 == 0 {
                write!(out, " ")?;
            }
            write!(out, "   ")?;
        }

        write!(out, "  |")?;
        for b in chunk {
            let c = if b.is_ascii_graphic() || *b == b' ' {
                *b as char
            } else {
                '.'
            };
            write!(out, "{c}")?;
        }
        writeln!(out, "|")?;
    }
    if !data.is_empty() {
        writeln!(out, "{:08x}", data.len())?;
    }
    Ok(())
}
