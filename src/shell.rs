//! Read-execute-print loop
//!
//! Generic over its input and output so the loop can be driven by a script
//! in tests as well as by a terminal.

use crate::session::{Control, Session};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run the prompt loop until `quit`/`exit` or end of input.
///
/// The session is shut down before returning on either path.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    output: &mut W,
) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        write!(output, "{}", session.config().prompt)?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("end of input");
            break;
        }

        // Undecodable bytes become U+FFFD and reach the dispatcher as an unknown word.
        let line = String::from_utf8_lossy(&buf);
        let command = line.trim_end_matches(['\n', '\r']);
        if session.execute(command, output)? == Control::Quit {
            break;
        }
    }

    output.flush()?;
    session.shutdown();
    Ok(())
}
