//! Writes responses to stdout

use std::io::{self, Write};

use crate::handler::{Response, Source};

/// Write `<status> <content-type> <length> <hit|miss> <path>`, then the body with `cat`
pub fn send<W: Write>(
    out: &mut W,
    request_path: &str,
    response: &Response,
    cat: bool,
) -> io::Result<()> {
    let source = match response.source {
        Source::Cache => "hit",
        Source::Disk => "miss",
    };

    writeln!(
        out,
        "{} {} {} {} {}",
        response.status.code(),
        response.content_type,
        response.body.len(),
        source,
        request_path
    )?;

    if cat {
        out.write_all(&response.body)?;
        if !response.body.ends_with(b"\n") {
            out.write_all(b"\n")?;
        }
    }

    Ok(())
}
