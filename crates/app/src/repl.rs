//! Line-oriented shell around a [`QuizShell`].

use std::io::{self, BufRead, ErrorKind, Write};

use services::{QuizShell, Response};

use crate::render;

/// Read lines until EOF or `\q`, writing results to `out` and errors to `err`.
///
/// # Errors
///
/// Returns the first I/O error on `input`, `out` or `err`. An interrupted
/// read only redraws the prompt; a line that is not UTF-8 is reported and
/// skipped.
pub async fn run_repl<R, W, E>(
    shell: &mut QuizShell,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    writeln!(out, "{}", shell.greeting())?;

    let mut buffer = Vec::new();
    loop {
        write!(out, "{}", shell.input_prompt())?;
        out.flush()?;

        buffer.clear();
        let bytes_read = match input.read_until(b'\n', &mut buffer) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                writeln!(out)?;
                continue;
            }
            Err(e) => return Err(e),
        };
        if bytes_read == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let Ok(line) = std::str::from_utf8(&buffer) else {
            writeln!(err, "error: input line is not valid UTF-8, ignored")?;
            err.flush()?;
            continue;
        };

        match shell.handle_line(line).await {
            Response::Nothing => {}
            Response::Message(text) => writeln!(out, "{}", text.trim_end())?,
            Response::Rows { result, feedback } => {
                writeln!(out, "{}", render::result_table(&result))?;
                if let Some(feedback) = feedback {
                    writeln!(out, "\n{feedback}")?;
                }
            }
            Response::Failed(message) => {
                writeln!(err, "error: {message}")?;
                err.flush()?;
            }
            Response::Quit => return Ok(()),
        }
    }
}
