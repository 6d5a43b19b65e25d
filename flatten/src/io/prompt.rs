//! Interactive overwrite confirmation.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Ask whether to overwrite `file_name`. Only `y` (any case, surrounding
/// whitespace ignored) confirms; anything else, including EOF, declines.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    file_name: &str,
) -> Result<bool> {
    writeln!(
        output,
        "Warning: {file_name} already exists and will be overwritten."
    )
    .context("write prompt")?;
    write!(output, "Continue? (y/n): ").context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("read confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
