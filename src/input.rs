//! Line input from files or stdin.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

/// Open `path` for reading, `-` meaning stdin.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Call `f` with every line of `reader`, without its `\n` or `\r\n`
/// terminator. Bytes that aren't UTF-8 are replaced rather than rejected, as
/// serial lines are routinely garbled.
pub fn for_each_line(
    mut reader: impl BufRead,
    mut f: impl FnMut(&str) -> Result<()>,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).context("reading input")? == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        f(&String::from_utf8_lossy(&buf))?;
    }
}
