//! Output sinks: styled lines to the terminal, plain lines to an optional
//! mirror file.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Stdout, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::render::Line;

pub struct Output<W: Write, M: Write> {
    primary: W,
    mirror: Option<M>,
}

impl Output<Stdout, BufWriter<File>> {
    /// Stdout, mirrored to `mirror_path` when given. The mirror is appended to.
    pub fn stdout(mirror_path: Option<&Path>) -> Result<Self> {
        let mirror = mirror_path
            .map(|path| {
                tracing::debug!("Mirroring output to {}", path.display());
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map(BufWriter::new)
                    .with_context(|| format!("opening mirror file {}", path.display()))
            })
            .transpose()?;
        Ok(Self::new(io::stdout(), mirror))
    }
}

impl<W: Write, M: Write> Output<W, M> {
    pub fn new(primary: W, mirror: Option<M>) -> Self {
        Self { primary, mirror }
    }

    pub fn emit(&mut self, line: &Line) -> Result<()> {
        writeln!(self.primary, "{}", line.styled()).context("writing output")?;
        if let Some(ref mut mirror) = self.mirror {
            writeln!(mirror, "{}", line.plain()).context("writing mirror file")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.primary.flush().context("flushing output")?;
        if let Some(ref mut mirror) = self.mirror {
            mirror.flush().context("flushing mirror file")?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_parts(self) -> (W, Option<M>) {
        (self.primary, self.mirror)
    }
}
