// src/output/json.rs
// =============================================================================
// JSON Lines output: one complete repository object per line, no enclosing
// array. The object is the full record GitHub returned, not just the fields
// the text and CSV formats show.
// =============================================================================

use std::io::Write;

use crate::error::Result;
use crate::github::Repository;

pub struct JsonWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write(&mut self, repo: &Repository) -> Result<()> {
        serde_json::to_writer(&mut self.out, repo)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
