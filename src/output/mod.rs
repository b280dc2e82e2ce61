// src/output/mod.rs
// =============================================================================
// This module turns repositories into output.
//
// Submodules:
// - text: Four human-readable lines per repository
// - csv: Header row plus one row per repository
// - json: One JSON object per line
//
// Renderer is a closed enum over the three writers. The format is picked once
// from the Config and never changes during a run.
//
// Rust concepts:
// - Generics: Every writer works over any `W: Write` (stdout, or a Vec in tests)
// - Enums with data: Each variant owns its writer
// =============================================================================

mod csv;
mod json;
mod text;

use std::io::Write;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::github::Repository;

use self::csv::CsvWriter;
use self::json::JsonWriter;
use self::text::TextWriter;

pub enum Renderer<W: Write> {
    Text(TextWriter<W>),
    Csv(CsvWriter<W>),
    Json(JsonWriter<W>),
}

impl<W: Write> Renderer<W> {
    // The CSV variant writes its header here, so this can already fail
    pub fn new(format: OutputFormat, out: W) -> Result<Self> {
        Ok(match format {
            OutputFormat::Text => Renderer::Text(TextWriter::new(out)),
            OutputFormat::Csv => Renderer::Csv(CsvWriter::new(out)?),
            OutputFormat::Json => Renderer::Json(JsonWriter::new(out)),
        })
    }

    pub fn write(&mut self, repo: &Repository) -> Result<()> {
        match self {
            Renderer::Text(w) => w.write(repo),
            Renderer::Csv(w) => w.write(repo),
            Renderer::Json(w) => w.write(repo),
        }
    }
}
