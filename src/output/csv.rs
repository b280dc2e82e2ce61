// src/output/csv.rs
// =============================================================================
// CSV output: a header row, then one row per repository.
//
//   name,desc,url,lang,stars,forks
//   rust-lang/rust,"Fast, reliable",https://github.com/rust-lang/rust,Rust,98000,12700
//
// Quoting and escaping are handled by the `csv` crate. Every row is flushed
// as soon as it is written so a long listing shows up incrementally.
// =============================================================================

use std::io::Write;

use crate::error::Result;
use crate::github::Repository;

pub const HEADER: [&str; 6] = ["name", "desc", "url", "lang", "stars", "forks"];

pub struct CsvWriter<W: Write> {
    w: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    // Creates the writer and emits the header row straight away
    pub fn new(out: W) -> Result<Self> {
        let mut w = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);

        w.write_record(HEADER)?;
        w.flush()?;

        Ok(Self { w })
    }

    pub fn write(&mut self, repo: &Repository) -> Result<()> {
        self.w.write_record([
            repo.full_name.as_str(),
            repo.description(),
            repo.html_url.as_str(),
            repo.language(),
            repo.stargazers_count.to_string().as_str(),
            repo.forks_count.to_string().as_str(),
        ])?;
        self.w.flush()?;
        Ok(())
    }
}
