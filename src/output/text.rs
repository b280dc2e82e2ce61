// src/output/text.rs
// =============================================================================
// Human-readable output, four lines per repository:
//
//   rust-lang/rust:
//      Empowering everyone to build reliable and efficient software.
//      https://github.com/rust-lang/rust
//      lang:Rust stars:98000 forks:12700
//
// Missing descriptions and languages print as empty strings.
// =============================================================================

use std::io::Write;

use crate::error::Result;
use crate::github::Repository;

pub struct TextWriter<W: Write> {
    out: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write(&mut self, repo: &Repository) -> Result<()> {
        writeln!(self.out, "{}:", repo.full_name)?;
        writeln!(self.out, "   {}", repo.description())?;
        writeln!(self.out, "   {}", repo.html_url)?;
        writeln!(
            self.out,
            "   lang:{} stars:{} forks:{}",
            repo.language(),
            repo.stargazers_count,
            repo.forks_count
        )?;
        Ok(())
    }
}
