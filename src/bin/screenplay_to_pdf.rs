//! Typeset a screenplay to PDF
//!
//! Reads a JSON array of screenplay elements on stdin and writes the PDF to
//! stdout with the default US-letter layout.
//!
//! Usage:
//!   RUST_LOG=debug cargo run --release --bin screenplay_to_pdf < script.json > script.pdf

use screenplay_pdf::{ScreenplayConfig, ScreenplayWriter, read_elements};
use std::io::{self, Write};
use std::process::ExitCode;

fn run() -> screenplay_pdf::Result<usize> {
    let elements = read_elements(io::stdin().lock())?;
    log::info!("Read {} elements", elements.len());

    let writer = ScreenplayWriter::new(ScreenplayConfig::default());
    let mut stdout = io::stdout().lock();
    let written = writer.transform(&elements, &mut stdout)?;
    stdout.flush()?;
    Ok(written)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(bytes) => {
            log::info!("Wrote {} bytes", bytes);
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
