//! Input decoding and output plumbing for the command modules.
//!
//! - **Encoding**: input text is decoded through `encoding_rs_io`, UTF-8 by
//!   default; a byte-order mark overrides the requested encoding.
//! - **stdin/stdout**: the `-` path convention routes through standard
//!   streams.
//! - **CSV output**: plot points are written with the `csv` writer using
//!   `QuoteStyle::Necessary`.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::DecodeReaderBytesBuilder;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn decode_to_string<R: Read>(reader: R, encoding: &'static Encoding) -> Result<String> {
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .bom_override(true)
        .strip_bom(true)
        .build(reader);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .with_context(|| format!("Decoding input as {}", encoding.name()))?;
    Ok(text)
}

pub fn read_input_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    if is_dash(path) {
        decode_to_string(io::stdin().lock(), encoding)
    } else {
        let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
        decode_to_string(BufReader::new(file), encoding)
            .with_context(|| format!("Reading input file {path:?}"))
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(io::stdout()),
    })
}

pub fn open_csv_writer(path: Option<&Path>) -> Result<csv::Writer<Box<dyn Write>>> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    Ok(builder.from_writer(open_output(path)?))
}
