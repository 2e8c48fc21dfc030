use std::fs::File;
use std::io::{stdin, stdout, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use genomepack::{alphabet, codec, BitReader, BitWriter};

/// Creates a reader for the given input option, falling back to standard input.
pub fn get_reader(input: &Option<String>) -> Result<Box<dyn Read>> {
    Ok(match input {
        Some(ref x) => {
            let file =
                File::open(Path::new(x)).with_context(|| format!("Unable to open file {x}"))?;
            Box::new(BufReader::new(file)) as Box<dyn Read>
        }
        None => Box::new(stdin().lock()) as Box<dyn Read>,
    })
}

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
pub fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))
                .with_context(|| format!("Unable to create file {x}"))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

/// Removes a single trailing `\n` or `\r\n`.
pub fn trim_newline(data: &mut Vec<u8>) {
    if data.last() == Some(&b'\n') {
        data.pop();
        if data.last() == Some(&b'\r') {
            data.pop();
        }
    }
}

fn read_all(input: &Option<String>) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    get_reader(input)?
        .read_to_end(&mut data)
        .context("Could not read input")?;
    debug!("Read {} bytes of input", data.len());
    Ok(data)
}

/// Reads a whole sequence, packs it and writes the encoded stream.
///
/// The sequence is validated before the output is opened, so invalid input
/// never creates or truncates an output file.
pub fn compress(input: &Option<String>, output: &Option<String>, trim: bool) -> Result<()> {
    let mut data = read_all(input)?;
    if trim {
        trim_newline(&mut data);
    }

    let seq = alphabet::parse_sequence(&data).context("Could not compress input")?;
    info!("Compressing {} nucleotides", seq.len());

    let mut sink = BitWriter::new(get_writer(output)?);
    codec::encode(&seq, &mut sink).context("Could not write compressed output")?;

    let size = codec::encoded_len(seq.len());
    info!(
        "Wrote {size} bytes ({:.1}% of input)",
        100.0 * size as f64 / data.len().max(1) as f64
    );
    Ok(())
}

/// Reads a whole encoded stream and writes the expanded sequence.
pub fn expand(input: &Option<String>, output: &Option<String>) -> Result<()> {
    let data = read_all(input)?;

    let seq = codec::decode_to_bytes(&mut BitReader::new(data.as_slice()))
        .context("Could not expand input")?;
    info!("Expanded {} nucleotides", seq.len());

    let mut writer = get_writer(output)?;
    writer.write_all(&seq)?;
    writer.flush()?;
    Ok(())
}
