use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use std::{fs, path::Path};

/// Read `path` and decode it to text. A UTF-8 or UTF-16 byte-order mark is
/// honored and stripped; without one the file must be valid UTF-8 unless
/// `forced` names the encoding. Malformed byte sequences abort the run.
pub fn read_to_string(path: &Path, forced: Option<&'static Encoding>) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode(&bytes, forced).with_context(|| format!("while decoding {}", path.display()))
}

fn decode(bytes: &[u8], forced: Option<&'static Encoding>) -> Result<String> {
    // A BOM wins over any forced label.
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            bail!("malformed {} data", encoding.name());
        }
        return Ok(text.into_owned());
    }
    if let Some(encoding) = forced {
        let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
        if had_errors {
            bail!("malformed {} data", encoding.name());
        }
        return Ok(text.into_owned());
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(err) => bail!("invalid utf-8 at byte {}", err.valid_up_to()),
    }
}
