//! JAR manifest serialization.
//!
//! Writes the main section of a `META-INF/MANIFEST.MF`: one `Key: value`
//! header per attribute, CRLF line endings, lines of at most 72 bytes with
//! continuation lines starting with a single space, and a terminating blank
//! line.

use std::path::Path;

use anyhow::Result;

use crate::core::attributes::ManifestAttributes;
use crate::util::fs::write_string;

/// Maximum length of a manifest line in bytes, excluding the line break.
pub const MAX_LINE_BYTES: usize = 72;

const LINE_BREAK: &str = "\r\n";

/// Serialize the attributes into manifest text.
pub fn to_manifest_string(attrs: &ManifestAttributes) -> String {
    let mut output = String::new();
    for (key, value) in attrs.iter() {
        write_header(&mut output, &format!("{}: {}", key, value));
    }
    output.push_str(LINE_BREAK);
    output
}

/// Write the manifest to `path`, creating parent directories.
pub fn write_manifest(path: &Path, attrs: &ManifestAttributes) -> Result<()> {
    write_string(path, &to_manifest_string(attrs))?;
    tracing::debug!("wrote {} attributes to {}", attrs.len(), path.display());
    Ok(())
}

fn write_header(output: &mut String, header: &str) {
    let mut rest = header;
    let mut limit = MAX_LINE_BYTES;
    loop {
        if rest.len() <= limit {
            output.push_str(rest);
            output.push_str(LINE_BREAK);
            return;
        }
        let split = floor_char_boundary(rest, limit);
        output.push_str(&rest[..split]);
        output.push_str(LINE_BREAK);
        output.push(' ');
        rest = &rest[split..];
        limit = MAX_LINE_BYTES - 1;
    }
}

/// Largest char boundary of `s` that is at most `index` (and above zero).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    if i == 0 {
        // A single code point never exceeds 4 bytes, so this only happens for tiny limits
        s.char_indices().nth(1).map_or(s.len(), |(i, _)| i)
    } else {
        i
    }
}
