use std::io::{self, Write};

/// Write a single JSON document followed by a newline.
pub fn write_value(out: &mut impl Write, value: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(value: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_value(&mut out, &value)
}
