use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "cart, action, name, amount, coupon, index";

/// Writes a cart event script (header included) to a temporary file.
pub fn event_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}
