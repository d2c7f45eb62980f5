use std::path::Path;

/// Read a text file that is usually UTF-8 but may be GBK or Latin-1
/// (generated navigation markup inherits the encoding of the source tree).
/// Falls back through the candidate encodings and finally to a lossy UTF-8
/// decode, so callers always get *something* to work with.
pub fn read_to_string_tolerant(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;

    if let Ok(s) = String::from_utf8(bytes.clone()) {
        return Ok(s);
    }

    for encoding in [encoding_rs::GBK, encoding_rs::WINDOWS_1252] {
        let (decoded, _, had_errors) = encoding.decode(&bytes);
        if !had_errors {
            return Ok(decoded.into_owned());
        }
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Human-readable duration for log lines and reports, e.g. "125.30s (2.09min)".
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        format!("{:.2}s ({:.2}min)", secs, secs / 60.0)
    } else {
        format!("{secs:.2}s")
    }
}
