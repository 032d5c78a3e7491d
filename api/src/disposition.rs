//! Content-Disposition filename extraction for report downloads.

/// Pulls the download filename out of a `Content-Disposition` header.
///
/// `filename*=<charset>'<lang>'<value>` wins over a plain `filename=`; either
/// value is percent-decoded. Absent, empty or undecodable values fall back to
/// `fallback`.
pub fn filename_from_content_disposition(header: Option<&str>, fallback: &str) -> String {
    let Some(header) = header else {
        return fallback.to_string();
    };

    let mut extended = None;
    let mut plain = None;

    for param in header.split(';') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        match key.as_str() {
            "filename*" => {
                // charset'language'encoded-value
                let encoded = value.splitn(3, '\'').nth(2).unwrap_or(value);
                extended = Some(encoded.trim_matches('"'));
            }
            "filename" => plain = Some(value.trim_matches('"')),
            _ => {}
        }
    }

    extended
        .into_iter()
        .chain(plain)
        .filter_map(decode)
        .next()
        .unwrap_or_else(|| fallback.to_string())
}

fn decode(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
