// Raw CSV reading for bulk ingestion

use std::io::Read;
use std::path::Path;

use crate::local::StoreError;

/// Read a CSV file as UTF-8 text and sniff its delimiter.
///
/// Returns the decoded content plus the delimiter to hand to the cleaning
/// pipeline. No typed parsing happens here.
pub fn read_raw(path: &Path) -> Result<(String, u8), StoreError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    Ok((content, delimiter))
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252 exports,
/// common for spreadsheets saved on Windows with accented headers).
pub fn read_file_as_utf8(path: &Path) -> Result<String, StoreError> {
    let mut file = std::fs::File::open(path).map_err(|e| StoreError::Io(e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| StoreError::Io(e.to_string()))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across
/// the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line.
/// The delimiter producing the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: lines agreeing with line 1, weighted by field count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sniff_comma() {
        let content = "Código del Documento,Estado\nSGC-001,Vigente\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn sniff_semicolon() {
        let content = "Código del Documento;Estado\nSGC-001;Vigente\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn sniff_semicolon_with_commas_inside_quotes() {
        let content = "Título;Responsable\n\"Plan, anual\";\"Pérez, J.\"\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn sniff_tab_and_pipe() {
        assert_eq!(sniff_delimiter("a\tb\n1\t2\n"), b'\t');
        assert_eq!(sniff_delimiter("a|b\n1|2\n"), b'|');
    }

    #[test]
    fn empty_content_defaults_to_comma() {
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn utf8_file_reads_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs.csv");
        fs::write(&path, "Código,Área\nSGC-001,Calidad\n").unwrap();

        let (content, delim) = read_raw(&path).unwrap();
        assert_eq!(delim, b',');
        assert!(content.contains("Código"));
    }

    #[test]
    fn windows_1252_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs.csv");
        // "Código,Área" encoded as Windows-1252: ó = 0xF3, Á = 0xC1.
        let bytes: Vec<u8> = b"C\xF3digo,\xC1rea\nSGC-001,Calidad\n".to_vec();
        fs::write(&path, &bytes).unwrap();

        let content = read_file_as_utf8(&path).unwrap();
        assert!(content.contains("Código"));
        assert!(content.contains("Área"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_raw(Path::new("/nonexistent/docs.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
