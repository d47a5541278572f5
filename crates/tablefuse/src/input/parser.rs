//! Delimited-text parser with delimiter auto-detection and configurable
//! source encoding.
//!
//! The output stream is always UTF-8; the input encoding is a deployment
//! choice (some deployments ship GBK-encoded exports) and must be set
//! explicitly when it is not UTF-8.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::Encoding;
use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{FuseError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Source text encoding.
    pub encoding: &'static Encoding,
}

impl ParserConfig {
    /// Build a default configuration with the encoding resolved from a
    /// WHATWG label such as `utf-8` or `gbk`.
    pub fn with_encoding_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| FuseError::Config(format!("unknown encoding label '{label}'")))?;
        Ok(Self {
            encoding,
            ..Self::default()
        })
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Parses delimited tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| FuseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| FuseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        // Decode with the configured encoding; undecodable sequences are
        // replaced and flagged rather than failing the load.
        let (text, _, decode_lossy) = self.config.encoding.decode(&contents);

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&text)?,
        };

        let table = self.parse_str(&text, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            self.config.encoding.name().to_lowercase(),
            decode_lossy,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse already-decoded text with a known delimiter.
    pub fn parse_str(&self, text: &str, delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        let mut expected_cols = headers.len();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            if expected_cols == 0 {
                expected_cols = row.len();
            }
            row.resize(expected_cols, String::new());
            rows.push(row);
        }

        let headers = if headers.is_empty() {
            (1..=expected_cols).map(|i| format!("column_{i}")).collect()
        } else {
            headers
        };

        if headers.is_empty() {
            return Err(FuseError::EmptyInput("no columns found".to_string()));
        }
        if rows.is_empty() {
            return Err(FuseError::EmptyInput("no data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by scoring candidate counts over the first lines.
fn detect_delimiter(text: &str) -> Result<u8> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if lines.is_empty() {
        return Err(FuseError::EmptyInput("no lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0usize;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_unquoted(line, delim))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        // A delimiter that splits every line into the same number of fields
        // wins; tab gets a slight edge since it rarely occurs in cell text.
        let consistent = counts.iter().all(|&c| c == first);
        let score = if consistent {
            first * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting double quotes.
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3\n4,5,6").unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3").unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_quoted() {
        // Comma inside quotes must not count.
        assert_eq!(
            detect_delimiter("a;b\n\"x,y\";2\n\"p,q\";4").unwrap(),
            b';'
        );
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let table = parser
            .parse_str("name,age,city\nAlice,30,NYC\nBob,25,LA", b',')
            .unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some("Alice"));
        assert_eq!(table.get(1, 1), Some("25"));
    }

    #[test]
    fn test_parse_ragged_rows_padded() {
        let parser = Parser::new();
        let table = parser.parse_str("a,b,c\n1,2\n3,4,5,6", b',').unwrap();

        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["3", "4", "5"]);
    }

    #[test]
    fn test_parse_header_only_is_empty_input() {
        let parser = Parser::new();
        let err = parser.parse_str("a,b,c\n", b',').unwrap_err();
        assert!(matches!(err, FuseError::EmptyInput(_)));
    }

    #[test]
    fn test_parse_without_header_generates_names() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_str("1,2\n3,4", b',').unwrap();

        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_gbk_decoding() {
        // "温度" (temperature) in GBK bytes as a header cell.
        let bytes: &[u8] = &[
            0xCE, 0xC2, 0xB6, 0xC8, b',', b'v', b'\n', b'1', b',', b'2', b'\n',
        ];
        let (text, _, lossy) = encoding_rs::GBK.decode(bytes);
        assert!(!lossy);

        let parser = Parser::new();
        let table = parser.parse_str(&text, b',').unwrap();
        assert_eq!(table.headers[0], "温度");
    }
}
