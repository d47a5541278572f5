//! Delimited-text export of fused tables.
//!
//! Output is always UTF-8, with a header row and, by default, a leading
//! zero-based row-index column (its header cell is empty, matching the
//! shape interactive front-ends expect for downloads).

use std::fs;
use std::path::Path;

use crate::error::{FuseError, Result};
use crate::input::DataTable;

/// Export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Field delimiter for the output.
    pub delimiter: u8,
    /// Whether to prepend a row-index column.
    pub include_index: bool,
    /// Default file name offered for the download.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_index: true,
            file_name: "merged_dataframe.csv".to_string(),
        }
    }
}

/// Serializes tables to delimited-text byte streams.
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter with default configuration.
    pub fn new() -> Self {
        Self {
            config: ExportConfig::default(),
        }
    }

    /// Create an exporter with custom configuration.
    pub fn with_config(config: ExportConfig) -> Self {
        Self { config }
    }

    /// The file name this export should be offered under.
    pub fn file_name(&self) -> &str {
        &self.config.file_name
    }

    /// Serialize a table to a UTF-8 byte stream.
    pub fn to_bytes(&self, table: &DataTable) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .from_writer(Vec::new());

        if self.config.include_index {
            let mut header: Vec<&str> = vec![""];
            header.extend(table.headers.iter().map(|h| h.as_str()));
            writer.write_record(&header)?;

            for (idx, row) in table.rows.iter().enumerate() {
                let index = idx.to_string();
                let mut record: Vec<&str> = vec![&index];
                record.extend(row.iter().map(|c| c.as_str()));
                writer.write_record(&record)?;
            }
        } else {
            writer.write_record(&table.headers)?;
            for row in &table.rows {
                writer.write_record(row)?;
            }
        }

        writer
            .into_inner()
            .map_err(|e| FuseError::Config(format!("export buffer error: {e}")))
    }

    /// Serialize a table and write it to a file.
    pub fn write_file(&self, table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(table)?;
        fs::write(path, bytes).map_err(|e| FuseError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}
