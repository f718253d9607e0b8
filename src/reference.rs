//! Sequential FASTA reference reader. Read line-by-line rather than through
//! `bio::io::fasta::IndexedReader` so the line length can drive the window
//! size, exactly as `original_source`'s `FilesManipulator::getRefGen` does.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::{Error, Result};

#[derive(Debug)]
pub struct Reference {
    reader: BufReader<File>,
    /// The first non-header line, buffered here since reading it to learn
    /// its length would otherwise drop its content on the floor.
    pending_line: Option<String>,
    /// Length of the first non-header line read; defines `WINDOW_SIZE`
    /// together with `lines_per_window`.
    pub line_len: usize,
}

impl Reference {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::ReferenceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let first_line = read_first_sequence_line(&mut reader, path)?;
        let line_len = first_line.len();

        Ok(Reference {
            reader,
            pending_line: Some(first_line),
            line_len,
        })
    }

    /// Read up to `count` non-header lines, concatenated into one string.
    /// Returns fewer lines (possibly none) at end of file.
    pub fn read_lines(&mut self, count: usize) -> Result<String> {
        let mut out = String::new();
        let mut read = 0;

        if let Some(pending) = self.pending_line.take() {
            if count > 0 {
                out.push_str(&pending);
                read += 1;
            } else {
                self.pending_line = Some(pending);
            }
        }

        let mut line = String::new();
        while read < count {
            line.clear();
            let n = self.reader.read_line(&mut line).map_err(|source| Error::ReferenceOpen {
                path: Path::new("<reference>").to_path_buf(),
                source,
            })?;
            if n == 0 {
                break;
            }
            let trimmed = line.trim_end_matches(['\n', '\r']);
            if trimmed.is_empty() || trimmed.starts_with('>') {
                continue;
            }
            out.push_str(trimmed);
            read += 1;
        }
        Ok(out)
    }
}

fn read_first_sequence_line(reader: &mut BufReader<File>, path: &Path) -> Result<String> {
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).map_err(|source| Error::ReferenceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            return Err(Error::EmptyReference { path: path.to_path_buf() });
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() || trimmed.starts_with('>') {
            continue;
        }
        return Ok(trimmed.to_string());
    }
}
