use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Pulls whitespace-separated words out of a reader, one line at a time.
///
/// Words are returned exactly as they appear: no case folding and no
/// punctuation stripping. Bytes that are not valid UTF-8 decode to U+FFFD
/// instead of failing the read. The reader is consumed in a single pass.
pub struct FileWordReader<R = File> {
    reader: BufReader<R>,
    line: Vec<u8>,
    pending: VecDeque<String>,
}

impl FileWordReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> FileWordReader<R> {
    pub fn new(inner: R) -> Self {
        FileWordReader {
            reader: BufReader::new(inner),
            line: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next word, or `None` once the input is exhausted.
    pub fn next_word(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Ok(Some(word));
            }

            self.line.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.line)?;
            if bytes_read == 0 {
                return Ok(None);
            }

            self.pending.extend(
                String::from_utf8_lossy(&self.line)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }
}
