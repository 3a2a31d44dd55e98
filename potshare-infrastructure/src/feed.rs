use crate::decoder::JsonSnapshotDecoder;
use potshare_application::{Snapshot, SnapshotDecodeError, SnapshotDecoder};
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read snapshot feed at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("Invalid snapshot at line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: SnapshotDecodeError,
    },
}

/// Snapshot feed with one JSON document per line.
///
/// Stands in for the realtime listener: each line is a full-state snapshot
/// that supersedes the previous one. Blank lines are skipped.
pub struct JsonLinesFeed<R, D = JsonSnapshotDecoder> {
    reader: R,
    decoder: D,
    line: usize,
    buffer: String,
}

impl<R: BufRead> JsonLinesFeed<R> {
    pub fn new(reader: R) -> Self {
        Self::with_decoder(reader, JsonSnapshotDecoder)
    }
}

impl<R: BufRead, D: SnapshotDecoder> JsonLinesFeed<R, D> {
    pub fn with_decoder(reader: R, decoder: D) -> Self {
        Self {
            reader,
            decoder,
            line: 0,
            buffer: String::new(),
        }
    }
}

impl<R: BufRead, D: SnapshotDecoder> Iterator for JsonLinesFeed<R, D> {
    type Item = Result<Snapshot, FeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            self.line += 1;
            let line = self.line;

            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => return Some(Err(FeedError::Io { line, source })),
            }

            let content = self.buffer.trim();
            if content.is_empty() {
                continue;
            }

            tracing::debug!(line, bytes = content.len(), "Decoding snapshot");
            return Some(
                self.decoder
                    .decode(content)
                    .map_err(|source| FeedError::Decode { line, source }),
            );
        }
    }
}
