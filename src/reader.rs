use std::io;

use bytes::{Bytes, BytesMut};
use log::{debug, info};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, FramedRead};

use crate::config::TableConfig;
use crate::counter::{count_chunk, merge, WordCounts};
use crate::error::CountError;

// Matches tokio's MAX_BUF for blocking IO.
pub const CHUNK_SIZE: usize = 2 * 1024 * 1024;

/// Splits a byte stream into chunks of at least `chunk_size` bytes that end
/// on ASCII whitespace, so no word straddles two chunks.
pub struct WordChunkDecoder {
    chunk_size: usize,
}

impl WordChunkDecoder {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Default for WordChunkDecoder {
    fn default() -> Self {
        Self::new(CHUNK_SIZE)
    }
}

impl Decoder for WordChunkDecoder {
    type Item = Bytes;
    type Error = io::Error;

    #[inline]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < self.chunk_size {
            return Ok(None);
        }
        match memchr::memrchr3(b' ', b'\n', b'\t', src) {
            Some(index) => Ok(Some(src.split_to(index + 1).freeze())),
            None => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(chunk) => Ok(Some(chunk)),
            None if src.is_empty() => Ok(None),
            None => Ok(Some(src.split().freeze())),
        }
    }
}

pub async fn count_words<R>(reader: R, config: TableConfig) -> Result<WordCounts, CountError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    count_words_chunked(reader, config, CHUNK_SIZE).await
}

/// Counts every word of `reader`. Each chunk is counted into its own table on
/// a blocking worker; a single merge task owns the final table.
pub async fn count_words_chunked<R>(
    reader: R,
    config: TableConfig,
    chunk_size: usize,
) -> Result<WordCounts, CountError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<WordCounts>();
    let producer = tokio::spawn(async move {
        let mut framed =
            FramedRead::with_capacity(reader, WordChunkDecoder::new(chunk_size), chunk_size);
        let mut workers = Vec::new();
        while let Some(chunk) = framed.next().await {
            let chunk = chunk?;
            let tx = tx.clone();
            workers.push(tokio::task::spawn_blocking(move || {
                // Only fails once the merge task is gone.
                let _ = tx.send(count_chunk(&chunk, config));
            }));
        }
        drop(tx);
        let chunks = workers.len();
        for worker in workers {
            worker.await?;
        }
        Ok::<usize, CountError>(chunks)
    });

    let merger = tokio::task::spawn_blocking(move || {
        let mut totals = WordCounts::with_config(config);
        while let Some(partial) = rx.blocking_recv() {
            merge(&mut totals, partial);
        }
        totals
    });

    let chunks = producer.await??;
    debug!("read {} chunks", chunks);
    let totals = merger.await?;
    info!(
        "counted {} unique words into {} buckets",
        totals.len(),
        totals.capacity()
    );
    Ok(totals)
}
