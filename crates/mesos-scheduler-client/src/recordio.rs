//! RecordIO framing of the subscription stream.
//!
//! Each record is its payload length in ASCII decimal, a `\n`, then
//! exactly that many payload bytes. Transport chunk boundaries carry no
//! meaning: a record may be split across chunks and a chunk may hold
//! several records.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes, BytesMut};
use futures_core::Stream;
use mesos_scheduler_proto::{Event, Message};

use crate::error::DecodeError;

/// Longest accepted length line, excluding the newline.
pub const MAX_LENGTH_LINE: usize = 20;

/// Default upper bound on a single record (64 MiB).
pub const DEFAULT_MAX_RECORD_SIZE: usize = 64 * 1024 * 1024;

/// Body chunks of a subscription response.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadingLength,
    ReadingRecord { len: usize },
}

/// Incremental RecordIO decoder.
#[derive(Debug)]
pub struct RecordIoDecoder {
    buffer: BytesMut,
    state: State,
    max_record_size: usize,
}

impl Default for RecordIoDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordIoDecoder {
    pub fn new() -> Self {
        Self::with_max_record_size(DEFAULT_MAX_RECORD_SIZE)
    }

    pub fn with_max_record_size(max_record_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(8 * 1024),
            state: State::ReadingLength,
            max_record_size,
        }
    }

    /// Number of bytes held for an incomplete record.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a chunk and return every record it completes, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<Bytes>, DecodeError> {
        self.buffer.extend_from_slice(chunk);
        let mut records = Vec::new();

        loop {
            match self.state {
                State::ReadingLength => {
                    let scan = self.buffer.len().min(MAX_LENGTH_LINE + 1);
                    let Some(newline) = self.buffer[..scan].iter().position(|&b| b == b'\n') else {
                        if self.buffer.len() > MAX_LENGTH_LINE {
                            return Err(DecodeError::LengthLineTooLong {
                                limit: MAX_LENGTH_LINE,
                            });
                        }
                        break;
                    };

                    let line = &self.buffer[..newline];
                    let len = parse_length(line)?;
                    if len > self.max_record_size {
                        return Err(DecodeError::RecordTooLarge {
                            len,
                            limit: self.max_record_size,
                        });
                    }
                    self.buffer.advance(newline + 1);
                    self.state = State::ReadingRecord { len };
                }
                State::ReadingRecord { len } => {
                    if self.buffer.len() < len {
                        break;
                    }
                    records.push(self.buffer.split_to(len).freeze());
                    self.state = State::ReadingLength;
                }
            }
        }

        Ok(records)
    }

    /// Signal end of input. Fails if a record was left incomplete.
    pub fn finish(&self) -> Result<(), DecodeError> {
        match (self.state, self.buffer.len()) {
            (State::ReadingLength, 0) => Ok(()),
            (_, buffered) => Err(DecodeError::Truncated { buffered }),
        }
    }
}

fn parse_length(line: &[u8]) -> Result<usize, DecodeError> {
    if line.is_empty() || !line.iter().all(u8::is_ascii_digit) {
        return Err(DecodeError::InvalidLength(
            String::from_utf8_lossy(line).into_owned(),
        ));
    }
    // Only ASCII digits at this point; overflow is the remaining failure.
    std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| DecodeError::InvalidLength(String::from_utf8_lossy(line).into_owned()))
}

/// Frame a payload as a single RecordIO record.
pub fn encode_record(payload: &[u8]) -> Bytes {
    let prefix = format!("{}\n", payload.len());
    let mut out = BytesMut::with_capacity(prefix.len() + payload.len());
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(payload);
    out.freeze()
}

/// Typed events decoded from a chunked byte stream.
///
/// Yields events in wire order. After the first error the stream ends.
pub struct EventStream<S> {
    inner: S,
    decoder: RecordIoDecoder,
    pending: VecDeque<Bytes>,
    done: bool,
}

impl<S> EventStream<S>
where
    S: Stream<Item = Result<Bytes, io::Error>> + Unpin,
{
    pub fn new(inner: S, max_record_size: usize) -> Self {
        Self {
            inner,
            decoder: RecordIoDecoder::with_max_record_size(max_record_size),
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn fail(&mut self, err: DecodeError) -> Poll<Option<Result<Event, DecodeError>>> {
        self.done = true;
        self.pending.clear();
        Poll::Ready(Some(Err(err)))
    }
}

impl<S> Stream for EventStream<S>
where
    S: Stream<Item = Result<Bytes, io::Error>> + Unpin,
{
    type Item = Result<Event, DecodeError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(record) = this.pending.pop_front() {
                return match Event::decode(record) {
                    Ok(event) => Poll::Ready(Some(Ok(event))),
                    Err(e) => this.fail(e.into()),
                };
            }
            if this.done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => match this.decoder.push(&chunk) {
                    Ok(records) => this.pending.extend(records),
                    Err(e) => return this.fail(e),
                },
                Poll::Ready(Some(Err(e))) => return this.fail(e.into()),
                Poll::Ready(None) => {
                    this.done = true;
                    if let Err(e) = this.decoder.finish() {
                        return Poll::Ready(Some(Err(e)));
                    }
                    return Poll::Ready(None);
                }
            }
        }
    }
}
