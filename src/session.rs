use std::fmt;
use std::io;
use std::time::Instant;

use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::warn;

use crate::command::{self, Command, Reply, StatusReply};
use crate::engine::{Engine, EngineError};
use crate::observability::{self, COMMANDS_TOTAL, COMMAND_DURATION_SECONDS, INVALID_LINES_TOTAL};

/// Errors that end a session. Per-line and per-command failures never reach here.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write reply: {0}")]
    Write(#[from] LinesCodecError),
}

/// Why a raw input line never reached the command parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineFault {
    #[error("input line exceeds {max} bytes")]
    TooLong { max: usize },
    #[error("input line is not valid UTF-8")]
    NotUtf8,
}

/// Newline framing that reports overlong and non-UTF-8 lines as items, so
/// the stream keeps going. Only read failures surface as errors.
pub struct CommandLines {
    inner: LinesCodec,
    max: usize,
}

impl CommandLines {
    pub fn new(max_line_len: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_line_len),
            max: max_line_len,
        }
    }

    fn recover(
        &self,
        decoded: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Result<String, LineFault>>, io::Error> {
        match decoded {
            Ok(line) => Ok(line.map(Ok)),
            // The inner codec discards the rest of the line on the next call
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                Ok(Some(Err(LineFault::TooLong { max: self.max })))
            }
            // Already split off the buffer, so framing resumes at the next line
            Err(LinesCodecError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                Ok(Some(Err(LineFault::NotUtf8)))
            }
            Err(LinesCodecError::Io(e)) => Err(e),
        }
    }
}

impl Decoder for CommandLines {
    type Item = Result<String, LineFault>;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let decoded = self.inner.decode(buf);
        self.recover(decoded)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let decoded = self.inner.decode_eof(buf);
        self.recover(decoded)
    }
}

/// Counters for one run over an input stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines read, blank ones included.
    pub lines: u64,
    /// Non-blank lines handled as commands.
    pub commands: u64,
    /// Reply lines written.
    pub replies: u64,
    /// Commands answered with an error reply.
    pub failures: u64,
}

/// Run a decoded command against the engine. `None` means the command is silent.
pub fn execute_command(engine: &mut Engine, cmd: Command) -> Result<Option<Reply>, EngineError> {
    match cmd {
        Command::Room { venue, room, size } => {
            engine.add_room(&venue, &room, size)?;
            Ok(None)
        }
        Command::Request(req) => {
            let outcome = engine.request(&req.id, req.start, req.end, req.demand())?;
            Ok(Some(outcome.into()))
        }
        Command::Change(req) => {
            let outcome = engine.change(&req.id, req.start, req.end, req.demand())?;
            Ok(Some(outcome.into()))
        }
        Command::Cancel { id } => {
            engine.cancel(&id)?;
            Ok(None)
        }
        Command::List { venue } => Ok(Some(Reply::Rooms(engine.list(&venue)?))),
    }
}

/// Decode and execute one raw input line.
///
/// Blank lines and silent commands yield `None`. Malformed lines and
/// precondition failures yield an error reply and leave the engine untouched.
pub fn handle_line(engine: &mut Engine, line: &str, stats: &mut SessionStats) -> Option<Reply> {
    if line.trim().is_empty() {
        return None;
    }
    stats.commands += 1;

    let cmd = match command::parse_command(line) {
        Ok(cmd) => cmd,
        Err(e) => return Some(reject_line(e, stats)),
    };

    let label = observability::command_label(&cmd);
    let started = Instant::now();
    let result = execute_command(engine, cmd);
    metrics::histogram!(COMMAND_DURATION_SECONDS, "command" => label)
        .record(started.elapsed().as_secs_f64());

    match result {
        Ok(reply) => {
            let status = match &reply {
                Some(Reply::Status(StatusReply::Rejected)) => "rejected",
                _ => "ok",
            };
            metrics::counter!(COMMANDS_TOTAL, "command" => label, "status" => status).increment(1);
            reply
        }
        Err(e) => {
            warn!("line {}: {label} failed: {e}", stats.lines);
            metrics::counter!(COMMANDS_TOTAL, "command" => label, "status" => "error").increment(1);
            stats.failures += 1;
            Some(Reply::error(e))
        }
    }
}

/// Error reply for a line that could not be decoded into a command.
pub fn reject_line(reason: impl fmt::Display, stats: &mut SessionStats) -> Reply {
    warn!("line {}: {reason}", stats.lines);
    metrics::counter!(INVALID_LINES_TOTAL).increment(1);
    stats.failures += 1;
    Reply::error(reason)
}

/// Read newline-delimited commands from `reader` until end of input, writing
/// one reply line to `writer` per reply-producing command, in input order.
pub async fn process_stream<R, W>(
    reader: R,
    writer: W,
    engine: &mut Engine,
    max_line_len: usize,
) -> Result<SessionStats, SessionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(reader, CommandLines::new(max_line_len));
    let mut out = FramedWrite::new(writer, LinesCodec::new());
    let mut stats = SessionStats::default();

    while let Some(frame) = lines.next().await {
        let frame = frame?;
        stats.lines += 1;
        let reply = match frame {
            Ok(line) => handle_line(engine, &line, &mut stats),
            Err(fault) => {
                stats.commands += 1;
                Some(reject_line(fault, &mut stats))
            }
        };
        if let Some(reply) = reply {
            out.send(reply.to_json()?).await?;
            stats.replies += 1;
        }
    }

    SinkExt::<String>::close(&mut out).await?;
    Ok(stats)
}
