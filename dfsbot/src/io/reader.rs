//! Non-blocking intake of observation lines.
//!
//! A dedicated thread performs the blocking reads and forwards complete,
//! newline-terminated lines through a bounded queue. The tick loop drains that
//! queue without ever waiting for more input.

use std::io::{self, BufRead, BufReader, Read};
use std::sync::mpsc::{Receiver, SyncSender, TryRecvError, sync_channel};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// A line together with the instant the reader thread queued it.
#[derive(Debug)]
struct Stamped {
    line: String,
    at: Instant,
}

pub struct ProtocolReader {
    rx: Receiver<io::Result<Stamped>>,
    /// Line received during a drain but queued after that drain's cutoff.
    pending: Option<Stamped>,
    closed: bool,
}

impl ProtocolReader {
    /// Spawn the reader thread over `input`.
    pub fn spawn<R: Read + Send + 'static>(input: R, capacity: usize) -> Result<Self> {
        let (tx, rx) = sync_channel(capacity);
        thread::Builder::new()
            .name("observation-reader".to_string())
            .spawn(move || read_lines(input, tx))
            .context("spawn observation reader thread")?;
        Ok(Self {
            rx,
            pending: None,
            closed: false,
        })
    }

    /// Take every complete line queued at or before `cutoff`.
    ///
    /// Never blocks. Lines queued after `cutoff` stay for the next drain.
    pub fn drain(&mut self, cutoff: Instant) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        if let Some(stamped) = self.pending.take() {
            if stamped.at > cutoff {
                self.pending = Some(stamped);
                return Ok(lines);
            }
            lines.push(stamped.line);
        }
        loop {
            match self.rx.try_recv() {
                Ok(Ok(stamped)) => {
                    if stamped.at > cutoff {
                        self.pending = Some(stamped);
                        break;
                    }
                    lines.push(stamped.line);
                }
                Ok(Err(err)) => return Err(err).context("read observation input"),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        warn!("observation input closed");
                        self.closed = true;
                    }
                    break;
                }
            }
        }
        Ok(lines)
    }

    /// True once the input reached end-of-stream and every line was drained.
    pub fn is_closed(&self) -> bool {
        self.closed && self.pending.is_none()
    }
}

/// Invalid UTF-8 is decoded lossily so such lines fall through as unrecognized.
fn read_lines<R: Read>(input: R, tx: SyncSender<io::Result<Stamped>>) {
    let mut reader = BufReader::new(input);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                if !text.ends_with('\n') {
                    debug!(partial = %text, "dropping unterminated trailing line");
                    break;
                }
                let line = text.trim_end_matches(['\n', '\r']).to_string();
                let stamped = Stamped {
                    line,
                    at: Instant::now(),
                };
                if tx.send(Ok(stamped)).is_err() {
                    break;
                }
            }
            Err(err) => {
                let _ = tx.send(Err(err));
                break;
            }
        }
    }
}
