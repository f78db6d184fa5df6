use super::protocol::{parse_line, Update};
use super::TelemetrySource;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Telemetry read from any byte stream (serial port, replay file, stdin).
///
/// A background thread decodes lines and forwards updates over a channel,
/// so `poll` never blocks the UI loop.
pub struct ReaderSource {
    rx:       mpsc::Receiver<Update>,
    finished: bool,
}

/// Holds recorded telemetry back until its ride time comes round on the
/// wall clock, so a replayed log plays at the speed it was ridden.
struct Pacer {
    origin: Option<(Instant, u64)>,
}

impl Pacer {
    fn wait_for(&mut self, update: Update) {
        let Update::RideTime(ms) = update else { return };
        let (start, first_ms) = *self.origin.get_or_insert((Instant::now(), ms));
        let due = start + Duration::from_millis(ms.saturating_sub(first_ms));
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
    }
}

impl ReaderSource {
    /// Live stream: updates are forwarded as soon as they are read.
    pub fn spawn<R>(name: &str, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::start(name, reader, None)
    }

    /// Recorded stream: updates are released in step with their `t=` values.
    pub fn spawn_paced<R>(name: &str, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::start(name, reader, Some(Pacer { origin: None }))
    }

    fn start<R>(name: &str, reader: R, pacer: Option<Pacer>) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let name = name.to_string();
        thread::spawn(move || read_loop(&name, reader, tx, pacer));
        Self { rx, finished: false }
    }
}

impl TelemetrySource for ReaderSource {
    fn poll(&mut self) -> Vec<Update> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(u) => out.push(u),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.finished = true;
                    break;
                }
            }
        }
        out
    }

    fn exhausted(&self) -> bool {
        self.finished
    }
}

fn read_loop<R: Read>(name: &str, reader: R, tx: mpsc::Sender<Update>, mut pacer: Option<Pacer>) {
    let mut reader = BufReader::new(reader);
    // Survives read timeouts so a line split across reads is not lost.
    let mut line: Vec<u8> = Vec::new();

    loop {
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                flush(&line, &tx, &mut pacer);
                tracing::info!(source = name, "telemetry stream ended");
                return;
            }
            Ok(_) => {
                if line.last() != Some(&b'\n') {
                    // EOF without trailing newline; next read returns 0.
                    continue;
                }
                if !flush(&line, &tx, &mut pacer) {
                    return;
                }
                line.clear();
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                continue;
            }
            Err(e) => {
                tracing::warn!(source = name, error = %e, "telemetry read failed");
                return;
            }
        }
    }
}

/// Decode one buffered line and forward it; false when the receiver is gone.
fn flush(line: &[u8], tx: &mpsc::Sender<Update>, pacer: &mut Option<Pacer>) -> bool {
    let text = String::from_utf8_lossy(line);
    match parse_line(&text) {
        Some(u) => {
            if let Some(p) = pacer {
                p.wait_for(u);
            }
            tx.send(u).is_ok()
        }
        None => true,
    }
}
