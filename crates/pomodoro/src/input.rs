//! Keyboard input
//!
//! A dedicated thread blocks on raw reads from stdin, decodes each keypress
//! and publishes it on an unbounded channel. Whichever controller owns the
//! screen consumes the events in order.

use std::io::{self, Read};
use std::thread;
use tokio::sync::mpsc;

/// Bytes requested from stdin per read call
const READ_CHUNK: usize = 64;

/// Discrete keys the UI reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    MoveUp,
    MoveDown,
    Confirm,
    Terminate,
}

pub type InputSender = mpsc::UnboundedSender<io::Result<KeyEvent>>;
pub type InputReceiver = mpsc::UnboundedReceiver<io::Result<KeyEvent>>;

/// Result of decoding the front of the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A key, and how many bytes it used
    Key(KeyEvent, usize),
    /// Bytes that mean nothing to us
    Skip(usize),
    /// A partial escape sequence; wait for more input
    Incomplete,
}

/// Decode the keypress at the start of `bytes`
pub fn decode(bytes: &[u8]) -> Decoded {
    match bytes {
        [] | [0x1b] | [0x1b, b'['] => Decoded::Incomplete,
        [0x1b, b'[', b'A', ..] => Decoded::Key(KeyEvent::MoveUp, 3),
        [0x1b, b'[', b'B', ..] => Decoded::Key(KeyEvent::MoveDown, 3),
        [0x1b, b'[', _, ..] => Decoded::Skip(3),
        [b'\r', ..] => Decoded::Key(KeyEvent::Confirm, 1),
        [0x03, ..] => Decoded::Key(KeyEvent::Terminate, 1),
        _ => Decoded::Skip(1),
    }
}

/// Start the reader thread on stdin and return the receiving end
pub fn spawn_reader() -> io::Result<InputReceiver> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("input-reader".to_string())
        .spawn(move || read_keys(io::stdin().lock(), tx))?;
    Ok(rx)
}

/// Read keypresses until the source fails, closes, or nobody listens.
///
/// Several keys may arrive in one read and an escape sequence may be split
/// across reads, so undecoded bytes are carried over to the next read.
/// A read error is forwarded once and ends the loop. End of input simply
/// drops the sender, which the consumer sees as a closed channel.
pub fn read_keys<R: Read>(mut reader: R, tx: InputSender) {
    let mut buf = [0u8; READ_CHUNK];
    let mut pending: Vec<u8> = Vec::new();
    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                tracing::warn!("stdin reached end of input");
                return;
            }
            Ok(n) => {
                pending.extend_from_slice(&buf[..n]);
                if !publish_keys(&mut pending, &tx) {
                    return;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::error!("stdin read failed: {e}");
                let _ = tx.send(Err(e));
                return;
            }
        }
    }
}

/// Send every complete key in `pending`, keeping a trailing partial
/// sequence. Returns false once the receiver is gone.
fn publish_keys(pending: &mut Vec<u8>, tx: &InputSender) -> bool {
    let mut used = 0;
    let mut open = true;
    while open {
        match decode(&pending[used..]) {
            Decoded::Key(key, len) => {
                used += len;
                open = tx.send(Ok(key)).is_ok();
            }
            Decoded::Skip(len) => {
                tracing::trace!(bytes = ?&pending[used..used + len], "ignoring unknown key sequence");
                used += len;
            }
            Decoded::Incomplete => break,
        }
    }
    pending.drain(..used);
    open
}
