//! Serial number input stream
//!
//! Reads whitespace-separated integers from any buffered reader. The stream ends
//! at EOF or wherever an integer cannot be read. A token with trailing junk such
//! as `1000005x` still yields its leading integer; the junk then ends the stream.

use std::collections::VecDeque;
use std::io::BufRead;

use tracing::{debug, warn};

/// Iterator over raw serial numbers typed at the desk
#[derive(Debug)]
pub struct SerialReader<R> {
    reader: R,
    pending: VecDeque<String>,
    finished: bool,
}

impl<R: BufRead> SerialReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self { reader, pending: VecDeque::new(), finished: false }
    }

    /// Whether the stream has ended
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn next_token(&mut self) -> Option<String> {
        while self.pending.is_empty() {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => self.pending.extend(line.split_whitespace().map(str::to_string)),
                Err(e) => {
                    warn!("Input stream failed, treating as closed: {}", e);
                    return None;
                }
            }
        }
        self.pending.pop_front()
    }
}

impl<R: BufRead> Iterator for SerialReader<R> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }

        let parsed = self.next_token().and_then(|token| match split_leading_integer(&token) {
            Some((value, rest)) => {
                if !rest.is_empty() {
                    self.pending.push_front(rest.to_string());
                }
                Some(value)
            }
            None => {
                debug!(token = %token, "Non-numeric input ends the stream");
                None
            }
        });

        if parsed.is_none() {
            self.finished = true;
        }
        parsed
    }
}

/// Split an optionally signed leading integer off `token`
///
/// Returns `None` when there are no leading digits or the value does not fit.
fn split_leading_integer(token: &str) -> Option<(i64, &str)> {
    let sign_len = usize::from(token.starts_with(['+', '-']));
    let digits = token[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let end = sign_len + digits;
    let value = token[..end].parse::<i64>().ok()?;
    Some((value, &token[end..]))
}
