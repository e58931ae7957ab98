// Passbook — Operator console
//
// Line-oriented input and output for a session. Both directions use the
// session encoding, so an operator on a Big5 terminal can answer prompts.

use std::io::{self, BufRead, Write};

/// Console text encoding, switched with `B` and `U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Big5,
    Utf8,
}

impl Encoding {
    fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            Encoding::Big5 => encoding_rs::BIG5,
            Encoding::Utf8 => encoding_rs::UTF_8,
        }
    }

    /// A line Big5 cannot represent is written as UTF-8 instead of with
    /// numeric character references.
    fn encode(self, text: &str) -> Vec<u8> {
        if self == Encoding::Utf8 {
            return text.as_bytes().to_vec();
        }

        let (bytes, _, unmappable) = self.codec().encode(text);
        if unmappable {
            tracing::warn!(encoding = ?self, "Line not representable in session encoding, written as UTF-8");
            return text.as_bytes().to_vec();
        }
        bytes.into_owned()
    }

    fn decode(self, bytes: &[u8]) -> String {
        let (text, malformed) = self.codec().decode_without_bom_handling(bytes);
        if malformed {
            tracing::warn!(encoding = ?self, "Input line was not valid in session encoding");
        }
        text.into_owned()
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
    encoding: Encoding,
}

impl Console<io::StdinLock<'static>, io::StdoutLock<'static>> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout().lock())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            encoding: Encoding::default(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Write one line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        let bytes = self.encoding.encode(text);
        self.output.write_all(&bytes)?;
        self.output.write_all(b"\n")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        self.output.write_all(b"\n")
    }

    /// Read one line without its line terminator, decoded with the session
    /// encoding. EOF reads as "".
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.input.read_until(b'\n', &mut buf)?;
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        Ok(self.encoding.decode(&buf))
    }

    /// Print `label` without a newline, then read the answer.
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        let bytes = self.encoding.encode(label);
        self.output.write_all(&bytes)?;
        self.output.flush()?;
        self.read_line()
    }
}
