//! Page output stream with document-write semantics.
//!
//! Text is accepted only while the document is still being parsed. Once
//! [`DocumentStream::finish_loading`] has been called every write is a
//! no-op: nothing is inserted and nothing already written is replaced.

use std::io::{
  self,
  Write
};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
  Parsing,
  Loaded
}

#[derive(Debug, Clone)]
pub struct DocumentStream {
  state: DocumentState,
  buf:   String
}

impl Default for DocumentStream {
  fn default() -> Self {
    Self::new()
  }
}

impl DocumentStream {
  #[must_use]
  pub fn new() -> Self {
    Self {
      state: DocumentState::Parsing,
      buf:   String::new()
    }
  }

  #[must_use]
  pub fn state(&self) -> DocumentState {
    self.state
  }

  /// Inserts `text` at the current position.
  ///
  /// Returns whether anything was inserted.
  pub fn write(
    &mut self,
    text: &str
  ) -> bool {
    match self.state {
      | DocumentState::Parsing => {
        self.buf.push_str(text);
        true
      }
      | DocumentState::Loaded => {
        debug!(
          bytes = text.len(),
          "document already loaded; write dropped"
        );
        false
      }
    }
  }

  /// Writes the label if there is one; `None` emits nothing.
  pub fn write_label(
    &mut self,
    label: Option<&str>
  ) -> bool {
    match label {
      | Some(text) => self.write(text),
      | None => false
    }
  }

  pub fn finish_loading(&mut self) {
    self.state = DocumentState::Loaded;
  }

  #[must_use]
  pub fn contents(&self) -> &str {
    &self.buf
  }

  /// Copies everything written so far into `out`.
  pub fn flush_to<W: Write>(
    &self,
    out: &mut W
  ) -> io::Result<()> {
    out.write_all(self.buf.as_bytes())?;
    out.flush()
  }
}
