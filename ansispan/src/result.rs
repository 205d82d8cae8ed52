//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//


//! Error types for the ansispan crate.
//!
//! Parsing styled text never fails: malformed escape input is recovered in
//! place. Errors only surface at the edges, when bytes arrive from a stream or
//! when a serialized style key is resolved into a decoration.

use thiserror::Error;

/// Result type alias for operations that may fail with an [`AnsiSpanError`].
pub type AnsiSpanResult<T> = Result<T, AnsiSpanError>;

/// Errors that can occur around ANSI span processing.
#[derive(Debug, Error)]
pub enum AnsiSpanError {
    /// I/O error from the underlying reader
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 sequence encountered at the specified byte position of a line.
    #[error("Invalid UTF-8 sequence at position {position}")]
    InvalidUtf8 {
        /// The byte position where the invalid UTF-8 was encountered
        position: usize,
    },

    /// A style key could not be deserialized back into a style.
    #[error("Malformed style key '{key}': {source}")]
    MalformedStyleKey {
        /// The offending key
        key: String,
        /// Deserialization failure
        #[source]
        source: serde_json::Error,
    },

    /// The decoration registry produced nothing for a style key.
    #[error("No decoration resolved for style key '{key}'")]
    UnresolvedStyle {
        /// The key that could not be resolved
        key: String,
    },

    /// A buffered line exceeded the configured maximum length.
    #[error("Line too long: {length} bytes (maximum allowed: {max})")]
    LineTooLong {
        /// Length of the line, or of its buffered part if no `\n` has arrived yet
        length: usize,
        /// The maximum allowed length
        max: usize,
    },
}

impl AnsiSpanError {
    /// Check if the error only affects a single style key
    ///
    /// Key-level errors are logged and skipped by the decoration provider,
    /// everything else is reported to the caller.
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            AnsiSpanError::MalformedStyleKey { .. } | AnsiSpanError::UnresolvedStyle { .. }
        )
    }

    /// Check if the error came from the input stream
    pub fn is_stream_error(&self) -> bool {
        matches!(
            self,
            AnsiSpanError::Io(_)
                | AnsiSpanError::InvalidUtf8 { .. }
                | AnsiSpanError::LineTooLong { .. }
        )
    }
}
