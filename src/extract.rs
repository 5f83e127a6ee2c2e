// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Scanner that finds exported function declarations in C++ source text.
//!
//! A declaration is recognised by the shape
//! `MARKER return-type name ( argument-list )`, where the argument list may
//! span several lines and contain nested `()`, `<>` and `[]` groups. Marker
//! occurrences inside comments or string literals are ignored, and a marker
//! that is not followed by that shape is skipped without error.

/// Default annotation placed in front of every exported UDF.
pub const DEFAULT_MARKER: &str = "IMPALA_UDF_EXPORT";

/// One matched declaration, before its arguments are decomposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  pub return_type: String,
  pub name: String,
  /// Raw text between the outer parentheses, trimmed.
  pub arguments: String,
  /// 1-based line of the marker.
  pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Code,
  LineComment,
  BlockComment,
  Literal(u8),
}

/// Scans `source` and returns every declaration annotated with `marker`, in
/// source order. An empty result is not an error.
pub fn extract_declarations(source: &str, marker: &str) -> Vec<Declaration> {
  let bytes = source.as_bytes();
  let marker = marker.as_bytes();
  let mut declarations = Vec::new();
  let mut state = State::Code;
  let mut line = 1;
  let mut pos = 0;

  if marker.is_empty() {
    return declarations;
  }

  while pos < bytes.len() {
    let b = bytes[pos];
    match state {
      State::Code => {
        if bytes[pos..].starts_with(b"//") {
          state = State::LineComment;
          pos += 2;
          continue;
        }
        if bytes[pos..].starts_with(b"/*") {
          state = State::BlockComment;
          pos += 2;
          continue;
        }
        if b == b'"' || b == b'\'' {
          state = State::Literal(b);
        } else if bytes[pos..].starts_with(marker) && is_word_match(bytes, pos, marker.len()) {
          let after = pos + marker.len();
          match parse_declaration(source, after) {
            Some((mut declaration, end)) => {
              declaration.line = line;
              tracing::trace!(name = %declaration.name, line, "Matched declaration");
              line += count_newlines(&bytes[pos..end]);
              declarations.push(declaration);
              pos = end;
            }
            None => {
              tracing::debug!(line, "Marker not followed by a function declaration. Skipping.");
              pos = after;
            }
          }
          continue;
        }
      }
      State::LineComment => {
        if b == b'\n' {
          state = State::Code;
        }
      }
      State::BlockComment => {
        if bytes[pos..].starts_with(b"*/") {
          state = State::Code;
          pos += 2;
          continue;
        }
      }
      State::Literal(quote) => {
        if b == b'\\' {
          if bytes.get(pos + 1) == Some(&b'\n') {
            line += 1;
          }
          pos += 2;
          continue;
        }
        // Unterminated literals end at the line break.
        if b == quote || b == b'\n' {
          state = State::Code;
        }
      }
    }
    if b == b'\n' {
      line += 1;
    }
    pos += 1;
  }

  declarations
}

/// Parses `return-type name ( ... )` starting right after a marker.
/// Returns the declaration and the byte offset just past the closing paren.
fn parse_declaration(source: &str, start: usize) -> Option<(Declaration, usize)> {
  let bytes = source.as_bytes();

  let mut pos = skip_whitespace(bytes, start);
  if pos == start {
    return None;
  }

  let type_start = pos;
  pos = scan_type(bytes, pos)?;
  let return_type_end = pos;

  let after_type = skip_whitespace(bytes, pos);
  let mut sigils_end = after_type;
  while matches!(bytes.get(sigils_end), Some(b'*' | b'&')) {
    sigils_end += 1;
  }
  if after_type == pos && sigils_end == after_type {
    return None;
  }
  let return_type = format!(
    "{}{}",
    &source[type_start..return_type_end],
    &source[after_type..sigils_end]
  );

  pos = skip_whitespace(bytes, sigils_end);
  let name_start = pos;
  pos = scan_identifier(bytes, pos)?;
  let name = source[name_start..pos].to_string();

  pos = skip_whitespace(bytes, pos);
  if bytes.get(pos) != Some(&b'(') {
    return None;
  }
  let (arguments, args_end) = scan_argument_list(bytes, pos + 1)?;

  Some((
    Declaration {
      return_type,
      name,
      arguments: arguments.trim().to_string(),
      line: 0,
    },
    args_end + 1,
  ))
}

/// A type is a (possibly `::`-qualified) identifier with an optional
/// balanced `<...>` argument list.
fn scan_type(bytes: &[u8], start: usize) -> Option<usize> {
  let mut pos = start;
  while pos < bytes.len() && (is_ident_byte(bytes[pos]) || bytes[pos] == b':') {
    pos += 1;
  }
  if pos == start || bytes[start].is_ascii_digit() {
    return None;
  }
  if bytes.get(pos) == Some(&b'<') {
    let mut depth = 0usize;
    while pos < bytes.len() {
      match bytes[pos] {
        b'<' => depth += 1,
        b'>' => {
          depth -= 1;
          if depth == 0 {
            return Some(pos + 1);
          }
        }
        b';' | b'{' | b'}' => return None,
        _ => {}
      }
      pos += 1;
    }
    return None;
  }
  Some(pos)
}

fn scan_identifier(bytes: &[u8], start: usize) -> Option<usize> {
  match bytes.get(start) {
    Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
    _ => return None,
  }
  let mut pos = start + 1;
  while pos < bytes.len() && is_ident_byte(bytes[pos]) {
    pos += 1;
  }
  Some(pos)
}

/// Finds the `)` matching an already-consumed `(` and returns the text in
/// between, with every comment replaced by a single space. Brackets of every
/// kind must balance; a stray `;`, `{` or `}` outside comments and literals
/// aborts the match.
fn scan_argument_list(bytes: &[u8], start: usize) -> Option<(String, usize)> {
  let mut text = Vec::new();
  let mut state = State::Code;
  let mut depth = 1usize;
  let mut pos = start;

  while pos < bytes.len() {
    let b = bytes[pos];
    match state {
      State::Code => {
        if bytes[pos..].starts_with(b"//") {
          state = State::LineComment;
          text.push(b' ');
          pos += 2;
          continue;
        }
        if bytes[pos..].starts_with(b"/*") {
          state = State::BlockComment;
          text.push(b' ');
          pos += 2;
          continue;
        }
        match b {
          b'"' | b'\'' => state = State::Literal(b),
          b'(' => depth += 1,
          b')' => {
            depth -= 1;
            if depth == 0 {
              return String::from_utf8(text).ok().map(|text| (text, pos));
            }
          }
          b';' | b'{' | b'}' => return None,
          _ => {}
        }
        text.push(b);
      }
      State::LineComment => {
        if b == b'\n' {
          state = State::Code;
          text.push(b);
        }
      }
      State::BlockComment => {
        if bytes[pos..].starts_with(b"*/") {
          state = State::Code;
          pos += 2;
          continue;
        }
      }
      State::Literal(quote) => {
        if b == b'\\' {
          text.extend_from_slice(&bytes[pos..(pos + 2).min(bytes.len())]);
          pos += 2;
          continue;
        }
        if b == quote || b == b'\n' {
          state = State::Code;
        }
        text.push(b);
      }
    }
    pos += 1;
  }
  None
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
  while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
    pos += 1;
  }
  pos
}

fn is_ident_byte(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_'
}

fn is_word_match(bytes: &[u8], pos: usize, len: usize) -> bool {
  let before = pos == 0 || !is_ident_byte(bytes[pos - 1]);
  let after = bytes.get(pos + len).is_none_or(|b| !is_ident_byte(*b));
  before && after
}

fn count_newlines(bytes: &[u8]) -> usize {
  bytes.iter().filter(|b| **b == b'\n').count()
}
