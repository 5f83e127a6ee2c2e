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
//! Splits a raw argument list into ordered `(type, name)` pairs.
use crate::error::ArgumentParseError;
use crate::extract::Declaration;

/// Qualifiers that carry no information for benchmarking.
const QUALIFIERS: &[&str] = &["const", "volatile"];

/// Number of leading tokens (context handle type and name) that are never
/// benchmarked.
pub const CONTEXT_PREFIX_TOKENS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
  pub arg_type: String,
  pub name: String,
}

/// A declaration with its user-benchmarkable arguments, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
  pub name: String,
  pub arguments: Vec<Argument>,
}

impl TryFrom<&Declaration> for FunctionSignature {
  type Error = ArgumentParseError;

  fn try_from(declaration: &Declaration) -> Result<Self, Self::Error> {
    decompose(&declaration.name, &declaration.arguments)
  }
}

/// Tokenizes `arguments`, drops the context prefix and pairs the remaining
/// tokens as `type name`.
pub fn decompose(function: &str, arguments: &str) -> Result<FunctionSignature, ArgumentParseError> {
  let tokens = tokenize(arguments);

  if tokens.len() < CONTEXT_PREFIX_TOKENS {
    return Err(ArgumentParseError::MissingContext {
      function: function.to_string(),
      tokens: tokens.len(),
    });
  }

  let rest = &tokens[CONTEXT_PREFIX_TOKENS..];
  if rest.len() % 2 != 0 {
    return Err(ArgumentParseError::OddTokenCount {
      function: function.to_string(),
      tokens: rest.len(),
      arguments: rest.join(" "),
    });
  }

  let arguments = rest
    .chunks_exact(2)
    .map(|pair| Argument {
      arg_type: pair[0].clone(),
      name: pair[1].clone(),
    })
    .collect();

  Ok(FunctionSignature {
    name: function.to_string(),
    arguments,
  })
}

/// Splits on top-level commas and whitespace, discarding `*`/`&` sigils and
/// qualifier keywords. Anything nested in `<>`, `()` or `[]` stays within a
/// single token, with inner whitespace collapsed.
pub fn tokenize(arguments: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut current = String::new();
  let mut depth = 0usize;

  for c in arguments.chars() {
    if depth > 0 {
      match c {
        '<' | '(' | '[' => depth += 1,
        '>' | ')' | ']' => depth -= 1,
        _ => {}
      }
      if c.is_whitespace() {
        if !current.ends_with(' ') {
          current.push(' ');
        }
      } else {
        current.push(c);
      }
      continue;
    }

    match c {
      ',' | '*' | '&' => flush(&mut current, &mut tokens),
      c if c.is_whitespace() => flush(&mut current, &mut tokens),
      '<' | '(' | '[' => {
        depth += 1;
        current.push(c);
      }
      _ => current.push(c),
    }
  }
  flush(&mut current, &mut tokens);

  tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
  if current.is_empty() {
    return;
  }
  let token = std::mem::take(current);
  if !QUALIFIERS.contains(&token.as_str()) {
    tokens.push(token);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn arg(arg_type: &str, name: &str) -> Argument {
    Argument {
      arg_type: arg_type.to_string(),
      name: name.to_string(),
    }
  }

  #[test]
  fn strips_qualifiers_and_sigils() {
    assert_eq!(
      tokenize("FunctionContext* context, const StringVal& s, int n"),
      ["FunctionContext", "context", "StringVal", "s", "int", "n"]
    );
    assert_eq!(
      tokenize("FunctionContext *context, const StringVal &listVal,\n    const char * const p"),
      ["FunctionContext", "context", "StringVal", "listVal", "char", "p"]
    );
  }

  #[test]
  fn keeps_nested_types_whole() {
    assert_eq!(
      tokenize("FunctionContext* ctx, std::map<int,   std::pair<int, int>> m"),
      ["FunctionContext", "ctx", "std::map<int, std::pair<int, int>>", "m"]
    );
  }

  #[test]
  fn drops_context_prefix() {
    let sig = decompose("myFun", "FunctionContext* context, const StringVal& s, int n").unwrap();
    assert_eq!(sig.name, "myFun");
    assert_eq!(sig.arguments, vec![arg("StringVal", "s"), arg("int", "n")]);
  }

  #[test]
  fn context_only_has_no_arguments() {
    let sig = decompose("nt_id", "FunctionContext* context").unwrap();
    assert!(sig.arguments.is_empty());
  }

  #[test]
  fn odd_token_count_is_an_error() {
    let err = decompose("f", "FunctionContext* context, unsigned int n").unwrap_err();
    assert_eq!(
      err,
      ArgumentParseError::OddTokenCount {
        function: "f".to_string(),
        tokens: 3,
        arguments: "unsigned int n".to_string(),
      }
    );
  }

  #[test]
  fn missing_context_is_an_error() {
    assert!(matches!(
      decompose("g", ""),
      Err(ArgumentParseError::MissingContext { tokens: 0, .. })
    ));
    assert!(matches!(
      decompose("g", "void"),
      Err(ArgumentParseError::MissingContext { tokens: 1, .. })
    ));
  }

  #[test]
  fn converts_from_declaration() {
    let decl = Declaration {
      return_type: "IntVal".to_string(),
      name: "Hamming_Distance".to_string(),
      arguments: "FunctionContext *context, const StringVal &a, const StringVal &b".to_string(),
      line: 1,
    };
    let sig = FunctionSignature::try_from(&decl).unwrap();
    assert_eq!(sig.arguments, vec![arg("StringVal", "a"), arg("StringVal", "b")]);
  }
}
