// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Literal parsing for opaque payloads.

JSON is tried first. Payloads produced by older clients use a literal
syntax with single-quoted strings, `True`/`False`/`None`, tuples and
trailing commas; those are accepted as well and mapped onto JSON values
(tuples become arrays, non-string dict keys become their text).
*/

use serde_json::{Map, Number, Value as JsonValue};

/// Parse `text` as a JSON or legacy literal.
pub fn parse_literal(text: &str) -> Result<JsonValue, String> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let mut parser = Parser {
        chars: text.char_indices().peekable(),
        text,
    };

    let value = parser.value()?;
    parser.skip_whitespace();
    match parser.chars.next() {
        None => Ok(value),
        Some((at, c)) => Err(format!("unexpected {:?} at offset {}", c, at)),
    }
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    text: &'a str,
}

impl<'a> Parser<'a> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.peek().map(|(_, c)| *c)
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((at, c)) => Err(format!(
                "expected {:?} but found {:?} at offset {}",
                expected, c, at
            )),
            None => Err(format!("expected {:?} but reached the end", expected)),
        }
    }

    fn value(&mut self) -> Result<JsonValue, String> {
        match self.peek() {
            None => Err("unexpected end of literal".to_owned()),
            Some('{') => self.dict(),
            Some('[') => Ok(JsonValue::Array(self.sequence('[', ']')?)),
            Some('(') => Ok(JsonValue::Array(self.sequence('(', ')')?)),
            Some(quote @ ('\'' | '"')) => Ok(JsonValue::String(self.string(quote)?)),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_alphabetic() => self.keyword(),
            Some(c) => Err(format!("unexpected {:?}", c)),
        }
    }

    fn sequence(&mut self, open: char, close: char) -> Result<Vec<JsonValue>, String> {
        self.expect(open)?;
        let mut items = vec![];

        loop {
            if self.peek() == Some(close) {
                self.chars.next();
                return Ok(items);
            }

            items.push(self.value()?);

            match self.peek() {
                Some(',') => {
                    self.chars.next();
                }
                Some(c) if c == close => {}
                Some(c) => return Err(format!("expected ',' or {:?} but found {:?}", close, c)),
                None => return Err(format!("unterminated sequence, expected {:?}", close)),
            }
        }
    }

    fn dict(&mut self) -> Result<JsonValue, String> {
        self.expect('{')?;
        let mut map = Map::new();

        loop {
            if self.peek() == Some('}') {
                self.chars.next();
                return Ok(JsonValue::Object(map));
            }

            let key = match self.value()? {
                JsonValue::String(key) => key,
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    return Err("dict keys must be scalars".to_owned())
                }
                other => other.to_string(),
            };

            self.skip_whitespace();
            self.expect(':')?;
            let value = self.value()?;
            map.insert(key, value);

            match self.peek() {
                Some(',') => {
                    self.chars.next();
                }
                Some('}') => {}
                Some(c) => return Err(format!("expected ',' or '}}' but found {:?}", c)),
                None => return Err("unterminated dict".to_owned()),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, String> {
        self.expect(quote)?;
        let mut out = String::new();

        loop {
            let Some((_, c)) = self.chars.next() else {
                return Err("unterminated string".to_owned());
            };

            match c {
                c if c == quote => return Ok(out),
                '\\' => {
                    let Some((_, escaped)) = self.chars.next() else {
                        return Err("unterminated escape".to_owned());
                    };

                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        'x' => out.push(self.code_point(2)?),
                        'u' => out.push(self.code_point(4)?),
                        'U' => out.push(self.code_point(8)?),
                        other => out.push(other),
                    }
                }
                c => out.push(c),
            }
        }
    }

    fn code_point(&mut self, digits: usize) -> Result<char, String> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.chars.next() {
                Some((_, c)) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return Err(format!("expected {} hex digits in escape", digits)),
            }
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| format!("invalid code point \\{}", hex))
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.chars.peek().map_or(self.text.len(), |(at, _)| *at);
        let mut end = start;
        while let Some((at, c)) = self.chars.next_if(|(_, c)| accept(*c)) {
            end = at + c.len_utf8();
        }

        &self.text[start..end]
    }

    fn number(&mut self) -> Result<JsonValue, String> {
        let token = self
            .take_while(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_'))
            .replace('_', "");
        let token = token.strip_prefix('+').unwrap_or(&token);

        if let Ok(v) = token.parse::<i64>() {
            return Ok(JsonValue::from(v));
        }

        if let Ok(v) = token.parse::<u64>() {
            return Ok(JsonValue::from(v));
        }

        token
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(JsonValue::Number)
            .ok_or_else(|| format!("invalid number {:?}", token))
    }

    fn keyword(&mut self) -> Result<JsonValue, String> {
        match self.take_while(|c| c.is_alphanumeric() || c == '_') {
            "True" | "true" => Ok(JsonValue::Bool(true)),
            "False" | "false" => Ok(JsonValue::Bool(false)),
            "None" | "null" => Ok(JsonValue::Null),
            other => Err(format!("unknown name {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_literal;
    use serde_json::json;

    #[test]
    fn json_first() {
        assert_eq!(parse_literal(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse_literal("[1, 2, 3]").unwrap(), json!([1, 2, 3]));
        assert_eq!(parse_literal("42").unwrap(), json!(42));
    }

    #[test]
    fn legacy_literals() {
        assert_eq!(
            parse_literal("{'a': 1, 'b': [True, None, 2.5], 'c': (1, 2,)}").unwrap(),
            json!({"a": 1, "b": [true, null, 2.5], "c": [1, 2]})
        );
        assert_eq!(parse_literal("'it\\'s'").unwrap(), json!("it's"));
        assert_eq!(parse_literal("{1: 'x'}").unwrap(), json!({"1": "x"}));
        assert_eq!(parse_literal("-3").unwrap(), json!(-3));
        assert_eq!(parse_literal("()").unwrap(), json!([]));
    }

    #[test]
    fn malformed() {
        assert!(parse_literal("abc").is_err());
        assert!(parse_literal("[1, 2").is_err());
        assert!(parse_literal("{'a' 1}").is_err());
        assert!(parse_literal("[1] x").is_err());
        assert!(parse_literal("").is_err());
    }
}
