//! Quote-aware tokenizer for curl-style command lines.

use winnow::{
    ModalResult, Parser,
    combinator::{alt, cut_err, opt, preceded, repeat},
    token::{any, one_of, take_till, take_while},
};

use crate::error::ParseError;

fn whitespace<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    take_while(0.., char::is_whitespace).parse_next(s)
}

fn unescaped_chunk<'a>(s: &mut &'a str, quote: char) -> ModalResult<&'a str> {
    take_till(0.., |c: char| c == quote || c == '\\').parse_next(s)
}

fn next_char(s: &mut &str) -> ModalResult<char> {
    any.parse_next(s)
}

/// Body of a quoted token, after the opening quote. `\<quote>` and `\\` are
/// unescaped, any other backslash is kept as typed.
fn quoted_body(s: &mut &str, quote: char) -> ModalResult<String> {
    let mut value = String::new();
    loop {
        value.push_str(unescaped_chunk(s, quote)?);

        if next_char(s)? == quote {
            return Ok(value);
        }

        let escaped = next_char(s)?;
        if escaped != quote && escaped != '\\' {
            value.push('\\');
        }
        value.push(escaped);
    }
}

fn open_quote(s: &mut &str) -> ModalResult<char> {
    one_of(['"', '\'']).parse_next(s)
}

fn quoted_token(s: &mut &str) -> ModalResult<String> {
    let quote = open_quote(s)?;
    cut_err(move |s: &mut &str| quoted_body(s, quote)).parse_next(s)
}

/// A quoted section inside an unquoted token, quotes and escapes kept as typed.
fn embedded_quote<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    (|s: &mut &'a str| {
        let quote = open_quote(s)?;
        cut_err(move |s: &mut &str| quoted_body(s, quote)).parse_next(s)
    })
    .take()
    .parse_next(s)
}

fn escaped_quote<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    ('\\', open_quote).take().parse_next(s)
}

/// Unquoted text up to whitespace or an opening quote. `\"` and `\'` are
/// ordinary text here.
fn unquoted_run<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    repeat::<_, _, (), _, _>(
        1..,
        alt((
            take_till(1.., |c: char| {
                c.is_whitespace() || c == '"' || c == '\'' || c == '\\'
            }),
            escaped_quote,
            "\\",
        )),
    )
    .take()
    .parse_next(s)
}

/// Runs to the next whitespace outside quotes and is kept verbatim.
fn bare_token<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    repeat::<_, _, (), _, _>(1.., alt((unquoted_run, embedded_quote)))
        .take()
        .parse_next(s)
}

/// A leading quoted section is unwrapped; text glued after its closing quote
/// is appended verbatim, so `"a"b` reads as `ab`.
fn leading_quoted_token(s: &mut &str) -> ModalResult<String> {
    (quoted_token, opt(bare_token))
        .map(|(mut value, tail)| {
            value.push_str(tail.unwrap_or_default());
            value
        })
        .parse_next(s)
}

fn next_token(s: &mut &str) -> ModalResult<Option<String>> {
    preceded(
        whitespace,
        opt(alt((leading_quoted_token, bare_token.map(String::from)))),
    )
    .parse_next(s)
}

/// Finds the quote left open in `token`, returning it with its byte offset.
fn unclosed_quote(token: &str) -> Option<(char, usize)> {
    let mut rest = token;
    loop {
        let _ = opt(unquoted_run).parse_next(&mut rest);
        let offset = token.len() - rest.len();
        let quote = open_quote(&mut rest).ok()?;
        if quoted_body(&mut rest, quote).is_err() {
            return Some((quote, offset));
        }
    }
}

/// Reads one token from the front of `rest`, advancing it.
///
/// Returns `Ok(None)` once only whitespace remains. `input` is the full line
/// and is used to report the offset of an unterminated quote.
fn read_token(input: &str, rest: &mut &str) -> Result<Option<String>, ParseError> {
    let start = input.len() - rest.trim_start().len();
    next_token.parse_next(rest).map_err(|_| {
        let (quote, offset) = unclosed_quote(&input[start..]).unwrap_or(('"', 0));
        ParseError::UnterminatedQuote {
            quote,
            offset: start + offset,
        }
    })
}

/// Splits a command line into tokens.
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut rest = input;
    let mut tokens = Vec::new();
    while let Some(token) = read_token(input, &mut rest)? {
        tokens.push(token);
    }
    Ok(tokens)
}

/// Splits off the first token, returning it with the untouched remainder.
pub fn split_first_token(input: &str) -> Result<Option<(String, &str)>, ParseError> {
    let mut rest = input;
    Ok(read_token(input, &mut rest)?.map(|token| (token, rest)))
}

/// Returns the content of `input` if it is exactly one quoted token.
pub fn single_quoted(input: &str) -> Option<String> {
    let mut rest = input.trim();
    let token = quoted_token.parse_next(&mut rest).ok()?;
    rest.is_empty().then_some(token)
}
