use nom::{
    bytes::complete::{take_till1, take_until, take_while},
    character::complete::char,
    combinator::{opt, rest},
    error::context,
    sequence::{delimited, pair, separated_pair},
    IResult,
};

use crate::{
    curl::{
        parser::{single_quoted, split_first_token, tokenize},
        Curl, Header, Method, RequestDescriptor,
    },
    error::ParseError,
};

const CURL_CMD: &str = "curl";
const LINE_CONTINUATION: &str = "\\";
const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

fn is_space(c: char) -> bool {
    c.is_whitespace()
}

/// Whether a token is the `curl` program name of a pasted command.
pub fn is_curl(token: &str) -> bool {
    token.eq_ignore_ascii_case(CURL_CMD)
}

/// Splits `/name rest` into the command name (without the slash) and the
/// argument string.
pub fn command_name_parse(input: &str) -> IResult<&str, &str> {
    context(
        "command name parse",
        delimited(
            pair(take_while(is_space), opt(char('/'))),
            take_till1(is_space),
            take_while(is_space),
        ),
    )(input)
}

fn header_line_parse(input: &str) -> IResult<&str, (&str, &str)> {
    context(
        "header line parse",
        separated_pair(take_until(":"), char(':'), rest),
    )(input)
}

/// Splits `Name: value` on the first colon, trimming both sides.
pub fn header_split(param: &str) -> Result<Header, ParseError> {
    match header_line_parse(param) {
        Ok((_, (name, value))) if !name.trim().is_empty() => {
            Ok(Header::new(name.trim(), value.trim()))
        }
        _ => Err(ParseError::MalformedHeader(param.into())),
    }
}

/// Recognizes flags and the url in a token sequence.
pub fn commands_parse(tokens: &[String]) -> Result<Vec<Curl>, ParseError> {
    let mut curls = Vec::new();
    let mut seen_url = false;
    let mut iter = tokens.iter().enumerate();

    while let Some((idx, token)) = iter.next() {
        if (idx == 0 && is_curl(token)) || token == LINE_CONTINUATION {
            continue;
        }

        if token.starts_with('-') {
            if !Curl::takes_value(token) {
                return Err(ParseError::UnknownFlag(token.clone()));
            }
            let Some((_, param)) = iter.next() else {
                return Err(ParseError::MissingValue {
                    flag: token.clone(),
                });
            };
            let curl = Curl::new(token, param)?;
            if let Curl::Url(_) = curl {
                if seen_url {
                    return Err(ParseError::UnexpectedArgument(param.clone()));
                }
                seen_url = true;
            }
            curls.push(curl);
        } else if seen_url {
            return Err(ParseError::UnexpectedArgument(token.clone()));
        } else {
            curls.push(Curl::new_as_url(token)?);
            seen_url = true;
        }
    }

    Ok(curls)
}

/// Folds recognized parts into a descriptor. `default` is the method implied
/// by the invoking command; an explicit `-X` overrides it.
pub fn fold_curls(curls: Vec<Curl>, default: Method) -> Result<RequestDescriptor, ParseError> {
    let mut url = None;
    let mut descriptor = RequestDescriptor::default();
    descriptor.set_method(default);

    for curl in curls {
        match curl {
            Curl::Url(u) => url = Some(u),
            Curl::Method(m) => {
                descriptor.set_method(m);
            }
            Curl::Header(h) => {
                descriptor.push_header(h);
            }
            Curl::Cookie(c) => {
                descriptor.set_cookies(c);
            }
            Curl::Data(d) => {
                descriptor.set_body(d);
            }
        }
    }

    descriptor.url = url.ok_or(ParseError::MissingUrl)?;
    Ok(descriptor)
}

/// Parses a curl-style argument string with `default` as the implied method.
pub fn curl_parse_with_default(
    input: &str,
    default: Method,
) -> Result<RequestDescriptor, ParseError> {
    let tokens = tokenize(input)?;
    let curls = commands_parse(&tokens)?;
    fold_curls(curls, default)
}

/// Parses a curl-style argument string; the method defaults to GET.
pub fn curl_cmd_parse(input: &str) -> Result<RequestDescriptor, ParseError> {
    curl_parse_with_default(input, Method::Get)
}

/// Reads `value` as a JSON body, falling back to the text as typed so that a
/// quoted JSON string such as `"hello"` keeps its quotes.
fn json_body(value: String, raw: &str) -> Result<String, ParseError> {
    if serde_json::from_str::<serde_json::Value>(&value).is_ok() {
        return Ok(value);
    }
    serde_json::from_str::<serde_json::Value>(raw)
        .map(|_| raw.to_owned())
        .map_err(|e| ParseError::InvalidBody(e.to_string()))
}

fn has_content_type(descriptor: &RequestDescriptor) -> bool {
    descriptor
        .headers
        .iter()
        .any(|h| h.name.eq_ignore_ascii_case(CONTENT_TYPE))
}

/// Parses `<url> [<json-body>] [flags...]`.
///
/// A remainder after the url that does not start with `-` is a JSON body:
/// either the whole remainder, or its first token followed by curl flags. A
/// positional body gets `Content-Type: application/json` unless a header
/// already names one.
pub fn positional_body_parse(
    input: &str,
    default: Method,
) -> Result<RequestDescriptor, ParseError> {
    let Some((url, remainder)) = split_first_token(input)? else {
        return Err(ParseError::MissingUrl);
    };
    let remainder = remainder.trim();
    if url.starts_with('-') || remainder.is_empty() || remainder.starts_with('-') {
        return curl_parse_with_default(input, default);
    }

    Curl::new_as_url(&url)?;
    let whole = single_quoted(remainder).unwrap_or_else(|| remainder.to_owned());
    let mut curls = Vec::new();
    match json_body(whole, remainder) {
        Ok(body) => {
            curls.push(Curl::Url(url));
            curls.push(Curl::Data(body));
        }
        Err(err) => {
            let Some((value, flags)) = split_first_token(remainder)? else {
                return Err(err);
            };
            if flags.trim().is_empty() {
                return Err(err);
            }
            let raw = remainder[..remainder.len() - flags.len()].trim();
            curls.push(Curl::Data(json_body(value, raw)?));

            let mut tokens = vec![url];
            tokens.extend(tokenize(flags)?);
            curls.extend(commands_parse(&tokens)?);
        }
    }

    let mut descriptor = fold_curls(curls, default)?;
    if !has_content_type(&descriptor) {
        descriptor.push_header(Header::new(CONTENT_TYPE, JSON_CONTENT_TYPE));
    }
    Ok(descriptor)
}

/// Parses `<METHOD> <url> [<json-body> | flags...]`.
pub fn request_parse(input: &str) -> Result<RequestDescriptor, ParseError> {
    let Some((method, remainder)) = split_first_token(input)? else {
        return Err(ParseError::MissingMethod);
    };
    if method.starts_with('-') {
        return Err(ParseError::MissingMethod);
    }
    positional_body_parse(remainder, method.parse()?)
}
