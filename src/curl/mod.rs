pub mod curl_parsers;
pub mod parser;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(ParseError::UnknownMethod(s.into())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One recognized piece of a curl-style command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Curl {
    Method(Method),
    Url(String),
    Header(Header),
    Cookie(String),
    Data(String),
}

impl Curl {
    /// Builds the part for a flag and its argument.
    pub fn new(identifier: &str, param: &str) -> Result<Self, ParseError> {
        match identifier {
            "-X" | "--request" => Ok(Curl::Method(param.parse()?)),
            "-H" | "--header" => Ok(Curl::Header(curl_parsers::header_split(param)?)),
            "-b" | "--cookie" => Ok(Curl::Cookie(param.into())),
            "-d" | "--data" | "--data-raw" => Ok(Curl::Data(param.into())),
            "--url" => Curl::new_as_url(param),
            _ => Err(ParseError::UnknownFlag(identifier.into())),
        }
    }

    pub fn new_as_url(url: &str) -> Result<Self, ParseError> {
        url::Url::parse(url).map_err(|e| ParseError::InvalidUrl {
            url: url.into(),
            reason: e.to_string(),
        })?;
        Ok(Curl::Url(url.into()))
    }

    /// Whether `identifier` is a flag that consumes the next token.
    pub fn takes_value(identifier: &str) -> bool {
        matches!(
            identifier,
            "-X" | "--request"
                | "-H"
                | "--header"
                | "-b"
                | "--cookie"
                | "-d"
                | "--data"
                | "--data-raw"
                | "--url"
        )
    }
}

/// The structured HTTP request derived from one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: Method,
    pub headers: Vec<Header>,
    pub cookies: Option<String>,
    pub body: Option<String>,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn push_header(&mut self, header: Header) -> &mut Self {
        self.headers.push(header);
        self
    }

    pub fn set_cookies(&mut self, cookies: impl Into<String>) -> &mut Self {
        self.cookies = Some(cookies.into());
        self
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }
}
