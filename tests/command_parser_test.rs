use curlbot::curl::curl_parsers::{curl_cmd_parse, curl_parse_with_default};
use curlbot::curl::{Header, Method, RequestDescriptor};
use curlbot::error::ParseError;
use rstest::*;

#[rstest]
#[case("https://example.com")]
#[case("'https://example.com/path?q=1&r=2#frag'")]
#[case("  \"http://localhost:8080/\"  ")]
fn test_bare_url_sets_only_url(#[case] input: &str) {
    let descriptor = curl_cmd_parse(input).unwrap();
    let url = input.trim().trim_matches(|c: char| c == '\'' || c == '"');
    assert_eq!(descriptor, RequestDescriptor::new(url));
    assert_eq!(descriptor.method, Method::Get);
}

#[test]
fn test_parse_headers_method_and_body() {
    let input = r#"-H "Content-Type: application/json" -H "Authorization: Bearer token" -X POST -d '{"key": "value"}' https://example.com"#;
    let descriptor = curl_cmd_parse(input).unwrap();

    assert_eq!(
        descriptor,
        RequestDescriptor {
            url: "https://example.com".into(),
            method: Method::Post,
            headers: vec![
                Header::new("Content-Type", "application/json"),
                Header::new("Authorization", "Bearer token"),
            ],
            cookies: None,
            body: Some(r#"{"key": "value"}"#.into()),
        }
    );
}

#[test]
fn test_parse_cookies() {
    let input = r#"https://www.example.com -b "session=abc123; user=john""#;
    let descriptor = curl_cmd_parse(input).unwrap();
    assert_eq!(descriptor.url, "https://www.example.com");
    assert_eq!(descriptor.cookies.as_deref(), Some("session=abc123; user=john"));
    assert_eq!(descriptor.method, Method::Get);
    assert!(descriptor.headers.is_empty());
    assert!(descriptor.body.is_none());
}

#[test]
fn test_duplicate_headers_are_kept_in_order() {
    let input = "https://a.b -H 'Accept: text/html' -H 'X-A: 1' -H 'Accept: application/json'";
    let descriptor = curl_cmd_parse(input).unwrap();
    assert_eq!(
        descriptor.headers,
        vec![
            Header::new("Accept", "text/html"),
            Header::new("X-A", "1"),
            Header::new("Accept", "application/json"),
        ]
    );
}

#[rstest]
#[case(r#"https://a.b -d key="a b""#, Some(r#"key="a b""#), vec![])]
#[case(r#"https://a.b -d {"k":"v w"}"#, Some(r#"{"k":"v w"}"#), vec![])]
#[case(
    r#"-H X-Name:"John Doe" https://a.b"#,
    None,
    vec![Header::new("X-Name", r#""John Doe""#)]
)]
fn test_quoted_section_inside_unquoted_token(
    #[case] input: &str,
    #[case] body: Option<&str>,
    #[case] headers: Vec<Header>,
) {
    let descriptor = curl_cmd_parse(input).unwrap();
    assert_eq!(descriptor.url, "https://a.b");
    assert_eq!(descriptor.body.as_deref(), body);
    assert_eq!(descriptor.headers, headers);
}

#[test]
fn test_body_on_get_is_kept() {
    let descriptor = curl_parse_with_default("https://a.b -d 'q=1'", Method::Get).unwrap();
    assert_eq!(descriptor.method, Method::Get);
    assert_eq!(descriptor.body.as_deref(), Some("q=1"));
}

#[rstest]
#[case(r#"https://a.b -H "X-Foo""#, ParseError::MalformedHeader("X-Foo".into()))]
#[case("https://a.b -Z value", ParseError::UnknownFlag("-Z".into()))]
#[case(
    r#"-H "Content-Type: application/json"#,
    ParseError::UnterminatedQuote { quote: '"', offset: 3 }
)]
#[case("-H 'Accept: */*'", ParseError::MissingUrl)]
#[case("", ParseError::MissingUrl)]
#[case("https://a.b https://c.d", ParseError::UnexpectedArgument("https://c.d".into()))]
#[case("https://a.b -X trace", ParseError::UnknownMethod("trace".into()))]
#[case("https://a.b -d", ParseError::MissingValue { flag: "-d".into() })]
#[case(r#"https://a.b -d key="a b"#, ParseError::UnterminatedQuote { quote: '"', offset: 19 })]
fn test_parse_errors(#[case] input: &str, #[case] expected: ParseError) {
    assert_eq!(curl_cmd_parse(input), Err(expected));
}

#[test]
fn test_relative_url_is_rejected() {
    assert!(matches!(
        curl_cmd_parse("www.example.com"),
        Err(ParseError::InvalidUrl { url, .. }) if url == "www.example.com"
    ));
}

#[test]
fn test_parse_is_idempotent() {
    let input = r#"curl 'https://example.com/api' \
        -H 'Accept: */*' -X put --data '{"a": [1, 2]}' -b 'k=v'"#;
    let first = curl_cmd_parse(input);
    let second = curl_cmd_parse(input);
    assert!(first.is_ok());
    assert_eq!(first, second);
}
