use curlbot::command::CommandRegistry;

fn main() {
    let line = r#"/请求 curl 'http://example.com' -H 'Accept: application/json' -b "session=abc123""#;
    let result = CommandRegistry::default().parse_line(line);
    println!("{:#?}", result);
}
