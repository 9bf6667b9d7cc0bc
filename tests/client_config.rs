use worldexplorer::{Client, Error};

#[test]
fn trailing_slash_does_not_change_request_root() {
    let with = Client::new("https://api.example.org/").unwrap();
    let without = Client::new("https://api.example.org").unwrap();
    assert_eq!(with.countries_url(), without.countries_url());
    assert_eq!(with.countries_url(), "https://api.example.org/v2/countries");
}

#[test]
fn scheme_is_case_insensitive() {
    let client = Client::new("HTTPS://api.example.org").unwrap();
    assert!(client.countries_url().ends_with("/v2/countries"));
    assert!(Client::new("http://api.example.org").is_ok());
}

#[test]
fn blank_base_url_is_rejected() {
    for url in ["", "   ", "\t\n"] {
        match Client::new(url) {
            Err(Error::Configuration(_)) => {}
            other => panic!("expected Configuration error for {url:?}, got {other:?}"),
        }
    }
}

#[test]
fn non_http_scheme_is_rejected() {
    for url in ["ftp://api.example.org", "api.example.org", "ws://api.example.org"] {
        match Client::new(url) {
            Err(Error::Configuration(_)) => {}
            other => panic!("expected Configuration error for {url:?}, got {other:?}"),
        }
    }
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let client = Client::new("  https://api.example.org/  ").unwrap();
    assert_eq!(client.countries_url(), "https://api.example.org/v2/countries");
}
