use anitool_devproxy::routing::{HostFilter, HostInfo, RoutingError};
use hyper::{Method, Request};
use http_body_util::Empty;
use bytes::Bytes;

// 테스트 헬퍼 함수
fn create_request(host: Option<&str>, path: &str) -> Request<Empty<Bytes>> {
    let mut builder = Request::builder()
        .method(Method::GET)
        .uri(path);

    if let Some(host_value) = host {
        builder = builder.header("Host", host_value);
    }

    builder.body(Empty::new()).unwrap()
}

#[test]
fn test_host_info_parsing() {
    let test_cases = vec![
        // (입력, 예상 결과)
        ("anitool.haruyuki.cn", Ok(("anitool.haruyuki.cn", None))),
        ("localhost:5173", Ok(("localhost", Some(5173)))),
        ("[::1]:5173", Ok(("[::1]", Some(5173)))),
        ("[::1]", Ok(("[::1]", None))),
        ("example.com:invalid", Err(RoutingError::InvalidPort {
            port: "invalid".to_string(),
            reason: "Invalid format".to_string(),
        })),
        ("example.com:0", Err(RoutingError::InvalidPort {
            port: "0".to_string(),
            reason: "Port must be greater than 0".to_string(),
        })),
        ("example.com:", Err(RoutingError::InvalidHost {
            host: "example.com:".to_string(),
            reason: "Invalid format".to_string(),
        })),
        ("", Err(RoutingError::InvalidHost {
            host: "".to_string(),
            reason: "Invalid format".to_string(),
        })),
        ("a:1:2", Err(RoutingError::InvalidHost {
            host: "a:1:2".to_string(),
            reason: "Invalid format".to_string(),
        })),
    ];

    for (input, expected) in test_cases {
        let result = HostInfo::from_header_value(input);
        match expected {
            Ok((name, port)) => {
                let info = result.unwrap_or_else(|e| panic!("Failed to parse valid host {}: {}", input, e));
                assert_eq!(info.name, name);
                assert_eq!(info.port, port);
            }
            Err(expected_err) => {
                assert_eq!(result.unwrap_err(), expected_err, "입력: {:?}", input);
            }
        }
    }
}

#[test]
fn test_host_filter_allow_list() {
    let filter = HostFilter::new(["anitool.haruyuki.cn"]);

    let allowed = vec![
        "anitool.haruyuki.cn",
        "ANITOOL.haruyuki.cn:5173",
        "localhost:5173",
        "app.localhost",
        "127.0.0.1:5173",
        "192.168.0.10",
        "[::1]:5173",
    ];
    for host in allowed {
        let req = create_request(Some(host), "/");
        assert!(filter.check(&req).is_ok(), "호스트 '{}'는 허용되어야 함", host);
    }

    let req = create_request(Some("evil.example.com"), "/search/match");
    assert_eq!(
        filter.check(&req).unwrap_err(),
        RoutingError::HostNotAllowed { host: "evil.example.com".to_string() }
    );

    let req = create_request(Some("haruyuki.cn"), "/");
    assert!(filter.check(&req).is_err());
}

#[test]
fn test_host_filter_missing_host() {
    let filter = HostFilter::new(["anitool.haruyuki.cn"]);
    let req = create_request(None, "/");

    assert_eq!(filter.check(&req).unwrap_err(), RoutingError::MissingHost);
}

#[test]
fn test_host_filter_ignores_blank_entries() {
    let filter = HostFilter::new([" anitool.haruyuki.cn ", ""]);
    assert_eq!(filter.allowed_hosts(), ["anitool.haruyuki.cn".to_string()]);
}
