use std::collections::BTreeMap;
use anitool_devproxy::endpoints::{ConfigResolver, EndpointError, EndpointSet, REQUIRED_ENDPOINTS};
use anitool_devproxy::routing::{RouteRule, RouteTable, TargetOrigin};

fn default_resolver() -> ConfigResolver {
    ConfigResolver::new("", "", EndpointSet::default()).unwrap()
}

fn default_table() -> RouteTable {
    let origin = TargetOrigin::parse("http://127.0.0.1:11325").unwrap();
    RouteTable::new(
        ["/search", "/scene", "/images"]
            .iter()
            .map(|prefix| RouteRule::new(*prefix, origin.clone(), true).unwrap())
            .collect(),
    )
    .unwrap()
}

fn paths(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(name, path)| (name.to_string(), path.to_string()))
        .collect()
}

#[test]
fn test_default_endpoints() {
    let resolver = default_resolver();

    assert_eq!(resolver.resolve_endpoint("MATCH").unwrap(), "/search/match");
    assert_eq!(resolver.resolve_endpoint("REPLY").unwrap(), "/search/reply");
    assert_eq!(resolver.base_image_path(), "");
    assert!(resolver.endpoints().require(&REQUIRED_ENDPOINTS).is_ok());
}

#[test]
fn test_resolved_paths_are_relative() {
    let resolver = default_resolver();

    for name in resolver.endpoints().names() {
        let path = resolver.resolve_endpoint(name).unwrap();
        assert!(path.starts_with('/'), "{} → {}", name, path);
        assert!(!path.starts_with("//"), "{} → {}", name, path);
        assert!(!path.contains("://"), "{} → {}", name, path);
    }
}

#[test]
fn test_unknown_endpoint() {
    let resolver = default_resolver();

    match resolver.resolve_endpoint("NONEXISTENT") {
        Err(EndpointError::UnknownEndpoint { name, available }) => {
            assert_eq!(name, "NONEXISTENT");
            assert_eq!(available, vec!["MATCH", "REPLY"]);
        }
        other => panic!("UnknownEndpoint 여야 함: {:?}", other),
    }
    assert!(!EndpointError::UnknownEndpoint { name: String::new(), available: vec![] }.is_config_error());
}

#[test]
fn test_resolve_is_idempotent() {
    let resolver = default_resolver();

    let first = resolver.resolve_endpoint("MATCH").unwrap();
    for _ in 0..10 {
        assert_eq!(resolver.resolve_endpoint("MATCH").unwrap(), first);
    }
}

#[test]
fn test_api_base_url_is_prepended() {
    let resolver = ConfigResolver::new("https://api.example.com/", "", EndpointSet::default()).unwrap();
    assert_eq!(resolver.api_base_url(), "https://api.example.com");
    assert_eq!(resolver.resolve_endpoint("MATCH").unwrap(), "https://api.example.com/search/match");

    let resolver = ConfigResolver::new("/api", "", EndpointSet::default()).unwrap();
    assert_eq!(resolver.resolve_endpoint("REPLY").unwrap(), "/api/search/reply");
}

#[test]
fn test_invalid_base_urls() {
    for base in [
        "ftp://files.example.com",
        "//cdn.example.com",
        "not a url",
        "https://api.example.com/?x=1",
        "/api?x",
        "/api#top",
        "/my api",
        "/api/http://evil",
    ] {
        assert!(
            matches!(
                ConfigResolver::new(base, "", EndpointSet::default()),
                Err(EndpointError::InvalidBaseUrl { .. })
            ),
            "API_BASE_URL '{}'은 거부되어야 함",
            base
        );
    }

    assert!(matches!(
        ConfigResolver::new("", "ftp://cdn", EndpointSet::default()),
        Err(EndpointError::InvalidBaseUrl { ref var_name, .. }) if var_name == "IMAGE_BASE_URL"
    ));
}

#[test]
fn test_endpoint_set_rejects_absolute_paths() {
    for path in ["http://127.0.0.1:11325/search/match", "//127.0.0.1/search", "search/match", "/search match"] {
        let result = EndpointSet::new(paths(&[("MATCH", path)]));
        assert!(
            matches!(result, Err(EndpointError::RelativePathRequired { .. })),
            "경로 '{}'는 거부되어야 함",
            path
        );
    }
}

#[test]
fn test_endpoint_set_missing_required() {
    let set = EndpointSet::new(paths(&[("MATCH", "/search/match")])).unwrap();

    assert_eq!(
        set.require(&REQUIRED_ENDPOINTS).unwrap_err(),
        EndpointError::MissingEndpoint { name: "REPLY".to_string() }
    );
}

#[test]
fn test_image_url() {
    let resolver = default_resolver();

    assert_eq!(resolver.image_url(""), "");
    assert_eq!(resolver.image_url("haruhi/ep01/01.jpg"), "/images/haruhi/ep01/01.jpg");
    assert_eq!(resolver.image_url("/haruhi/ep01/01.jpg/"), "/images/haruhi/ep01/01.jpg");
    assert_eq!(resolver.image_url("\\scene\\0001.png"), "/images/scene\\0001.png");
    assert_eq!(resolver.image_url("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");

    let resolver = ConfigResolver::new("", "https://img.example.com", EndpointSet::default()).unwrap();
    assert_eq!(resolver.base_image_path(), "https://img.example.com");
    assert_eq!(resolver.image_url("a/b.jpg"), "https://img.example.com/images/a/b.jpg");
}

#[test]
fn test_validate_against_route_table() {
    let table = default_table();
    assert!(default_resolver().validate_against(&table).is_ok());

    let endpoints = EndpointSet::new(paths(&[
        ("MATCH", "/search/match"),
        ("REPLY", "/search/reply"),
        ("HEALTH", "/healthz"),
    ]))
    .unwrap();
    let resolver = ConfigResolver::new("", "", endpoints).unwrap();

    let err = resolver.validate_against(&table).unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(
        err,
        EndpointError::EndpointNotRouted {
            name: "HEALTH".to_string(),
            path: "/healthz".to_string(),
        }
    );
}

#[test]
fn test_validate_against_uses_relative_base_url() {
    let table = default_table();

    // /api/search/match는 어떤 프록시 접두사와도 맞지 않아 로컬로 빠짐
    let resolver = ConfigResolver::new("/api", "", EndpointSet::default()).unwrap();
    assert_eq!(
        resolver.validate_against(&table).unwrap_err(),
        EndpointError::EndpointNotRouted {
            name: "MATCH".to_string(),
            path: "/api/search/match".to_string(),
        }
    );

    let resolver = ConfigResolver::new("/search", "", EndpointSet::default()).unwrap();
    assert!(resolver.validate_against(&table).is_ok());
}

#[test]
fn test_validate_against_skips_absolute_base_url() {
    let resolver = ConfigResolver::new("https://api.example.com", "", EndpointSet::default()).unwrap();
    assert!(resolver.validate_against(&RouteTable::new(Vec::new()).unwrap()).is_ok());
}
