use anitool_devproxy::routing::{Decision, RouteRule, RouteTable, RoutingError, TargetOrigin};

const BACKEND: &str = "http://127.0.0.1:11325";

// 테스트 헬퍼 함수
fn backend() -> TargetOrigin {
    TargetOrigin::parse(BACKEND).unwrap()
}

fn default_table() -> RouteTable {
    let rules = ["/search", "/scene", "/images"]
        .iter()
        .map(|prefix| RouteRule::new(*prefix, backend(), true).unwrap())
        .collect();
    RouteTable::new(rules).unwrap()
}

fn forward_to_backend() -> Decision {
    Decision::Forward {
        target_origin: backend(),
        rewrite_origin: true,
    }
}

#[test]
fn test_forwarded_prefixes() {
    let table = default_table();

    for path in ["/search/match", "/search/reply", "/scene/x", "/images/y.png"] {
        assert_eq!(
            table.match_path(path).unwrap(),
            forward_to_backend(),
            "경로 '{}'는 백엔드로 전달되어야 함",
            path
        );
    }
}

#[test]
fn test_unmatched_paths_are_local() {
    let table = default_table();

    for path in ["/unknown/path", "/", "/index.html", "/assets/index-abc.js", "/sear"] {
        assert_eq!(
            table.match_path(path).unwrap(),
            Decision::Local,
            "경로 '{}'는 로컬에서 처리되어야 함",
            path
        );
    }
}

#[test]
fn test_prefix_matching_is_not_segment_aware() {
    let table = default_table();

    // 순수 문자열 접두사 매칭: /searchmore 도 /search 규칙에 걸림
    assert_eq!(table.match_path("/searchmore").unwrap(), forward_to_backend());
    assert_eq!(table.match_path("/search").unwrap(), forward_to_backend());
    assert_eq!(table.match_path("/imagesfoo/bar").unwrap(), forward_to_backend());
}

#[test]
fn test_first_declared_rule_wins() {
    let api = TargetOrigin::parse("http://127.0.0.1:9000").unwrap();
    let search = TargetOrigin::parse("http://127.0.0.1:9001").unwrap();

    // 더 짧은 접두사가 먼저 선언되면 더 구체적인 규칙보다 우선함
    let table = RouteTable::new(vec![
        RouteRule::new("/search", api.clone(), false).unwrap(),
        RouteRule::new("/search/match", search.clone(), true).unwrap(),
    ])
    .unwrap();

    assert_eq!(
        table.match_path("/search/match").unwrap(),
        Decision::Forward { target_origin: api, rewrite_origin: false }
    );

    // 선언 순서를 바꾸면 결과도 바뀜
    let table = RouteTable::new(vec![
        RouteRule::new("/search/match", search.clone(), true).unwrap(),
        RouteRule::new("/search", backend(), false).unwrap(),
    ])
    .unwrap();

    assert_eq!(
        table.match_path("/search/match").unwrap(),
        Decision::Forward { target_origin: search, rewrite_origin: true }
    );
}

#[test]
fn test_duplicate_prefix_is_config_error() {
    let result = RouteTable::new(vec![
        RouteRule::new("/search", backend(), true).unwrap(),
        RouteRule::new("/scene", backend(), true).unwrap(),
        RouteRule::new("/search", TargetOrigin::parse("http://127.0.0.1:9000").unwrap(), false).unwrap(),
    ]);

    let err = result.unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(err, RoutingError::DuplicatePrefix { prefix: "/search".to_string() });
}

#[test]
fn test_invalid_paths() {
    let table = default_table();

    for path in ["", "search/match", "images/y.png", "/search match", "/search\n"] {
        assert!(
            matches!(table.match_path(path), Err(RoutingError::InvalidPath { .. })),
            "경로 {:?}는 InvalidPath 여야 함",
            path
        );
    }
}

#[test]
fn test_empty_table_serves_everything_locally() {
    let table = RouteTable::new(Vec::new()).unwrap();

    assert!(table.is_empty());
    assert_eq!(table.match_path("/search/match").unwrap(), Decision::Local);
}

#[test]
fn test_match_is_idempotent() {
    let table = default_table();

    let first = table.match_path("/scene/analyze").unwrap();
    for _ in 0..10 {
        assert_eq!(table.match_path("/scene/analyze").unwrap(), first);
    }
    assert_eq!(table.len(), 3);
}

#[test]
fn test_table_is_shareable_across_threads() {
    let table = std::sync::Arc::new(default_table());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = table.clone();
            std::thread::spawn(move || table.match_path("/images/a.png").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), forward_to_backend());
    }
}

#[test]
fn test_table_serializes_in_declaration_order() {
    let table = default_table();
    let json = serde_json::to_value(&table).unwrap();

    let prefixes: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|rule| rule["prefix"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(prefixes, vec!["/search", "/scene", "/images"]);
    assert_eq!(json[0]["target_origin"], BACKEND);
    assert_eq!(json[0]["rewrite_origin"], true);
}
