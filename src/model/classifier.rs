//! Maps one raw transport outcome into exactly one classified result.
//!
//! The remote payload is untrusted, so every field is checked explicitly
//! instead of deserializing straight into structs.

use serde_json::{Map, Value};

use super::types::{ErrorKind, GroupEntry, Identifier, ItemEntry};

pub const NETWORK_FAILURE_MESSAGE: &str =
    "could not reach the wallpaper service; check your connection";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "unexpected response from the wallpaper service";
pub const THROTTLED_MESSAGE: &str = "service busy or rate-limited, retry shortly";
pub const TIMED_OUT_MESSAGE: &str =
    "the wallpaper service did not answer in time; retry or raise --timeout-secs";

/// Transport-level result of one request attempt
#[derive(Clone, Debug, PartialEq)]
pub enum RawOutcome {
    /// No response was received at all
    Transport { detail: String },
    /// The service accepted the request but did not finish within the timeout
    TimedOut { detail: String },
    /// A response arrived; `body` is `None` when empty or not JSON
    Response { status: u16, body: Option<Value> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassifiedResult {
    /// Groups in wire key order, already shape-validated
    Success(Vec<(String, GroupEntry)>),
    Empty,
    Info(String),
    Error(ErrorKind, String),
}

pub fn classify(identifier: &Identifier, outcome: RawOutcome) -> ClassifiedResult {
    match outcome {
        RawOutcome::Transport { detail } => {
            tracing::warn!(identifier = %identifier, detail = %detail, "Transport failure");
            ClassifiedResult::Error(ErrorKind::NetworkFailure, NETWORK_FAILURE_MESSAGE.to_string())
        }
        RawOutcome::TimedOut { detail } => {
            tracing::warn!(identifier = %identifier, detail = %detail, "Wallpaper request timed out");
            ClassifiedResult::Error(ErrorKind::Upstream, TIMED_OUT_MESSAGE.to_string())
        }
        RawOutcome::Response { status, body } if (200..300).contains(&status) => {
            classify_success(body)
        }
        RawOutcome::Response { status, body } => classify_failure(identifier, status, body),
    }
}

fn classify_success(body: Option<Value>) -> ClassifiedResult {
    let Some(Value::Object(map)) = body else {
        return malformed();
    };

    if map.is_empty() {
        return ClassifiedResult::Empty;
    }

    if map.len() == 1 {
        if let Some(message) = string_field(&map, "message") {
            return ClassifiedResult::Info(message.to_string());
        }
        if let Some(error) = string_field(&map, "error") {
            return ClassifiedResult::Error(ErrorKind::Upstream, error.to_string());
        }
    }

    let total = map.len();
    let groups: Vec<(String, GroupEntry)> = map
        .into_iter()
        .filter_map(|(key, value)| {
            let group = parse_group(&value);
            if group.is_none() {
                tracing::debug!(key = %key, "Skipping malformed group");
            }
            group.map(|g| (key, g))
        })
        .collect();

    if groups.is_empty() {
        tracing::warn!(total, "No entry in the payload looks like a group");
        return malformed();
    }

    if groups.len() < total {
        tracing::info!(kept = groups.len(), total, "Dropped malformed groups from payload");
    }

    ClassifiedResult::Success(groups)
}

fn classify_failure(identifier: &Identifier, status: u16, body: Option<Value>) -> ClassifiedResult {
    let message = body.as_ref().and_then(error_message);

    if status == 404 && message.is_none_or(says_not_found) {
        return ClassifiedResult::Error(
            ErrorKind::UserNotFound,
            format!("{identifier} not found or private; check spelling and visibility settings"),
        );
    }

    if status == 429 || status == 503 {
        return ClassifiedResult::Error(ErrorKind::Throttled, THROTTLED_MESSAGE.to_string());
    }

    match message {
        Some(message) => ClassifiedResult::Error(ErrorKind::Upstream, message.to_string()),
        None => ClassifiedResult::Error(
            ErrorKind::Upstream,
            format!("status {status}: check server logs"),
        ),
    }
}

fn malformed() -> ClassifiedResult {
    ClassifiedResult::Error(
        ErrorKind::MalformedResponse,
        MALFORMED_RESPONSE_MESSAGE.to_string(),
    )
}

fn error_message(body: &Value) -> Option<&str> {
    let map = body.as_object()?;
    string_field(map, "error").or_else(|| string_field(map, "message"))
}

fn says_not_found(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("not found") || lower.contains("does not exist")
}

fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn non_empty_string<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    string_field(map, key).filter(|s| !s.trim().is_empty())
}

fn parse_group(value: &Value) -> Option<GroupEntry> {
    let map = value.as_object()?;
    let display_title = non_empty_string(map, "display_title")?;
    let wallpapers = map.get("wallpapers")?.as_array()?;

    let items = wallpapers
        .iter()
        .filter_map(|wall| {
            let wall = wall.as_object()?;
            Some(ItemEntry {
                thumbnail_url: non_empty_string(wall, "thumbnail")?.to_string(),
                full_url: non_empty_string(wall, "full")?.to_string(),
            })
        })
        .collect();

    Some(GroupEntry {
        display_title: display_title.to_string(),
        cover_url: non_empty_string(map, "mal_cover").map(str::to_string),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id() -> Identifier {
        Identifier::parse("kirito").unwrap()
    }

    fn response(status: u16, body: Value) -> RawOutcome {
        RawOutcome::Response { status, body: Some(body) }
    }

    #[test]
    fn transport_failure_is_network_error() {
        let result = classify(&id(), RawOutcome::Transport { detail: "dns".into() });
        assert_eq!(
            result,
            ClassifiedResult::Error(ErrorKind::NetworkFailure, NETWORK_FAILURE_MESSAGE.into())
        );
    }

    #[test]
    fn timeout_is_not_reported_as_unreachable() {
        let result = classify(&id(), RawOutcome::TimedOut { detail: "operation timed out".into() });
        assert_eq!(
            result,
            ClassifiedResult::Error(ErrorKind::Upstream, TIMED_OUT_MESSAGE.into())
        );
    }

    #[test]
    fn single_message_field_is_info_not_success() {
        let result = classify(&id(), response(200, json!({"message": "no completed anime"})));
        assert_eq!(result, ClassifiedResult::Info("no completed anime".into()));
    }

    #[test]
    fn empty_mapping_is_empty() {
        assert_eq!(classify(&id(), response(200, json!({}))), ClassifiedResult::Empty);
    }

    #[test]
    fn success_keeps_wire_order_and_skips_broken_groups() {
        let body = json!({
            "zeta": {
                "display_title": "Zeta",
                "mal_cover": "https://cdn/zeta.jpg",
                "wallpapers": [
                    {"thumbnail": "https://th/1", "full": "https://full/1"},
                    {"thumbnail": "https://th/2"},
                    "garbage"
                ]
            },
            "no_title": {"wallpapers": []},
            "no_items": {"display_title": "No Items"},
            "alpha": {"display_title": "Alpha", "mal_cover": null, "wallpapers": []}
        });

        let ClassifiedResult::Success(groups) = classify(&id(), response(200, body)) else {
            panic!("expected success");
        };

        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);

        let zeta = &groups[0].1;
        assert_eq!(zeta.cover_url.as_deref(), Some("https://cdn/zeta.jpg"));
        assert_eq!(
            zeta.items,
            vec![ItemEntry {
                thumbnail_url: "https://th/1".into(),
                full_url: "https://full/1".into(),
            }]
        );
        assert_eq!(groups[1].1.cover_url, None);
        assert!(groups[1].1.items.is_empty());
    }

    #[test]
    fn non_object_success_body_is_malformed() {
        for body in [json!([1, 2]), json!("text"), json!(3)] {
            assert_eq!(
                classify(&id(), response(200, body)),
                ClassifiedResult::Error(
                    ErrorKind::MalformedResponse,
                    MALFORMED_RESPONSE_MESSAGE.into()
                )
            );
        }
        let missing = RawOutcome::Response { status: 200, body: None };
        assert!(matches!(
            classify(&id(), missing),
            ClassifiedResult::Error(ErrorKind::MalformedResponse, _)
        ));
    }

    #[test]
    fn mapping_without_any_group_is_malformed() {
        for body in [
            json!({"data": [1, 2, 3]}),
            json!({"status": "ok", "count": 3}),
            json!({"message": 42}),
            json!({"a": {"wallpapers": []}, "b": "x"}),
        ] {
            assert_eq!(
                classify(&id(), response(200, body)),
                ClassifiedResult::Error(
                    ErrorKind::MalformedResponse,
                    MALFORMED_RESPONSE_MESSAGE.into()
                )
            );
        }
    }

    #[test]
    fn valid_group_without_wallpapers_is_still_success() {
        let body = json!({"A": {"display_title": "A", "wallpapers": []}});
        let ClassifiedResult::Success(groups) = classify(&id(), response(200, body)) else {
            panic!("expected success");
        };
        assert_eq!(groups.len(), 1);
        assert!(groups[0].1.items.is_empty());
    }

    #[test]
    fn not_found_names_the_identifier() {
        let result = classify(&id(), response(404, json!({"error": "mal user not found"})));
        let ClassifiedResult::Error(kind, message) = result else {
            panic!("expected error");
        };
        assert_eq!(kind, ErrorKind::UserNotFound);
        assert!(message.contains("kirito"));
        assert!(message.contains("not found or private"));
    }

    #[test]
    fn not_found_without_body_is_user_not_found() {
        let result = classify(&id(), RawOutcome::Response { status: 404, body: None });
        assert!(matches!(result, ClassifiedResult::Error(ErrorKind::UserNotFound, _)));
    }

    #[test]
    fn not_found_with_other_message_is_upstream() {
        let result = classify(&id(), response(404, json!({"error": "route missing"})));
        assert_eq!(
            result,
            ClassifiedResult::Error(ErrorKind::Upstream, "route missing".into())
        );
    }

    #[test]
    fn service_unavailable_is_throttled_regardless_of_body() {
        for body in [Some(json!({"error": "Could not connect"})), Some(json!([])), None] {
            let result = classify(&id(), RawOutcome::Response { status: 503, body });
            assert_eq!(
                result,
                ClassifiedResult::Error(ErrorKind::Throttled, THROTTLED_MESSAGE.into())
            );
        }
        let result = classify(&id(), RawOutcome::Response { status: 429, body: None });
        assert!(matches!(result, ClassifiedResult::Error(ErrorKind::Throttled, _)));
    }

    #[test]
    fn other_errors_use_parsed_message_or_status() {
        let result = classify(&id(), response(500, json!({"message": "boom"})));
        assert_eq!(result, ClassifiedResult::Error(ErrorKind::Upstream, "boom".into()));

        let result = classify(&id(), RawOutcome::Response { status: 502, body: None });
        assert_eq!(
            result,
            ClassifiedResult::Error(ErrorKind::Upstream, "status 502: check server logs".into())
        );
    }

    #[test]
    fn error_field_wins_over_message_field() {
        let result = classify(
            &id(),
            response(400, json!({"error": "bad input", "message": "ignored"})),
        );
        assert_eq!(result, ClassifiedResult::Error(ErrorKind::Upstream, "bad input".into()));
    }
}
