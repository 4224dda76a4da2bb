//! Ordered field fallback chains over loosely structured JSON.
//!
//! Exported API data names the same thing differently depending on the
//! endpoint (`PositionLat` vs `lat`, `SubRouteName.Zh_tw` vs `RouteUID`).
//! A chain lists dotted paths in priority order and the first attempt that
//! yields a usable value wins.

use serde_json::Value;

/// Follows a dotted path such as `"StopPosition.PositionLat"`
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, key| node.get(key))
}

/// Non-empty string at the first path that has one
pub fn first_text(value: &Value, chain: &[&str]) -> Option<String> {
    chain.iter().find_map(|path| {
        lookup(value, path)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Finite number at the first path holding a number or a numeric string
pub fn first_number(value: &Value, chain: &[&str]) -> Option<f64> {
    chain
        .iter()
        .find_map(|path| lookup(value, path).and_then(coerce_number))
}

/// Whole number at the first path holding one
pub fn first_integer(value: &Value, chain: &[&str]) -> Option<i64> {
    chain
        .iter()
        .find_map(|path| lookup(value, path).and_then(coerce_integer))
}

/// JSON number or numeric string as a finite `f64`
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// JSON integer, integral float or numeric string as `i64`
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    coerce_number(value)
        .filter(|n| n.fract() == 0.0 && n.abs() <= i64::MAX as f64)
        .map(|n| n as i64)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn dotted_paths_walk_nested_objects() {
        let v = json!({"RouteName": {"Zh_tw": "300"}});
        assert_eq!(lookup(&v, "RouteName.Zh_tw"), Some(&json!("300")));
        assert_eq!(lookup(&v, "RouteName.En"), None);
        assert_eq!(lookup(&v, "Missing.Zh_tw"), None);
    }

    #[test]
    fn text_chain_honors_order_and_skips_empty_values() {
        let chain = ["SubRouteName.Zh_tw", "RouteName.Zh_tw", "RouteUID"];

        let sub = json!({"SubRouteName": {"Zh_tw": "300延"}, "RouteName": {"Zh_tw": "300"}});
        assert_eq!(first_text(&sub, &chain).as_deref(), Some("300延"));

        let empty_sub = json!({"SubRouteName": {"Zh_tw": ""}, "RouteName": {"Zh_tw": "300"}});
        assert_eq!(first_text(&empty_sub, &chain).as_deref(), Some("300"));

        let uid_only = json!({"SubRouteName": null, "RouteUID": "TXG300"});
        assert_eq!(first_text(&uid_only, &chain).as_deref(), Some("TXG300"));

        assert_eq!(first_text(&json!({}), &chain), None);
    }

    #[test]
    fn object_valued_field_is_not_text() {
        let v = json!({"StopName": {"Zh_tw": "臺中車站"}});
        assert_eq!(first_text(&v, &["StopName"]), None);
        assert_eq!(
            first_text(&v, &["StopName.Zh_tw", "StopName"]).as_deref(),
            Some("臺中車站")
        );
    }

    #[test]
    fn numbers_coerce_from_strings() {
        let v = json!({"a": "24.15", "b": 120.65, "c": "north", "d": null});
        assert_eq!(first_number(&v, &["a"]), Some(24.15));
        assert_eq!(first_number(&v, &["c", "b"]), Some(120.65));
        assert_eq!(first_number(&v, &["c", "d"]), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(coerce_integer(&json!(3)), Some(3));
        assert_eq!(coerce_integer(&json!("7")), Some(7));
        assert_eq!(coerce_integer(&json!(2.0)), Some(2));
        assert_eq!(coerce_integer(&json!(2.5)), None);
        assert_eq!(coerce_integer(&json!(true)), None);
    }
}
