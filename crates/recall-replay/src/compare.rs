use serde_json::Value;

/// Canonical JSON comparison (§9): both sides JSON-null (an absent
/// recorded result is treated the same as an explicit `null`), or both
/// serialize to the same string. `serde_json::Value`'s default (non
/// `preserve_order`) object representation is already key-sorted, and its
/// `Number` keeps the literal's original representation, so a plain
/// `to_string` comparison is already canonical — no extra normalization
/// pass is needed. A serialization failure (never actually reachable
/// through `serde_json::Value`, which cannot represent cycles) yields
/// `false`, never a panic.
pub(crate) fn canonical_eq(a: Option<&Value>, b: Option<&Value>) -> bool {
    let a_is_null = a.map_or(true, Value::is_null);
    let b_is_null = b.map_or(true, Value::is_null);
    if a_is_null && b_is_null {
        return true;
    }
    match (a, b) {
        (Some(a), Some(b)) => {
            matches!((serde_json::to_string(a), serde_json::to_string(b)), (Ok(sa), Ok(sb)) if sa == sb)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn both_null_matches() {
        assert!(canonical_eq(None, None));
        assert!(canonical_eq(Some(&Value::Null), Some(&Value::Null)));
        assert!(canonical_eq(None, Some(&Value::Null)));
    }

    #[test]
    fn null_does_not_match_a_value() {
        assert!(!canonical_eq(None, Some(&json!({"success": true}))));
    }

    #[test]
    fn key_order_is_insignificant() {
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});
        assert!(canonical_eq(Some(&a), Some(&b)));
    }

    #[test]
    fn numeric_representation_is_exact() {
        let a: Value = serde_json::from_str("1.0").unwrap();
        let b: Value = serde_json::from_str("1").unwrap();
        assert!(!canonical_eq(Some(&a), Some(&b)));
    }

    #[test]
    fn structurally_different_values_do_not_match() {
        assert!(!canonical_eq(
            Some(&json!({"success": true})),
            Some(&json!({"success": false}))
        ));
    }
}
