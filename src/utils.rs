use zbus::zvariant::Value;

/// Strips every variant wrapper around a [`Value`].
#[must_use]
pub fn unwrap_variant<'a, 'b>(v: &'a Value<'b>) -> &'a Value<'b> {
    match v {
        Value::Value(inner) => unwrap_variant(inner),
        v => v,
    }
}

/// Converts a [`Value`] into `&str`, or return [`None`] if it's not `str`.
#[must_use]
pub fn extract_str<'a>(v: &'a Value<'_>) -> Option<&'a str> {
    if let Value::Str(v) = unwrap_variant(v) {
        Some(v.as_str())
    } else {
        None
    }
}

/// Converts a [`Value`] into a list of strings.
///
/// A lone `str` is accepted as a one-element list. Returns [`None`] if the value is neither, or
/// if any element of the array isn't a `str`.
#[must_use]
pub fn extract_str_list(v: &Value<'_>) -> Option<Vec<String>> {
    match unwrap_variant(v) {
        Value::Array(a) => a
            .iter()
            .map(|i| extract_str(i).map(ToOwned::to_owned))
            .collect(),
        Value::Str(s) => Some(vec![s.as_str().to_owned()]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_variants_are_unwrapped() {
        let v = Value::Value(Box::new(Value::Value(Box::new(Value::from("Song")))));
        assert_eq!(extract_str(&v), Some("Song"));
    }

    #[test]
    fn non_string_is_rejected() {
        assert_eq!(extract_str(&Value::from(42u32)), None);
        assert_eq!(extract_str_list(&Value::from(42u32)), None);
    }

    #[test]
    fn string_list() {
        let v = Value::from(vec!["A", "B"]);
        assert_eq!(
            extract_str_list(&v),
            Some(vec!["A".to_owned(), "B".to_owned()])
        );
    }

    #[test]
    fn single_string_as_list() {
        assert_eq!(
            extract_str_list(&Value::from("A")),
            Some(vec!["A".to_owned()])
        );
    }

    #[test]
    fn mixed_array_is_rejected() {
        let v = Value::from(vec![Value::from("A"), Value::from(1i64)]);
        assert_eq!(extract_str_list(&v), None);
    }
}
