//! Tag predicates for selecting ways and relations.

/// Returns true when any tag key is one of `keys`, or when `keys` is empty.
pub(super) fn has_selected_key<'a, T>(tags: T, keys: &[String]) -> bool
where
    T: IntoIterator<Item = (&'a str, &'a str)>,
{
    keys.is_empty()
        || tags
            .into_iter()
            .any(|(key, _)| keys.iter().any(|selected| selected == key))
}

/// Returns true when the `type` tag names one of `types`.
pub(super) fn has_selected_type<'a, T>(tags: T, types: &[String]) -> bool
where
    T: IntoIterator<Item = (&'a str, &'a str)>,
{
    tags.into_iter()
        .any(|(key, value)| key == "type" && types.iter().any(|selected| selected == value))
}
