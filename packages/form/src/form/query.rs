//! Query merging for methods that carry no body.

use url::{Url, form_urlencoded};

use super::store::is_array_name;

/// Merge an urlencoded field rendering into the URL's query string.
///
/// Existing parameters keep their position; a field with the same name
/// overrides the existing value in place, and new names append in field
/// order. Array-style names (containing `[]`) never override, every value
/// is kept. The fragment is preserved, except that an empty one is dropped.
pub(crate) fn merge_into(url: &mut Url, encoded_fields: &str) {
    let mut pairs = parse_pairs(url.query().unwrap_or(""));
    for (name, value) in form_urlencoded::parse(encoded_fields.as_bytes()) {
        upsert(&mut pairs, name.into_owned(), value.into_owned());
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(pairs.iter().map(|(name, value)| (name.as_str(), value.as_str())));
        url.set_query(Some(&serializer.finish()));
    }

    if url.fragment() == Some("") {
        url.set_fragment(None);
    }
}

/// Parse a query string into an ordered mapping, duplicate plain keys
/// last-wins.
fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (name, value) in form_urlencoded::parse(query.as_bytes()) {
        upsert(&mut pairs, name.into_owned(), value.into_owned());
    }
    pairs
}

fn upsert(pairs: &mut Vec<(String, String)>, name: String, value: String) {
    if !is_array_name(&name) {
        if let Some((_, existing)) = pairs.iter_mut().find(|(existing, _)| *existing == name) {
            *existing = value;
            return;
        }
    }
    pairs.push((name, value));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(uri: &str, encoded_fields: &str) -> String {
        let mut url = Url::parse(uri).unwrap();
        merge_into(&mut url, encoded_fields);
        url.to_string()
    }

    #[test]
    fn appends_fields_after_existing_query() {
        assert_eq!(
            merged(
                "http://localhost:8000/path?query=yes#fragment",
                "auth%5Buser%5D=alice&auth%5Bpass%5D=secret"
            ),
            "http://localhost:8000/path?query=yes&auth%5Buser%5D=alice&auth%5Bpass%5D=secret#fragment"
        );
    }

    #[test]
    fn field_overrides_existing_parameter_in_place() {
        assert_eq!(
            merged("http://localhost/?a=1&b=2", "a=9"),
            "http://localhost/?a=9&b=2"
        );
    }

    #[test]
    fn no_fields_leaves_target_unchanged() {
        assert_eq!(
            merged("http://localhost:8000/path?query=yes#fragment", ""),
            "http://localhost:8000/path?query=yes#fragment"
        );
        assert_eq!(merged("http://localhost:8000/path", ""), "http://localhost:8000/path");
    }

    #[test]
    fn empty_merge_clears_question_mark() {
        assert_eq!(merged("http://localhost/path?", ""), "http://localhost/path");
    }

    #[test]
    fn empty_fragment_is_dropped() {
        assert_eq!(merged("http://localhost/path#", "a=1"), "http://localhost/path?a=1");
    }

    #[test]
    fn duplicate_existing_keys_collapse_last_wins() {
        assert_eq!(
            merged("http://localhost/?a=1&a=2&b=3", ""),
            "http://localhost/?a=2&b=3"
        );
    }

    #[test]
    fn array_names_keep_every_value() {
        assert_eq!(
            merged("http://localhost/", "x%5B%5D=a&x%5B%5D=b"),
            "http://localhost/?x%5B%5D=a&x%5B%5D=b"
        );
        // Values already in the query survive the merge too.
        assert_eq!(
            merged("http://localhost/?x%5B%5D=a", "x%5B%5D=b"),
            "http://localhost/?x%5B%5D=a&x%5B%5D=b"
        );
    }
}
