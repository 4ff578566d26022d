use url::Url;

/// Query parameters that survive normalization; everything else is noise.
const KEPT_QUERY_PARAMS: [&str; 3] = ["utm_source", "utm_medium", "utm_campaign"];

/// Canonical form of an article URL, used as the de-duplication key.
///
/// Lower-cases the host, drops the fragment and strips the query down to the
/// retained parameter allow-list. Anything that does not parse as an absolute
/// URL comes back as the trimmed original string. Idempotent:
/// `normalize_url(normalize_url(u)) == normalize_url(u)`.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut parsed = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(_) => return trimmed.to_string(),
    };

    parsed.set_fragment(None);

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| KEPT_QUERY_PARAMS.contains(&k.to_ascii_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }

    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_host_and_drops_fragment() {
        assert_eq!(
            normalize_url("https://News.Example.COM/story/1#comments"),
            "https://news.example.com/story/1"
        );
    }

    #[test]
    fn strips_query_noise_but_keeps_utm_fields() {
        assert_eq!(
            normalize_url("https://example.com/a?id=5&utm_source=feed&session=xyz"),
            "https://example.com/a?utm_source=feed"
        );
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "https://Ex.com/a?utm_source=rss&ref=tw#frag",
            "https://example.com/plain",
            "not a url at all",
            "  https://example.com/pad?utm_medium=email  ",
        ];
        for input in inputs {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once, "input: {input}");
        }
    }

    #[test]
    fn malformed_input_passes_through_trimmed() {
        assert_eq!(normalize_url("  /relative/path  "), "/relative/path");
        assert_eq!(normalize_url(""), "");
    }
}
