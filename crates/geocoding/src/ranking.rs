use std::borrow::Cow;

use crate::result::SearchResult;

/// Appends `, {hint}` unless the query already mentions the hint (any case).
pub fn hinted_query<'a>(query: &'a str, hint: &str) -> Cow<'a, str> {
    if hint.is_empty() || query.to_lowercase().contains(&hint.to_lowercase()) {
        Cow::Borrowed(query)
    } else {
        Cow::Owned(format!("{query}, {hint}"))
    }
}

/// True if `display_name` mentions any alias of the locality.
pub fn matches_locality(display_name: &str, aliases: &[String]) -> bool {
    let name = display_name.to_lowercase();
    aliases
        .iter()
        .any(|alias| !alias.is_empty() && name.contains(&alias.to_lowercase()))
}

/// Locality matches first, everything else after, each group in service
/// order, truncated to `max`.
pub fn rank_by_locality(
    results: Vec<SearchResult>,
    aliases: &[String],
    max: usize,
) -> Vec<SearchResult> {
    let (mut local, other): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|r| matches_locality(&r.display_name, aliases));
    local.extend(other);
    local.truncate(max);
    local
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn aliases() -> Vec<String> {
        vec!["taipei".into(), "臺北".into(), "台北".into()]
    }

    #[test]
    fn hint_is_appended_once() {
        assert_eq!(hinted_query("Shilin Night Market", "Taipei"), "Shilin Night Market, Taipei");
        assert_eq!(hinted_query("taipei zoo", "Taipei"), "taipei zoo");
        assert_eq!(hinted_query("TAIPEI 101", "Taipei"), "TAIPEI 101");
        assert_eq!(hinted_query("anything", ""), "anything");
    }

    #[test]
    fn locality_matches_any_script() {
        let a = aliases();
        assert!(matches_locality("Songshan, Taipei City, Taiwan", &a));
        assert!(matches_locality("臺北車站, 中正區", &a));
        assert!(matches_locality("台北101", &a));
        assert!(!matches_locality("Banqiao, New Taipei City", &[]));
        assert!(!matches_locality("Taichung Station, Taichung", &a));
    }

    #[test]
    fn locality_matches_come_first_in_service_order() {
        let input = vec![
            SearchResult::new("Taichung Park, Taichung", "24.1", "120.6"),
            SearchResult::new("Daan Park, Taipei", "25.0", "121.5"),
            SearchResult::new("Tainan Park, Tainan", "23.0", "120.2"),
            SearchResult::new("Rongxing Garden, 臺北", "25.06", "121.53"),
        ];
        let ranked = rank_by_locality(input, &aliases(), 8);
        let names: Vec<_> = ranked.iter().map(|r| r.primary_name()).collect();
        assert_eq!(
            names,
            vec!["Daan Park", "Rongxing Garden", "Taichung Park", "Tainan Park"]
        );
    }

    #[test]
    fn ranking_truncates() {
        let input: Vec<_> = (0..12)
            .map(|i| SearchResult::new(format!("Place {i}, Taipei"), "25", "121"))
            .collect();
        let ranked = rank_by_locality(input, &aliases(), 8);
        assert_eq!(ranked.len(), 8);
        assert_eq!(ranked[7].primary_name(), "Place 7");
    }
}
