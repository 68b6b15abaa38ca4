use crate::snapshot::EntrySnapshot;
use carte_config::{ItemRule, MenuConfig};

/// A rule governing an entry, with its position in `MenuConfig::items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub rank: usize,
    pub rule: &'a ItemRule,
}

/// Find the rule for an entry titled `title` launching into `package`.
///
/// A rule scoped to the entry's package wins over an unscoped one; among
/// equals, the earliest rule wins. Comparison is exact.
pub fn match_rule<'a>(
    title: &str,
    package: Option<&str>,
    config: &'a MenuConfig,
) -> Option<RuleMatch<'a>> {
    let find = |scope: Option<&str>| {
        config
            .items
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.targets(title, scope))
            .map(|(rank, rule)| RuleMatch { rank, rule })
    };

    if let Some(package) = package {
        if let Some(hit) = find(Some(package)) {
            return Some(hit);
        }
    }
    find(None)
}

pub fn match_snapshot<'a>(
    snapshot: &EntrySnapshot,
    config: &'a MenuConfig,
) -> Option<RuleMatch<'a>> {
    match_rule(&snapshot.title, snapshot.package_name.as_deref(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MenuConfig {
        MenuConfig::new(
            vec![
                ItemRule::new("Translate", "翻译"),
                ItemRule::new("Translate", "谷歌翻译")
                    .in_package("com.google.android.apps.translate"),
                ItemRule::new("Copy", "复制"),
                ItemRule::new("Copy", "拷贝"),
            ],
            vec![],
        )
    }

    #[test]
    fn scoped_rule_beats_earlier_unscoped_rule() {
        let config = config();
        let hit = match_rule("Translate", Some("com.google.android.apps.translate"), &config)
            .unwrap();
        assert_eq!(hit.rank, 1);
        assert_eq!(hit.rule.custom_label, "谷歌翻译");
    }

    #[test]
    fn unknown_package_falls_back_to_unscoped() {
        let config = config();
        let hit = match_rule("Translate", Some("com.coloros.translate"), &config).unwrap();
        assert_eq!(hit.rank, 0);
    }

    #[test]
    fn entry_without_package_never_matches_scoped_rule() {
        let config = MenuConfig::new(
            vec![ItemRule::new("Eudic", "词典").in_package("com.eusoft.eudic")],
            vec![],
        );
        assert!(match_rule("Eudic", None, &config).is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let config = config();
        assert_eq!(match_rule("Copy", None, &config).unwrap().rank, 2);
    }

    #[test]
    fn title_comparison_is_case_sensitive() {
        let config = config();
        assert!(match_rule("copy", None, &config).is_none());
        assert!(match_rule("Copy ", None, &config).is_none());
    }
}
