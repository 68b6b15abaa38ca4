use crate::model::{ItemRule, MenuConfig};

impl MenuConfig {
    /// Configuration used whenever nothing usable is stored.
    pub fn builtin() -> Self {
        Self {
            items: vec![
                ItemRule::new("Copy", "复制"),
                ItemRule::new("Web search", "搜索"),
                ItemRule::new("Search in Edge", "搜索"),
                ItemRule::new("Select all", "全选"),
                ItemRule::new("Eudic", "词典").in_package("com.eusoft.eudic"),
                ItemRule::new("Share", "分享"),
                ItemRule::new("Read aloud", "朗读"),
                ItemRule::new("Translate", "谷歌翻译")
                    .in_package("com.google.android.apps.translate"),
                ItemRule::new("Translate", "系统翻译").in_package("com.coloros.translate"),
            ],
            hidden_items: vec!["AI Writer".to_string(), "Define".to_string()],
            debug: true,
        }
    }
}
