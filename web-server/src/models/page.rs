//! Page query parameters

use serde::Deserialize;

use unit2_core::Language;

/// Query string shared by the HTML routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub lang: Option<String>,
    pub show_log: Option<bool>,
}

impl PageQuery {
    pub fn language(&self, fallback: Language) -> Language {
        self.lang
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or(fallback)
    }

    pub fn show_log(&self) -> bool {
        self.show_log.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_fallback() {
        let query = PageQuery { lang: Some("ar".to_string()), show_log: None };
        assert_eq!(query.language(Language::English), Language::Arabic);

        let query = PageQuery { lang: Some("xx".to_string()), show_log: Some(true) };
        assert_eq!(query.language(Language::Arabic), Language::Arabic);
        assert!(query.show_log());

        assert!(!PageQuery::default().show_log());
    }
}
