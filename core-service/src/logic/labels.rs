//! Bilingual Label Table
//!
//! Static display strings for the prediction page, English and Arabic.

use serde::{Deserialize, Serialize};

/// Caption of the language selector (same in both languages)
pub const LANGUAGE_SELECTOR: &str = "🌐 Language / اللغة";

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// Short code used in query strings
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Parse a language code or name, case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "ar" | "arabic" => Some(Language::Arabic),
            _ => None,
        }
    }

    /// Name shown in the selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Arabic)
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH,
            Language::Arabic => &ARABIC,
        }
    }
}

/// One language's set of display strings
#[derive(Debug, Serialize)]
pub struct Labels {
    pub title: &'static str,
    pub steam: &'static str,
    pub hrh_p: &'static str,
    pub hrh_t: &'static str,
    pub main_p: &'static str,
    pub hp_t: &'static str,
    pub ambient: &'static str,
    pub predict: &'static str,
    pub status: &'static str,
    pub output: &'static str,
    pub log: &'static str,
    pub download: &'static str,
    pub clear: &'static str,
    pub designer: &'static str,
    pub model_info: &'static str,
    pub trained: &'static str,
    pub algo: &'static str,
    pub importance: &'static str,
}

pub static ENGLISH: Labels = Labels {
    title: "Unit 2 Active Power Output Prediction (MW)",
    steam: "Steam Flow (Ton/h)",
    hrh_p: "HRH Pressure (MPa)",
    hrh_t: "HRH Temperature (°C)",
    main_p: "Main Steam Pressure (MPa)",
    hp_t: "HP Steam Temperature (°C)",
    ambient: "Ambient Temperature (°C)",
    predict: "Predict",
    status: "Status",
    output: "Predicted Output",
    log: "Show Prediction Log",
    download: "Download Log as CSV",
    clear: "Clear Log",
    designer: "UI Created by Eng. Mohammed Assaf",
    model_info: "Model Info",
    trained: "Trained Date: 2025-08-20",
    algo: "Algorithm: Random Forest Regressor (ONNX)",
    importance: "Input Importance",
};

pub static ARABIC: Labels = Labels {
    title: "توقع القدرة الكهربائية الفعالة للوحدة 2 (ميجاواط)",
    steam: "تدفق البخار (طن/ساعة)",
    hrh_p: "ضغط إعادة التسخين العالي (ميجا باسكال)",
    hrh_t: "درجة حرارة إعادة التسخين العالي (°م)",
    main_p: "ضغط البخار الرئيسي (ميجا باسكال)",
    hp_t: "درجة حرارة البخار العالي (°م)",
    ambient: "درجة حرارة الجو (°م)",
    predict: "تنبؤ",
    status: "الحالة",
    output: "القيمة المتوقعة",
    log: "عرض سجل التنبؤات",
    download: "تحميل السجل",
    clear: "مسح السجل",
    designer: "الواجهة التفاعلية إنشاء م. محمد عساف",
    model_info: "معلومات النموذج",
    trained: "تاريخ التدريب: 2025-08-20",
    algo: "الخوارزمية: غابة عشوائية (ONNX)",
    importance: "أهمية المدخلات",
};

impl Labels {
    /// Label for an input field key (`steam`, `hrh_p`, ...)
    pub fn field(&self, key: &str) -> Option<&'static str> {
        let label = match key {
            "steam" => self.steam,
            "hrh_p" => self.hrh_p,
            "hrh_t" => self.hrh_t,
            "main_p" => self.main_p,
            "hp_t" => self.hp_t,
            "ambient" => self.ambient,
            _ => return None,
        };
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::inputs::FIELDS;

    #[test]
    fn test_language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("Arabic"), Some(Language::Arabic));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_every_field_has_a_label() {
        for lang in Language::ALL {
            for field in FIELDS.iter() {
                let label = lang.labels().field(field.key);
                assert!(label.is_some_and(|l| !l.is_empty()), "{} missing in {:?}", field.key, lang);
            }
        }
    }

    #[test]
    fn test_only_arabic_is_rtl() {
        assert!(Language::Arabic.is_rtl());
        assert!(!Language::English.is_rtl());
        assert_eq!(Language::default(), Language::English);
    }
}
