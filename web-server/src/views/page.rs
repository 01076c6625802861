//! Prediction page
//!
//! Server-rendered HTML for the form, the result, the log viewer and the
//! model info panel. Every request renders the whole page.

use std::fmt::Write;

use unit2_core::constants::APP_NAME;
use unit2_core::logic::labels::LANGUAGE_SELECTOR;
use unit2_core::{FieldSpec, InputVector, Language, LogRecord, ModelCard, PredictionResult, FIELDS};

use super::escape_html;

const NO_LOG_MESSAGE: &str = "📭 No predictions logged yet.";

/// Banner severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice success",
            NoticeKind::Info => "notice info",
            NoticeKind::Warning => "notice warning",
            NoticeKind::Error => "notice error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// What the log viewer shows
#[derive(Debug, Clone)]
pub enum LogView {
    Hidden,
    Absent,
    Records(Vec<LogRecord>),
    Unreadable(String),
}

/// Everything one page render needs
#[derive(Debug, Clone)]
pub struct PageView {
    pub lang: Language,
    pub show_log: bool,
    pub inputs: InputVector,
    pub result: Option<PredictionResult>,
    pub notices: Vec<Notice>,
    pub log: LogView,
}

impl PageView {
    pub fn new(lang: Language, show_log: bool) -> Self {
        Self {
            lang,
            show_log,
            inputs: InputVector::default(),
            result: None,
            notices: Vec::new(),
            log: LogView::Hidden,
        }
    }

    pub fn notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notices.push(Notice::new(kind, text));
    }

    /// Query string that keeps the current language and log toggle
    fn state_query(&self) -> String {
        format!("lang={}&show_log={}", self.lang.code(), self.show_log)
    }

    pub fn render(&self) -> String {
        let labels = self.lang.labels();
        let mut html = String::with_capacity(8 * 1024);

        let dir = if self.lang.is_rtl() { "rtl" } else { "ltr" };
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"{}\" dir=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n",
            self.lang.code(),
            dir,
            APP_NAME,
            STYLE
        );

        self.render_language_selector(&mut html);

        let _ = write!(
            html,
            "<h1>⚡ {}</h1>\n<div class=\"designer\"><strong>{}</strong></div>\n",
            escape_html(labels.title),
            escape_html(labels.designer)
        );

        self.render_form(&mut html);

        if let Some(result) = &self.result {
            let _ = write!(
                html,
                "<h2 class=\"result\">{}: {}</h2>\n",
                escape_html(labels.output),
                escape_html(&result.display())
            );
        }

        for notice in &self.notices {
            let _ = write!(
                html,
                "<div class=\"{}\">{}</div>\n",
                notice.kind.css_class(),
                escape_html(&notice.text)
            );
        }

        html.push_str("<hr>\n");
        self.render_log(&mut html);
        self.render_clear(&mut html);
        html.push_str("<hr>\n");
        self.render_model_info(&mut html);

        html.push_str("</main>\n</body>\n</html>\n");
        html
    }

    fn render_language_selector(&self, html: &mut String) {
        let _ = write!(
            html,
            "<form class=\"lang\" method=\"get\" action=\"/\">\n<label>{} \
             <select name=\"lang\" onchange=\"this.form.submit()\">",
            escape_html(LANGUAGE_SELECTOR)
        );
        for lang in Language::ALL {
            let selected = if lang == self.lang { " selected" } else { "" };
            let _ = write!(html, "<option value=\"{}\"{}>{}</option>", lang.code(), selected, lang.display_name());
        }
        let _ = write!(
            html,
            "</select></label>\n<input type=\"hidden\" name=\"show_log\" value=\"{}\">\n\
             <noscript><button type=\"submit\">OK</button></noscript>\n</form>\n",
            self.show_log
        );
    }

    fn render_form(&self, html: &mut String) {
        let labels = self.lang.labels();
        let values = self.inputs.as_array();
        let half = FIELDS.len() / 2;

        let _ = write!(html, "<form method=\"post\" action=\"/predict?{}\">\n<div class=\"columns\">\n", self.state_query());
        for column in [0..half, half..FIELDS.len()] {
            html.push_str("<div class=\"column\">\n");
            for i in column {
                let spec = &FIELDS[i];
                render_slider(html, spec, labels.field(spec.key).unwrap_or(spec.column), values[i]);
            }
            html.push_str("</div>\n");
        }
        let _ = write!(
            html,
            "</div>\n<button type=\"submit\" class=\"primary\">{}</button>\n</form>\n",
            escape_html(labels.predict)
        );
    }

    fn render_log(&self, html: &mut String) {
        let labels = self.lang.labels();
        let checked = if self.show_log { " checked" } else { "" };
        let _ = write!(
            html,
            "<form method=\"get\" action=\"/\">\n<input type=\"hidden\" name=\"lang\" value=\"{}\">\n\
             <label><input type=\"checkbox\" name=\"show_log\" value=\"true\"{} onchange=\"this.form.submit()\"> {}</label>\n\
             <noscript><button type=\"submit\">OK</button></noscript>\n</form>\n",
            self.lang.code(),
            checked,
            escape_html(labels.log)
        );

        match &self.log {
            LogView::Hidden => {}
            LogView::Absent => {
                let _ = write!(html, "<div class=\"notice info\">{}</div>\n", NO_LOG_MESSAGE);
            }
            LogView::Records(records) if records.is_empty() => {
                let _ = write!(html, "<div class=\"notice info\">{}</div>\n", NO_LOG_MESSAGE);
            }
            LogView::Records(records) => {
                render_log_table(html, records);
                let _ = write!(
                    html,
                    "<a class=\"download\" href=\"/log.csv\" download=\"unit2_log.csv\">📥 {}</a>\n",
                    escape_html(labels.download)
                );
            }
            LogView::Unreadable(reason) => {
                let _ = write!(html, "<div class=\"notice warning\">{}</div>\n", escape_html(reason));
            }
        }
    }

    fn render_clear(&self, html: &mut String) {
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/log/clear?{}\">\n\
             <button type=\"submit\">🧹 {}</button>\n</form>\n",
            self.state_query(),
            escape_html(self.lang.labels().clear)
        );
    }

    fn render_model_info(&self, html: &mut String) {
        let labels = self.lang.labels();
        let card = ModelCard::for_language(self.lang);

        let _ = write!(
            html,
            "<details>\n<summary>{}</summary>\n<p>📅 {}</p>\n<p>🧠 {}</p>\n<p><strong>{}:</strong></p>\n<ul class=\"importance\">\n",
            escape_html(labels.model_info),
            escape_html(card.trained),
            escape_html(card.algorithm),
            escape_html(labels.importance)
        );
        for item in &card.importance {
            let _ = write!(html, "<li>{}</li>\n", escape_html(&item.line()));
        }
        html.push_str("</ul>\n</details>\n");
    }
}

fn render_slider(html: &mut String, spec: &FieldSpec, label: &str, value: f32) {
    let value = if spec.integer { format!("{}", value.round()) } else { value.to_string() };
    let _ = write!(
        html,
        "<label class=\"field\">{label}\n\
         <input type=\"range\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
         oninput=\"this.nextElementSibling.value=this.value\">\
         <output>{value}</output>\n</label>\n",
        label = escape_html(label),
        name = spec.name,
        min = spec.min,
        max = spec.max,
        step = spec.step,
        value = value,
    );
}

fn render_log_table(html: &mut String, records: &[LogRecord]) {
    html.push_str("<table class=\"log\">\n<thead><tr><th>Time</th>");
    for spec in FIELDS.iter() {
        let _ = write!(html, "<th>{}</th>", spec.column);
    }
    html.push_str("<th>Predicted MW</th></tr></thead>\n<tbody>\n");

    for record in records {
        let _ = write!(html, "<tr><td>{}</td>", record.time_string());
        for value in record.input.as_array() {
            let _ = write!(html, "<td>{}</td>", value);
        }
        let _ = write!(html, "<td>{:.2}</td></tr>\n", record.predicted_mw);
    }
    html.push_str("</tbody>\n</table>\n");
}

const STYLE: &str = "\
body{font-family:sans-serif;background:#fafafa;color:#222}\
main{max-width:760px;margin:0 auto;padding:1rem}\
h1{font-size:1.6rem}\
.designer{text-align:center;margin-bottom:1rem}\
.columns{display:flex;gap:2rem}\
.column{flex:1}\
.field{display:block;margin:.8rem 0}\
.field input{width:100%}\
.result{color:darkblue}\
.notice{padding:.6rem;border-radius:4px;margin:.5rem 0}\
.success{background:#e6f4ea}.info{background:#e8f0fe}\
.warning{background:#fef7e0}.error{background:#fce8e6}\
table.log{border-collapse:collapse;width:100%;font-size:.85rem}\
table.log td,table.log th{border:1px solid #ddd;padding:.25rem}\
.importance{list-style:none;padding:0;font-family:monospace}";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(mw: f32) -> LogRecord {
        let time = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap().and_hms_opt(12, 0, 0).unwrap();
        LogRecord::new(time, InputVector::default(), mw)
    }

    #[test]
    fn test_render_default_form() {
        let html = PageView::new(Language::English, false).render();

        assert!(html.contains("Unit 2 Active Power Output Prediction (MW)"));
        assert!(html.contains("name=\"steam_flow\" min=\"180\" max=\"910\" step=\"0.01\" value=\"850\""));
        assert!(html.contains("name=\"hp_temperature\" min=\"390\" max=\"540\" step=\"1\" value=\"538\""));
        assert!(html.contains("action=\"/predict?lang=en&show_log=false\""));
        assert!(html.contains("Steam Flow: █████ 25%"));
        assert!(!html.contains("class=\"result\""));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_render_arabic_is_rtl() {
        let html = PageView::new(Language::Arabic, false).render();
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("تنبؤ"));
        assert!(html.contains("<option value=\"ar\" selected>"));
    }

    #[test]
    fn test_render_result_with_two_decimals() {
        let mut view = PageView::new(Language::English, false);
        view.result = Some(PredictionResult { predicted_mw: 245.678, raw_output: 245.678, inference_time_us: 10 });

        let html = view.render();
        assert!(html.contains("Predicted Output: 245.68 MW"));
    }

    #[test]
    fn test_render_log_states() {
        let mut view = PageView::new(Language::English, true);

        view.log = LogView::Absent;
        assert!(view.render().contains(NO_LOG_MESSAGE));

        view.log = LogView::Records(vec![record(212.5)]);
        let html = view.render();
        assert!(html.contains("<td>2025-08-20 12:00:00</td>"));
        assert!(html.contains("<td>212.50</td>"));
        assert!(html.contains("href=\"/log.csv\""));

        view.log = LogView::Unreadable("log is corrupt at line 2: <bad>".to_string());
        let html = view.render();
        assert!(html.contains("log is corrupt at line 2: &lt;bad&gt;"));
        assert!(!html.contains("href=\"/log.csv\""));
    }

    #[test]
    fn test_notices_are_escaped() {
        let mut view = PageView::new(Language::English, false);
        view.notice(NoticeKind::Warning, "Could not write log: <denied>");
        let html = view.render();
        assert!(html.contains("<div class=\"notice warning\">Could not write log: &lt;denied&gt;</div>"));
    }
}
