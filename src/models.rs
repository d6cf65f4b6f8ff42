use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::bmi::{BmiOutcome, Gender};

/// 最近一次计算的完整快照（存储键 `bmi_last`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub age: String,
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub gender: Gender,
    pub bmi: f64,
    pub category: String,
    pub timestamp: i64, // 毫秒时间戳
}

impl ResultRecord {
    pub fn new(age: String, height: f64, weight: f64, gender: Gender, outcome: BmiOutcome) -> Self {
        Self {
            age,
            height,
            weight,
            gender,
            bmi: outcome.bmi,
            category: outcome.category.label().to_string(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// "上次保存" 摘要行
    pub fn summary(&self) -> String {
        let when = Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        format!(
            "Last calculation — BMI: {:.2} ({}) — {}",
            self.bmi, self.category, when
        )
    }
}

/// 明暗主题（存储键 `theme`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// 只接受 "dark" / "light"
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// 切换按钮图标：暗色时显示太阳，亮色时显示月亮
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::calculate;

    #[test]
    fn test_record_json_shape() {
        let record = ResultRecord {
            age: "30".to_string(),
            height: 180.0,
            weight: 75.0,
            gender: Gender::Female,
            bmi: 23.15,
            category: "Normal".to_string(),
            timestamp: 1_700_000_000_000,
        };
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gender"], "female");
        assert_eq!(json["height"], 180.0);
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
        assert_eq!(json["category"], "Normal");
    }

    #[test]
    fn test_record_defaults_optional_fields() {
        let raw = r#"{"height":170,"weight":60,"bmi":20.76,"category":"Normal","timestamp":1}"#;
        let record: ResultRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.age, "");
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.height, 170.0);
    }

    #[test]
    fn test_new_record_and_summary() {
        let outcome = calculate(180.0, 75.0).unwrap();
        let record = ResultRecord::new(String::new(), 180.0, 75.0, Gender::Male, outcome);
        assert_eq!(record.category, "Normal");
        assert!(record.timestamp > 0);
        assert!(record
            .summary()
            .starts_with("Last calculation — BMI: 23.15 (Normal) — "));
    }

    #[test]
    fn test_theme_helpers() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("Dark"), None);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Light.as_str(), "light");
        assert_eq!(Theme::Dark.icon(), "☀️");
    }
}
