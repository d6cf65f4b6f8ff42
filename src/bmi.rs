//! BMI 计算与分类
//!
//! 纯函数，不涉及任何界面或存储

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// 性别（仅用于展示，不影响公式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// 健康分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    Obese,
    ExtremelyObese,
}

impl Category {
    #[cfg(test)]
    pub const ALL: [Category; 6] = [
        Category::SeverelyUnderweight,
        Category::Underweight,
        Category::Normal,
        Category::Overweight,
        Category::Obese,
        Category::ExtremelyObese,
    ];

    /// 显示文本
    pub fn label(self) -> &'static str {
        match self {
            Category::SeverelyUnderweight => "Severely underweight",
            Category::Underweight => "Underweight",
            Category::Normal => "Normal",
            Category::Overweight => "Overweight",
            Category::Obese => "Obese",
            Category::ExtremelyObese => "Extremely obese",
        }
    }

    /// 结果卡片的样式标签
    pub fn style_class(self) -> &'static str {
        match self {
            Category::SeverelyUnderweight => "category-severely-underweight",
            Category::Underweight => "category-underweight",
            Category::Normal => "category-normal",
            Category::Overweight => "category-overweight",
            Category::Obese => "category-obese",
            Category::ExtremelyObese => "category-extremely-obese",
        }
    }
}

/// 一次计算的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiOutcome {
    pub bmi: f64,
    pub category: Category,
}

/// 保留两位小数（远离零方向取整）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 阈值分类，上界为严格小于
pub fn classify(bmi: f64) -> Category {
    if bmi < 16.0 {
        Category::SeverelyUnderweight
    } else if bmi < 18.5 {
        Category::Underweight
    } else if bmi < 25.0 {
        Category::Normal
    } else if bmi < 30.0 {
        Category::Overweight
    } else if bmi < 35.0 {
        Category::Obese
    } else {
        Category::ExtremelyObese
    }
}

fn is_valid_measure(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// 计算 BMI = 体重(kg) / 身高(m)^2
pub fn calculate(height_cm: f64, weight_kg: f64) -> Result<BmiOutcome, CalcError> {
    if !is_valid_measure(height_cm) || !is_valid_measure(weight_kg) {
        return Err(CalcError::InvalidInput);
    }

    let height_m = height_cm / 100.0;
    let bmi = round2(weight_kg / (height_m * height_m));
    Ok(BmiOutcome {
        bmi,
        category: classify(bmi),
    })
}

/// 宽松解析输入框中的数字：取最长的合法数字前缀（可带指数），如 "180cm" -> 180，"1e2" -> 100
pub fn parse_measure(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - end - 1;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // 指数部分至少要有一位数字才算数
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_start = end + 1 + sign;
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_examples() {
        let r = calculate(180.0, 75.0).unwrap();
        assert_eq!(r.bmi, 23.15);
        assert_eq!(r.category, Category::Normal);

        let r = calculate(160.0, 100.0).unwrap();
        assert_eq!(r.bmi, 39.06);
        assert_eq!(r.category, Category::ExtremelyObese);

        let r = calculate(170.0, 45.0).unwrap();
        assert_eq!(r.bmi, 15.57);
        assert_eq!(r.category, Category::SeverelyUnderweight);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(15.99), Category::SeverelyUnderweight);
        assert_eq!(classify(16.0), Category::Underweight);
        assert_eq!(classify(18.49), Category::Underweight);
        assert_eq!(classify(18.5), Category::Normal);
        assert_eq!(classify(24.99), Category::Normal);
        assert_eq!(classify(25.0), Category::Overweight);
        assert_eq!(classify(29.99), Category::Overweight);
        assert_eq!(classify(30.0), Category::Obese);
        assert_eq!(classify(34.99), Category::Obese);
        assert_eq!(classify(35.0), Category::ExtremelyObese);
    }

    #[test]
    fn test_formula_matches_rounding() {
        for h in [120.0, 150.5, 175.0, 199.9] {
            for w in [30.0, 62.3, 80.0, 140.0] {
                let expected = round2(w / ((h / 100.0) * (h / 100.0)));
                assert_eq!(calculate(h, w).unwrap().bmi, expected);
            }
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(calculate(0.0, 70.0), Err(CalcError::InvalidInput));
        assert_eq!(calculate(170.0, 0.0), Err(CalcError::InvalidInput));
        assert_eq!(calculate(f64::NAN, 70.0), Err(CalcError::InvalidInput));
        assert_eq!(calculate(170.0, f64::INFINITY), Err(CalcError::InvalidInput));
        assert_eq!(calculate(-170.0, 70.0), Err(CalcError::InvalidInput));
        assert_eq!(
            CalcError::InvalidInput.to_string(),
            "Please enter valid height and weight values"
        );
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure("180"), Some(180.0));
        assert_eq!(parse_measure("  72.5"), Some(72.5));
        assert_eq!(parse_measure("180cm"), Some(180.0));
        assert_eq!(parse_measure("1.2.3"), Some(1.2));
        assert_eq!(parse_measure(".5"), Some(0.5));
        assert_eq!(parse_measure("-3"), Some(-3.0));
        assert_eq!(parse_measure(""), None);
        assert_eq!(parse_measure("abc"), None);
        assert_eq!(parse_measure("-"), None);
        assert_eq!(parse_measure("."), None);
        assert_eq!(parse_measure("5."), Some(5.0));
    }

    #[test]
    fn test_parse_measure_exponent() {
        assert_eq!(parse_measure("1e2"), Some(100.0));
        assert_eq!(parse_measure("1.8E2cm"), Some(180.0));
        assert_eq!(parse_measure("75e-0"), Some(75.0));
        assert_eq!(parse_measure("2e"), Some(2.0));
        assert_eq!(parse_measure("2e+"), Some(2.0));
        assert_eq!(parse_measure("e5"), None);
    }

    #[test]
    fn test_style_classes_are_exclusive() {
        let classes: Vec<&str> = Category::ALL.iter().map(|c| c.style_class()).collect();
        for (i, a) in classes.iter().enumerate() {
            assert!(a.starts_with("category-"));
            assert!(!classes[i + 1..].contains(a));
        }
        assert_eq!(Category::ExtremelyObese.style_class(), "category-extremely-obese");
    }
}
