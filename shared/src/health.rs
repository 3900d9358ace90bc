//! 健康计算器与进度记录
//!
//! BMI、卡路里、体脂的数值由服务端计算，这里只负责分类展示、
//! 进度趋势与折线图坐标。

use crate::Tone;
use crate::date::Timestamp;
use serde::{Deserialize, Serialize};

// =========================================================
// BMI
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            BmiCategory::Underweight | BmiCategory::Overweight => Tone::Warning,
            BmiCategory::Normal => Tone::Success,
            BmiCategory::Obese => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ideal_weight_range: Range,
}

impl BmiResult {
    pub fn classification(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi)
    }
}

// =========================================================
// 卡路里 / 体脂
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macro {
    pub grams: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein: Macro,
    pub carbohydrates: Macro,
    pub fat: Macro,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieResult {
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_goal: f64,
    #[serde(default)]
    pub macronutrient_breakdown: MacroBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResult {
    pub body_fat_percentage: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ideal_range: Range,
}

/// 档案表单中的活动水平选项 (value, label)
pub const ACTIVITY_LEVELS: [(&str, &str); 5] = [
    ("sedentary", "Sedentary (little to no exercise)"),
    ("lightly_active", "Lightly Active (light exercise 1-3 days/week)"),
    ("moderately_active", "Moderately Active (moderate exercise 3-5 days/week)"),
    ("very_active", "Very Active (hard exercise 6-7 days/week)"),
    ("extremely_active", "Extremely Active (very hard exercise, physical job)"),
];

pub const GOALS: [(&str, &str); 3] = [
    ("weight_loss", "Weight Loss"),
    ("weight_gain", "Weight Gain"),
    ("maintenance", "Weight Maintenance"),
];

pub const GENDERS: [(&str, &str); 3] = [("male", "Male"), ("female", "Female"), ("other", "Other")];

/// `lightly_active` → `lightly active`
pub fn humanize(value: &str) -> String {
    value.replace('_', " ")
}

// =========================================================
// 进度记录
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
    #[serde(default)]
    pub muscle_mass: Option<f64>,
    #[serde(default)]
    pub measurements: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub date_recorded: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressInput {
    pub weight: Option<f64>,
    pub body_fat_percentage: Option<f64>,
    pub muscle_mass: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProgressInput {
    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.body_fat_percentage.is_none() && self.muscle_mass.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Weight,
    BodyFat,
    MuscleMass,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Weight, Metric::BodyFat, Metric::MuscleMass];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Weight => "Weight",
            Metric::BodyFat => "Body Fat",
            Metric::MuscleMass => "Muscle Mass",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Weight | Metric::MuscleMass => "kg",
            Metric::BodyFat => "%",
        }
    }

    pub fn value(&self, record: &ProgressRecord) -> Option<f64> {
        match self {
            Metric::Weight => record.weight,
            Metric::BodyFat => record.body_fat_percentage,
            Metric::MuscleMass => record.muscle_mass,
        }
    }
}

/// 某项指标的最新值与相对上一次记录的变化
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressTrend {
    pub metric: Metric,
    pub latest: f64,
    pub delta: Option<f64>,
}

/// 按记录日期升序排列（后端按降序返回）
pub fn sort_chronologically(records: &mut [ProgressRecord]) {
    records.sort_by_key(|r| r.date_recorded);
}

pub fn trend(records: &[ProgressRecord], metric: Metric) -> Option<ProgressTrend> {
    let mut sorted: Vec<&ProgressRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date_recorded);
    let mut values = sorted.iter().filter_map(|r| metric.value(r)).rev();
    let latest = values.next()?;
    let delta = values.next().map(|previous| latest - previous);
    Some(ProgressTrend {
        metric,
        latest,
        delta,
    })
}

/// 折线图的 SVG `points` 属性，值域映射到 `width × height` 画布（y 轴向下）
pub fn chart_points(values: &[f64], width: f64, height: f64) -> String {
    if values.is_empty() {
        return String::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = step * i as f64;
            let y = if max > min {
                height - (v - min) / span * height
            } else {
                height / 2.0
            };
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: i64, date: &str, weight: Option<f64>) -> ProgressRecord {
        serde_json::from_value(json!({
            "id": id,
            "weight": weight,
            "date_recorded": date
        }))
        .unwrap()
    }

    #[test]
    fn bmi_category_thresholds() {
        assert_eq!(BmiCategory::from_bmi(17.9).label(), "Underweight");
        assert_eq!(BmiCategory::from_bmi(24.9).label(), "Normal weight");
        assert_eq!(BmiCategory::from_bmi(29.9).label(), "Overweight");
        assert_eq!(BmiCategory::from_bmi(30.0).label(), "Obese");
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
    }

    #[test]
    fn bmi_tones() {
        assert_eq!(BmiCategory::Underweight.tone(), Tone::Warning);
        assert_eq!(BmiCategory::Normal.tone(), Tone::Success);
        assert_eq!(BmiCategory::Obese.tone(), Tone::Error);
    }

    #[test]
    fn calorie_result_parses() {
        let result: CalorieResult = serde_json::from_value(json!({
            "bmr": 1600.0, "tdee": 2200.0, "calorie_goal": 1700.0,
            "macronutrient_breakdown": {
                "protein": { "grams": 127.5, "calories": 510.0 },
                "carbohydrates": { "grams": 170.0, "calories": 680.0 },
                "fat": { "grams": 56.7, "calories": 510.0 }
            }
        }))
        .unwrap();
        assert_eq!(result.macronutrient_breakdown.carbohydrates.grams, 170.0);
    }

    #[test]
    fn trend_uses_latest_two_values_by_date() {
        let records = vec![
            record(3, "2024-03-01T08:00:00", Some(78.0)),
            record(2, "2024-02-01T08:00:00", None),
            record(1, "2024-01-01T08:00:00", Some(80.5)),
        ];
        let t = trend(&records, Metric::Weight).unwrap();
        assert_eq!(t.latest, 78.0);
        assert_eq!(t.delta, Some(-2.5));
        assert!(trend(&records, Metric::BodyFat).is_none());
    }

    #[test]
    fn single_value_has_no_delta() {
        let records = vec![record(1, "2024-01-01T08:00:00", Some(70.0))];
        assert_eq!(trend(&records, Metric::Weight).unwrap().delta, None);
    }

    #[test]
    fn chart_points_scale_to_canvas() {
        assert_eq!(chart_points(&[], 100.0, 50.0), "");
        assert_eq!(chart_points(&[1.0, 3.0], 100.0, 50.0), "0.0,50.0 100.0,0.0");
        assert_eq!(chart_points(&[2.0, 2.0], 100.0, 50.0), "0.0,25.0 100.0,25.0");
    }

    #[test]
    fn humanize_replaces_underscores() {
        assert_eq!(humanize("moderately_active"), "moderately active");
    }
}
