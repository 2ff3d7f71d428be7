use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 答辩阶段
//
// 前端与历史数据中的写法并不统一（"pre-defense"、"Pre Defense" 等），
// parse 按子串宽松归一化到两个规范形态，只有两个子串都不出现才算错误。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum DefenseType {
    #[serde(rename = "Pre-Defense")]
    PreDefense,
    #[serde(rename = "Final Defense")]
    FinalDefense,
}

impl DefenseType {
    pub const PRE_DEFENSE: &'static str = "Pre-Defense";
    pub const FINAL_DEFENSE: &'static str = "Final Defense";

    /// 宽松解析：大小写不敏感的子串匹配，"pre" 优先于 "final"
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.to_lowercase();
        if lower.contains("pre") {
            Some(DefenseType::PreDefense)
        } else if lower.contains("final") {
            Some(DefenseType::FinalDefense)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DefenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefenseType::PreDefense => write!(f, "{}", DefenseType::PRE_DEFENSE),
            DefenseType::FinalDefense => write!(f, "{}", DefenseType::FINAL_DEFENSE),
        }
    }
}

impl<'de> Deserialize<'de> for DefenseType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DefenseType::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "无效的答辩阶段: '{s}'. 支持的阶段: Pre-Defense, Final Defense"
            ))
        })
    }
}

// 评价角色
//
// 与答辩阶段不同，评价角色必须严格匹配（fail closed）。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum EvaluationType {
    Supervisor, // 导师评分
    Committee,  // 委员会评分
}

impl EvaluationType {
    pub const SUPERVISOR: &'static str = "supervisor";
    pub const COMMITTEE: &'static str = "committee";
}

impl std::fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationType::Supervisor => write!(f, "{}", EvaluationType::SUPERVISOR),
            EvaluationType::Committee => write!(f, "{}", EvaluationType::COMMITTEE),
        }
    }
}

impl std::str::FromStr for EvaluationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supervisor" => Ok(EvaluationType::Supervisor),
            "committee" => Ok(EvaluationType::Committee),
            _ => Err(format!("Invalid evaluation type: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for EvaluationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<EvaluationType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的评价角色: '{s}'. 支持的角色: supervisor, committee"
            ))
        })
    }
}

/// 阶段 + 角色对应的满分上限
///
/// 预答辩 20+10，最终答辩 40+30，合计满分 100，阶段权重由上限本身编码。
pub fn max_marks(defense_type: DefenseType, evaluation_type: EvaluationType) -> f64 {
    match (defense_type, evaluation_type) {
        (DefenseType::PreDefense, EvaluationType::Supervisor) => 20.0,
        (DefenseType::PreDefense, EvaluationType::Committee) => 10.0,
        (DefenseType::FinalDefense, EvaluationType::Supervisor) => 40.0,
        (DefenseType::FinalDefense, EvaluationType::Committee) => 30.0,
    }
}

/// 分数范围校验，任何写入前都要先通过
pub fn validate_marks(
    defense_type: DefenseType,
    evaluation_type: EvaluationType,
    marks: f64,
) -> bool {
    marks >= 0.0 && marks <= max_marks(defense_type, evaluation_type)
}

// 评价记录实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub student_id: i64,
    pub evaluator_id: i64,
    pub proposal_id: i64,
    pub defense_type: DefenseType,
    pub evaluation_type: EvaluationType,
    pub marks: f64,
    pub comments: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_type_parse_variants() {
        assert_eq!(
            DefenseType::parse("Pre-Defense"),
            Some(DefenseType::PreDefense)
        );
        assert_eq!(
            DefenseType::parse("pre defense"),
            Some(DefenseType::PreDefense)
        );
        assert_eq!(
            DefenseType::parse("PREDEFENSE"),
            Some(DefenseType::PreDefense)
        );
        assert_eq!(
            DefenseType::parse("Final Defense"),
            Some(DefenseType::FinalDefense)
        );
        assert_eq!(
            DefenseType::parse("final-defense"),
            Some(DefenseType::FinalDefense)
        );
        assert_eq!(DefenseType::parse("midterm"), None);
        assert_eq!(DefenseType::parse(""), None);
    }

    #[test]
    fn test_evaluation_type_fails_closed() {
        assert!("supervisor".parse::<EvaluationType>().is_ok());
        assert!("committee".parse::<EvaluationType>().is_ok());
        assert!("Supervisor".parse::<EvaluationType>().is_err());
        assert!("examiner".parse::<EvaluationType>().is_err());
    }

    #[test]
    fn test_max_marks_table() {
        assert_eq!(
            max_marks(DefenseType::PreDefense, EvaluationType::Supervisor),
            20.0
        );
        assert_eq!(
            max_marks(DefenseType::PreDefense, EvaluationType::Committee),
            10.0
        );
        assert_eq!(
            max_marks(DefenseType::FinalDefense, EvaluationType::Supervisor),
            40.0
        );
        assert_eq!(
            max_marks(DefenseType::FinalDefense, EvaluationType::Committee),
            30.0
        );
    }

    #[test]
    fn test_validate_marks_boundaries() {
        // 上限本身可接受
        assert!(validate_marks(
            DefenseType::PreDefense,
            EvaluationType::Supervisor,
            20.0
        ));
        assert!(validate_marks(
            DefenseType::FinalDefense,
            EvaluationType::Committee,
            30.0
        ));
        // 超出上限拒绝
        assert!(!validate_marks(
            DefenseType::PreDefense,
            EvaluationType::Supervisor,
            20.01
        ));
        assert!(!validate_marks(
            DefenseType::PreDefense,
            EvaluationType::Committee,
            10.5
        ));
        // 负分拒绝
        assert!(!validate_marks(
            DefenseType::FinalDefense,
            EvaluationType::Supervisor,
            -0.5
        ));
        // 零分可接受
        assert!(validate_marks(
            DefenseType::FinalDefense,
            EvaluationType::Committee,
            0.0
        ));
    }
}
