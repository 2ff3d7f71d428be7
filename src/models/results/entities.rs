use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 发布成绩实体
//
// 每名学生至多一条，由发布批处理一次性写入，此后不可变。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct PublishedResult {
    pub id: i64,
    pub student_id: i64,
    pub proposal_id: i64,
    pub grade: String,
    pub point: f64,
    pub total_marks: f64,
    pub course_code: String,
    pub course_title: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// 总分到等级/绩点的固定换算表
///
/// 区间左闭右开（A+ 上界闭），按降序查表。
pub fn resolve_grade(total_marks: f64) -> (&'static str, f64) {
    if total_marks >= 80.0 {
        ("A+", 4.00)
    } else if total_marks >= 75.0 {
        ("A", 3.75)
    } else if total_marks >= 70.0 {
        ("A-", 3.50)
    } else if total_marks >= 65.0 {
        ("B+", 3.25)
    } else if total_marks >= 60.0 {
        ("B", 3.00)
    } else if total_marks >= 55.0 {
        ("B-", 2.75)
    } else if total_marks >= 50.0 {
        ("C+", 2.50)
    } else if total_marks >= 45.0 {
        ("C", 2.25)
    } else if total_marks >= 40.0 {
        ("C-", 2.00)
    } else {
        ("F", 0.00)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(resolve_grade(80.00), ("A+", 4.00));
        assert_eq!(resolve_grade(79.99), ("A", 3.75));
        assert_eq!(resolve_grade(100.0), ("A+", 4.00));
        assert_eq!(resolve_grade(40.00), ("C-", 2.00));
        assert_eq!(resolve_grade(39.99), ("F", 0.00));
        assert_eq!(resolve_grade(0.0), ("F", 0.00));
    }

    #[test]
    fn test_grade_table_midpoints() {
        assert_eq!(resolve_grade(77.0), ("A", 3.75));
        assert_eq!(resolve_grade(72.5), ("A-", 3.50));
        assert_eq!(resolve_grade(66.0), ("B+", 3.25));
        assert_eq!(resolve_grade(61.0), ("B", 3.00));
        assert_eq!(resolve_grade(57.0), ("B-", 2.75));
        assert_eq!(resolve_grade(52.0), ("C+", 2.50));
        assert_eq!(resolve_grade(47.0), ("C", 2.25));
        assert_eq!(resolve_grade(42.0), ("C-", 2.00));
    }
}
