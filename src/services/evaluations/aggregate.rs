//! 成绩聚合
//!
//! 对一名学生的评价记录集合做纯函数计算，每次调用现算，不缓存不落库。
//! 中间值保留全精度，只有对外暴露的数字在边界处舍入到两位小数。

use crate::models::evaluations::entities::{DefenseType, Evaluation, EvaluationType};
use crate::models::evaluations::responses::{AggregateResult, PhaseResult};

/// 两位小数舍入，只在输出边界使用
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// 单阶段全精度中间值
struct PhaseRaw {
    supervisor_mark: f64,
    committee_marks: Vec<f64>,
}

impl PhaseRaw {
    fn collect(evaluations: &[Evaluation], defense_type: DefenseType) -> Self {
        let mut supervisor_mark = 0.0;
        let mut committee_marks = Vec::new();

        for eval in evaluations.iter().filter(|e| e.defense_type == defense_type) {
            match eval.evaluation_type {
                // 写入键含 evaluator_id，导师与课程导师都提交会留下两条导师
                // 记录：展示时取遍历到的最后一条，发布由完整性检查拦下
                EvaluationType::Supervisor => supervisor_mark = eval.marks,
                EvaluationType::Committee => committee_marks.push(eval.marks),
            }
        }

        Self {
            supervisor_mark,
            committee_marks,
        }
    }

    /// 委员会均分，没有任何委员会评分时为 0
    fn committee_average(&self) -> f64 {
        if self.committee_marks.is_empty() {
            return 0.0;
        }
        self.committee_marks.iter().sum::<f64>() / self.committee_marks.len() as f64
    }

    fn phase_total(&self) -> f64 {
        self.supervisor_mark + self.committee_average()
    }

    fn into_result(self) -> PhaseResult {
        let committee_average = round2(self.committee_average());
        let phase_total = round2(self.phase_total());
        PhaseResult {
            supervisor_mark: round2(self.supervisor_mark),
            committee_marks: self.committee_marks,
            committee_average,
            phase_total,
        }
    }
}

/// 聚合一名学生的全部评价记录
///
/// overall_total 在全精度阶段小计上求和后才舍入，
/// 避免两次舍入误差叠加。
pub fn aggregate(evaluations: &[Evaluation]) -> AggregateResult {
    let pre = PhaseRaw::collect(evaluations, DefenseType::PreDefense);
    let fin = PhaseRaw::collect(evaluations, DefenseType::FinalDefense);

    let overall_total = round2(pre.phase_total() + fin.phase_total());

    AggregateResult {
        pre_defense: pre.into_result(),
        final_defense: fin.into_result(),
        overall_total,
    }
}

/// 发布前的完整性检查
///
/// 每个阶段恰好一条导师记录且至少一条委员会记录，两个阶段都满足才可发布。
/// 导师与课程导师对同一阶段都提交时该阶段有两条导师记录，同样不可发布，
/// 需要其中一方撤回（即另一方重交覆盖自己那条之外无自动合并）。
pub fn is_complete_for_publication(evaluations: &[Evaluation]) -> bool {
    [DefenseType::PreDefense, DefenseType::FinalDefense]
        .iter()
        .all(|&dt| {
            let supervisor_count = evaluations
                .iter()
                .filter(|e| e.defense_type == dt && e.evaluation_type == EvaluationType::Supervisor)
                .count();
            let committee_count = evaluations
                .iter()
                .filter(|e| e.defense_type == dt && e.evaluation_type == EvaluationType::Committee)
                .count();
            supervisor_count == 1 && committee_count >= 1
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(
        evaluator_id: i64,
        defense_type: DefenseType,
        evaluation_type: EvaluationType,
        marks: f64,
    ) -> Evaluation {
        let now = chrono::Utc::now();
        Evaluation {
            id: evaluator_id,
            student_id: 1,
            evaluator_id,
            proposal_id: 1,
            defense_type,
            evaluation_type,
            marks,
            comments: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_scenario_aggregates_to_88() {
        // 预答辩 导师18 委员会[8,9]，最终答辩 导师35 委员会[25,28]
        let evals = vec![
            eval(10, DefenseType::PreDefense, EvaluationType::Supervisor, 18.0),
            eval(11, DefenseType::PreDefense, EvaluationType::Committee, 8.0),
            eval(12, DefenseType::PreDefense, EvaluationType::Committee, 9.0),
            eval(
                10,
                DefenseType::FinalDefense,
                EvaluationType::Supervisor,
                35.0,
            ),
            eval(
                11,
                DefenseType::FinalDefense,
                EvaluationType::Committee,
                25.0,
            ),
            eval(
                12,
                DefenseType::FinalDefense,
                EvaluationType::Committee,
                28.0,
            ),
        ];

        let result = aggregate(&evals);
        assert_eq!(result.pre_defense.supervisor_mark, 18.0);
        assert_eq!(result.pre_defense.committee_average, 8.5);
        assert_eq!(result.pre_defense.phase_total, 26.5);
        assert_eq!(result.final_defense.supervisor_mark, 35.0);
        assert_eq!(result.final_defense.committee_average, 26.5);
        assert_eq!(result.final_defense.phase_total, 61.5);
        assert_eq!(result.overall_total, 88.0);
    }

    #[test]
    fn test_empty_committee_average_is_zero() {
        let evals = vec![eval(
            10,
            DefenseType::PreDefense,
            EvaluationType::Supervisor,
            15.0,
        )];

        let result = aggregate(&evals);
        assert_eq!(result.pre_defense.committee_average, 0.0);
        assert_eq!(result.pre_defense.phase_total, 15.0);
        assert_eq!(result.final_defense.phase_total, 0.0);
        assert_eq!(result.overall_total, 15.0);
    }

    #[test]
    fn test_no_evaluations_at_all() {
        let result = aggregate(&[]);
        assert_eq!(result.pre_defense.supervisor_mark, 0.0);
        assert_eq!(result.pre_defense.committee_average, 0.0);
        assert_eq!(result.overall_total, 0.0);
    }

    #[test]
    fn test_rounding_happens_at_boundary_only() {
        // 委员会 [7, 7, 8] 均分 7.333... → 展示 7.33，
        // 但总分在全精度小计上求和后才舍入。
        let evals = vec![
            eval(10, DefenseType::PreDefense, EvaluationType::Supervisor, 18.0),
            eval(11, DefenseType::PreDefense, EvaluationType::Committee, 7.0),
            eval(12, DefenseType::PreDefense, EvaluationType::Committee, 7.0),
            eval(13, DefenseType::PreDefense, EvaluationType::Committee, 8.0),
        ];

        let result = aggregate(&evals);
        assert_eq!(result.pre_defense.committee_average, 7.33);
        assert_eq!(result.pre_defense.phase_total, 25.33);
        assert_eq!(result.overall_total, 25.33);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let evals = vec![
            eval(10, DefenseType::PreDefense, EvaluationType::Supervisor, 18.0),
            eval(11, DefenseType::PreDefense, EvaluationType::Committee, 8.0),
            eval(12, DefenseType::PreDefense, EvaluationType::Committee, 9.0),
        ];

        let first = aggregate(&evals);
        let second = aggregate(&evals);
        assert_eq!(first, second);
    }

    #[test]
    fn test_completeness_requires_both_phases() {
        let mut evals = vec![
            eval(10, DefenseType::PreDefense, EvaluationType::Supervisor, 18.0),
            eval(11, DefenseType::PreDefense, EvaluationType::Committee, 8.0),
        ];
        // 只有预答辩，不可发布
        assert!(!is_complete_for_publication(&evals));

        evals.push(eval(
            10,
            DefenseType::FinalDefense,
            EvaluationType::Supervisor,
            35.0,
        ));
        // 最终答辩缺委员会评分
        assert!(!is_complete_for_publication(&evals));

        evals.push(eval(
            11,
            DefenseType::FinalDefense,
            EvaluationType::Committee,
            25.0,
        ));
        assert!(is_complete_for_publication(&evals));
    }

    #[test]
    fn test_completeness_rejects_duplicate_supervisor_marks() {
        // 导师和课程导师都交了预答辩导师评分
        let evals = vec![
            eval(10, DefenseType::PreDefense, EvaluationType::Supervisor, 18.0),
            eval(20, DefenseType::PreDefense, EvaluationType::Supervisor, 17.0),
            eval(11, DefenseType::PreDefense, EvaluationType::Committee, 8.0),
            eval(
                10,
                DefenseType::FinalDefense,
                EvaluationType::Supervisor,
                35.0,
            ),
            eval(
                11,
                DefenseType::FinalDefense,
                EvaluationType::Committee,
                25.0,
            ),
        ];
        assert!(!is_complete_for_publication(&evals));
    }

    #[test]
    fn test_completeness_rejects_missing_supervisor() {
        let evals = vec![
            eval(11, DefenseType::PreDefense, EvaluationType::Committee, 8.0),
            eval(
                12,
                DefenseType::FinalDefense,
                EvaluationType::Committee,
                25.0,
            ),
        ];
        assert!(!is_complete_for_publication(&evals));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(7.333333), 7.33);
        assert_eq!(round2(7.336), 7.34);
        assert_eq!(round2(88.0), 88.0);
    }
}
