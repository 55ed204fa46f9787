//! 成绩汇总折叠
//!
//! 输入为课程作业与某学生的提交记录，输出 [`GradeSummary`]。
//! 纯函数，学生成绩页、成绩概览与教师成绩册共用同一份核算逻辑。

use std::collections::HashMap;

use crate::models::assignments::entities::Assignment;
use crate::models::grades::entities::{GradeSummary, LetterGrade};
use crate::models::submissions::entities::Submission;

/// 汇总一名学生在一组作业上的成绩
///
/// 满分合计覆盖全部作业，未提交与未评分的作业不贡献得分。
/// 百分比保留两位小数，等级按四舍五入后的百分比划定。
pub fn summarize(assignments: &[Assignment], submissions: &[Submission]) -> GradeSummary {
    let by_assignment: HashMap<i64, &Submission> =
        submissions.iter().map(|s| (s.assignment_id, s)).collect();

    let mut total_points = 0.0;
    let mut earned_points = 0.0;
    let mut submitted = 0i64;
    let mut graded = 0i64;

    for assignment in assignments {
        total_points += assignment.max_points;
        if let Some(submission) = by_assignment.get(&assignment.id) {
            submitted += 1;
            if let Some(grade) = &submission.grade {
                earned_points += grade.score;
                graded += 1;
            }
        }
    }

    let percentage = if total_points > 0.0 {
        round2(earned_points / total_points * 100.0)
    } else {
        0.0
    };

    GradeSummary {
        total_points,
        earned_points,
        percentage,
        letter_grade: letter_for(percentage, graded),
        total_assignments: assignments.len() as i64,
        submitted_assignments: submitted,
        graded_assignments: graded,
    }
}

// 任何评分都没有之前等级无意义
fn letter_for(percentage: f64, graded_count: i64) -> LetterGrade {
    if graded_count == 0 {
        return LetterGrade::NotApplicable;
    }
    if percentage >= 90.0 {
        LetterGrade::A
    } else if percentage >= 80.0 {
        LetterGrade::B
    } else if percentage >= 70.0 {
        LetterGrade::C
    } else if percentage >= 60.0 {
        LetterGrade::D
    } else {
        LetterGrade::F
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionGrade;

    fn assignment(id: i64, max_points: f64) -> Assignment {
        Assignment {
            id,
            course_id: 1,
            title: format!("作业 {id}"),
            description: None,
            due_date: chrono::Utc::now(),
            max_points,
            created_by: 10,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn submission(assignment_id: i64, score: Option<f64>) -> Submission {
        Submission {
            id: assignment_id * 100,
            assignment_id,
            student_id: 20,
            file_token: "token".into(),
            file_name: "answer.pdf".into(),
            submitted_at: chrono::Utc::now(),
            is_late: false,
            grade: score.map(|s| SubmissionGrade {
                score: s,
                feedback: String::new(),
                graded_at: chrono::Utc::now(),
                graded_by: 10,
            }),
        }
    }

    #[test]
    fn test_partial_grading() {
        let assignments = vec![assignment(1, 100.0), assignment(2, 50.0)];
        let submissions = vec![submission(1, Some(90.0))];

        let summary = summarize(&assignments, &submissions);
        assert_eq!(summary.total_points, 150.0);
        assert_eq!(summary.earned_points, 90.0);
        assert_eq!(summary.percentage, 60.0);
        assert_eq!(summary.letter_grade, LetterGrade::D);
        assert_eq!(summary.total_assignments, 2);
        assert_eq!(summary.submitted_assignments, 1);
        assert_eq!(summary.graded_assignments, 1);
    }

    #[test]
    fn test_letter_boundaries() {
        let assignments = vec![assignment(1, 100.0)];
        let cases = [
            (90.0, LetterGrade::A),
            (89.99, LetterGrade::B),
            (80.0, LetterGrade::B),
            (79.5, LetterGrade::C),
            (70.0, LetterGrade::C),
            (60.0, LetterGrade::D),
            (59.99, LetterGrade::F),
            (0.0, LetterGrade::F),
        ];
        for (score, expected) in cases {
            let summary = summarize(&assignments, &[submission(1, Some(score))]);
            assert_eq!(summary.letter_grade, expected, "score {score}");
        }
    }

    #[test]
    fn test_percentage_rounding() {
        // 1/3 满分，四舍五入到两位小数
        let assignments = vec![assignment(1, 3.0)];
        let summary = summarize(&assignments, &[submission(1, Some(1.0))]);
        assert_eq!(summary.percentage, 33.33);
    }

    #[test]
    fn test_ungraded_submission_is_not_applicable() {
        let assignments = vec![assignment(1, 100.0)];
        let summary = summarize(&assignments, &[submission(1, None)]);
        assert_eq!(summary.earned_points, 0.0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.letter_grade, LetterGrade::NotApplicable);
        assert_eq!(summary.submitted_assignments, 1);
        assert_eq!(summary.graded_assignments, 0);
    }

    #[test]
    fn test_no_assignments() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_points, 0.0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.letter_grade, LetterGrade::NotApplicable);
        assert_eq!(summary.total_assignments, 0);
    }

    #[test]
    fn test_full_marks() {
        let assignments = vec![assignment(1, 100.0), assignment(2, 50.0)];
        let submissions = vec![submission(1, Some(100.0)), submission(2, Some(50.0))];

        let summary = summarize(&assignments, &submissions);
        assert_eq!(summary.percentage, 100.0);
        assert_eq!(summary.letter_grade, LetterGrade::A);
        assert_eq!(summary.graded_assignments, 2);
    }
}
