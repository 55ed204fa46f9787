//! 授权判定引擎
//!
//! 路由级的所有权与选课关系规则集中在此，判定是纯函数：
//! 输入为主体与已加载的实体，不做任何存储访问，默认拒绝。
//! 服务层负责加载实体、计算选课标记，再交由 [`authorize`] 判定。

use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::Course;
use crate::models::materials::entities::Material;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::{User, UserRole};

/// 执行操作的主体
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: i64,
    pub role: UserRole,
}

impl Principal {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role.clone(),
        }
    }

    fn is_instructor(&self) -> bool {
        self.role == UserRole::Instructor
    }

    fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    fn owns_course(&self, course: &Course) -> bool {
        self.is_instructor() && course.instructor_id == self.user_id
    }
}

/// 待判定的操作，携带判定所需的已加载实体
///
/// `enrolled` 标记由调用方按 (course_id, student_id) 查询选课关系得出。
#[derive(Debug)]
pub enum Action<'a> {
    CreateCourse,
    ReadCourse { course: &'a Course, enrolled: bool },
    UpdateCourse { course: &'a Course },
    DeleteCourse { course: &'a Course },
    EnrollCourse,
    UnenrollCourse,
    CreateAssignment { course: &'a Course },
    ReadAssignments { course: &'a Course, enrolled: bool },
    UpdateAssignment { assignment: &'a Assignment },
    DeleteAssignment { assignment: &'a Assignment },
    CreateMaterial { course: &'a Course },
    ReadMaterials { course: &'a Course, enrolled: bool },
    UpdateMaterial { material: &'a Material },
    DeleteMaterial { material: &'a Material },
    CreateSubmission { enrolled: bool },
    ReadSubmission { course: &'a Course, submission: &'a Submission },
    ListSubmissions { course: &'a Course },
    GradeSubmission { course: &'a Course },
    DeleteSubmission { submission: &'a Submission },
    ReadGradeBook { course: &'a Course },
    ReadMyGrades { enrolled: bool },
}

/// 拒绝原因，服务层据此映射错误码与提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    RequireInstructor,
    RequireStudent,
    NotCourseOwner,
    NotEnrolled,
    NotCreator,
    NotUploader,
    NotSubmissionOwner,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::RequireInstructor => "只有教师可以执行此操作",
            DenyReason::RequireStudent => "只有学生可以执行此操作",
            DenyReason::NotCourseOwner => "只有本课程的授课教师可以执行此操作",
            DenyReason::NotEnrolled => "未选修本课程",
            DenyReason::NotCreator => "只有作业创建者可以执行此操作",
            DenyReason::NotUploader => "只有资料上传者可以执行此操作",
            DenyReason::NotSubmissionOwner => "只有提交者本人可以执行此操作",
        }
    }
}

/// 判定主体能否执行操作，未命中任何允许规则即拒绝
pub fn authorize(principal: &Principal, action: &Action<'_>) -> Result<(), DenyReason> {
    match action {
        Action::CreateCourse => {
            if principal.is_instructor() {
                Ok(())
            } else {
                Err(DenyReason::RequireInstructor)
            }
        }

        Action::ReadCourse { course, enrolled } => match principal.role {
            UserRole::Instructor => {
                if principal.owns_course(course) {
                    Ok(())
                } else {
                    Err(DenyReason::NotCourseOwner)
                }
            }
            UserRole::Student => {
                if *enrolled {
                    Ok(())
                } else {
                    Err(DenyReason::NotEnrolled)
                }
            }
        },

        Action::UpdateCourse { course } | Action::DeleteCourse { course } => {
            if principal.owns_course(course) {
                Ok(())
            } else if principal.is_instructor() {
                Err(DenyReason::NotCourseOwner)
            } else {
                Err(DenyReason::RequireInstructor)
            }
        }

        Action::EnrollCourse | Action::UnenrollCourse => {
            if principal.is_student() {
                Ok(())
            } else {
                Err(DenyReason::RequireStudent)
            }
        }

        // 创建时主体即 creator/uploader，必须同时是课程属主
        Action::CreateAssignment { course } | Action::CreateMaterial { course } => {
            if principal.owns_course(course) {
                Ok(())
            } else if principal.is_instructor() {
                Err(DenyReason::NotCourseOwner)
            } else {
                Err(DenyReason::RequireInstructor)
            }
        }

        Action::ReadAssignments { course, enrolled }
        | Action::ReadMaterials { course, enrolled } => match principal.role {
            UserRole::Instructor => {
                if principal.owns_course(course) {
                    Ok(())
                } else {
                    Err(DenyReason::NotCourseOwner)
                }
            }
            UserRole::Student => {
                if *enrolled {
                    Ok(())
                } else {
                    Err(DenyReason::NotEnrolled)
                }
            }
        },

        Action::UpdateAssignment { assignment } | Action::DeleteAssignment { assignment } => {
            if principal.is_instructor() && assignment.created_by == principal.user_id {
                Ok(())
            } else if principal.is_instructor() {
                Err(DenyReason::NotCreator)
            } else {
                Err(DenyReason::RequireInstructor)
            }
        }

        Action::UpdateMaterial { material } | Action::DeleteMaterial { material } => {
            if principal.is_instructor() && material.uploaded_by == principal.user_id {
                Ok(())
            } else if principal.is_instructor() {
                Err(DenyReason::NotUploader)
            } else {
                Err(DenyReason::RequireInstructor)
            }
        }

        Action::CreateSubmission { enrolled } => {
            if !principal.is_student() {
                Err(DenyReason::RequireStudent)
            } else if !enrolled {
                Err(DenyReason::NotEnrolled)
            } else {
                Ok(())
            }
        }

        Action::ReadSubmission { course, submission } => {
            if submission.student_id == principal.user_id && principal.is_student() {
                Ok(())
            } else if principal.owns_course(course) {
                Ok(())
            } else if principal.is_instructor() {
                Err(DenyReason::NotCourseOwner)
            } else {
                Err(DenyReason::NotSubmissionOwner)
            }
        }

        Action::ListSubmissions { course }
        | Action::GradeSubmission { course }
        | Action::ReadGradeBook { course } => {
            if principal.owns_course(course) {
                Ok(())
            } else if principal.is_instructor() {
                Err(DenyReason::NotCourseOwner)
            } else {
                Err(DenyReason::RequireInstructor)
            }
        }

        Action::DeleteSubmission { submission } => {
            if principal.is_student() && submission.student_id == principal.user_id {
                Ok(())
            } else if principal.is_student() {
                Err(DenyReason::NotSubmissionOwner)
            } else {
                Err(DenyReason::RequireStudent)
            }
        }

        Action::ReadMyGrades { enrolled } => {
            if !principal.is_student() {
                Err(DenyReason::RequireStudent)
            } else if !enrolled {
                Err(DenyReason::NotEnrolled)
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, instructor_id: i64) -> Course {
        Course {
            id,
            instructor_id,
            name: "算法导论".to_string(),
            description: None,
            code: format!("CS{id:03}"),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn assignment(id: i64, course_id: i64, created_by: i64) -> Assignment {
        Assignment {
            id,
            course_id,
            title: "第一次作业".to_string(),
            description: None,
            due_date: chrono::Utc::now(),
            max_points: 100.0,
            created_by,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn material(id: i64, course_id: i64, uploaded_by: i64) -> Material {
        Material {
            id,
            course_id,
            title: "课件".to_string(),
            description: None,
            file_token: "token".to_string(),
            file_name: "slides.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            tags: vec![],
            uploaded_by,
            uploaded_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn submission(id: i64, assignment_id: i64, student_id: i64) -> Submission {
        Submission {
            id,
            assignment_id,
            student_id,
            file_token: "token".to_string(),
            file_name: "hw.zip".to_string(),
            submitted_at: chrono::Utc::now(),
            is_late: false,
            grade: None,
        }
    }

    fn instructor(id: i64) -> Principal {
        Principal::new(id, UserRole::Instructor)
    }

    fn student(id: i64) -> Principal {
        Principal::new(id, UserRole::Student)
    }

    #[test]
    fn owner_instructor_full_course_control() {
        let c = course(1, 10);
        let owner = instructor(10);

        assert!(authorize(&owner, &Action::ReadCourse { course: &c, enrolled: false }).is_ok());
        assert!(authorize(&owner, &Action::UpdateCourse { course: &c }).is_ok());
        assert!(authorize(&owner, &Action::DeleteCourse { course: &c }).is_ok());
    }

    #[test]
    fn non_owner_instructor_denied_everywhere() {
        let c = course(1, 10);
        let other = instructor(11);

        assert_eq!(
            authorize(&other, &Action::CreateAssignment { course: &c }),
            Err(DenyReason::NotCourseOwner)
        );
        assert_eq!(
            authorize(&other, &Action::GradeSubmission { course: &c }),
            Err(DenyReason::NotCourseOwner)
        );
        assert_eq!(
            authorize(&other, &Action::ReadGradeBook { course: &c }),
            Err(DenyReason::NotCourseOwner)
        );
        assert_eq!(
            authorize(&other, &Action::UpdateCourse { course: &c }),
            Err(DenyReason::NotCourseOwner)
        );
    }

    #[test]
    fn enrollment_gates_student_reads() {
        let c = course(1, 10);
        let s = student(20);

        assert_eq!(
            authorize(&s, &Action::ReadCourse { course: &c, enrolled: false }),
            Err(DenyReason::NotEnrolled)
        );
        assert!(authorize(&s, &Action::ReadCourse { course: &c, enrolled: true }).is_ok());
        assert_eq!(
            authorize(&s, &Action::ReadAssignments { course: &c, enrolled: false }),
            Err(DenyReason::NotEnrolled)
        );
        assert!(authorize(&s, &Action::ReadMaterials { course: &c, enrolled: true }).is_ok());
    }

    #[test]
    fn students_cannot_author_content() {
        let c = course(1, 10);
        let s = student(20);

        assert_eq!(
            authorize(&s, &Action::CreateCourse),
            Err(DenyReason::RequireInstructor)
        );
        assert_eq!(
            authorize(&s, &Action::CreateAssignment { course: &c }),
            Err(DenyReason::RequireInstructor)
        );
        assert_eq!(
            authorize(&s, &Action::GradeSubmission { course: &c }),
            Err(DenyReason::RequireInstructor)
        );
    }

    #[test]
    fn instructors_cannot_enroll_or_submit() {
        let owner = instructor(10);

        assert_eq!(
            authorize(&owner, &Action::EnrollCourse),
            Err(DenyReason::RequireStudent)
        );
        assert_eq!(
            authorize(&owner, &Action::CreateSubmission { enrolled: false }),
            Err(DenyReason::RequireStudent)
        );
    }

    #[test]
    fn submission_create_requires_enrollment() {
        let s = student(20);

        assert_eq!(
            authorize(&s, &Action::CreateSubmission { enrolled: false }),
            Err(DenyReason::NotEnrolled)
        );
        assert!(authorize(&s, &Action::CreateSubmission { enrolled: true }).is_ok());
    }

    #[test]
    fn submission_read_owner_or_course_owner() {
        let c = course(1, 10);
        let sub = submission(5, 2, 20);

        assert!(
            authorize(&student(20), &Action::ReadSubmission { course: &c, submission: &sub })
                .is_ok()
        );
        assert!(
            authorize(&instructor(10), &Action::ReadSubmission { course: &c, submission: &sub })
                .is_ok()
        );
        assert_eq!(
            authorize(&student(21), &Action::ReadSubmission { course: &c, submission: &sub }),
            Err(DenyReason::NotSubmissionOwner)
        );
        assert_eq!(
            authorize(&instructor(11), &Action::ReadSubmission { course: &c, submission: &sub }),
            Err(DenyReason::NotCourseOwner)
        );
    }

    #[test]
    fn only_submitting_student_may_delete() {
        let sub = submission(5, 2, 20);

        assert!(authorize(&student(20), &Action::DeleteSubmission { submission: &sub }).is_ok());
        assert_eq!(
            authorize(&student(21), &Action::DeleteSubmission { submission: &sub }),
            Err(DenyReason::NotSubmissionOwner)
        );
        // 课程属主教师也不能替学生删除提交
        assert_eq!(
            authorize(&instructor(10), &Action::DeleteSubmission { submission: &sub }),
            Err(DenyReason::RequireStudent)
        );
    }

    #[test]
    fn assignment_update_bound_to_creator() {
        let a = assignment(2, 1, 10);

        assert!(authorize(&instructor(10), &Action::UpdateAssignment { assignment: &a }).is_ok());
        assert_eq!(
            authorize(&instructor(11), &Action::DeleteAssignment { assignment: &a }),
            Err(DenyReason::NotCreator)
        );
        assert_eq!(
            authorize(&student(20), &Action::UpdateAssignment { assignment: &a }),
            Err(DenyReason::RequireInstructor)
        );
    }

    #[test]
    fn material_update_bound_to_uploader() {
        let m = material(3, 1, 10);

        assert!(authorize(&instructor(10), &Action::UpdateMaterial { material: &m }).is_ok());
        assert_eq!(
            authorize(&instructor(11), &Action::DeleteMaterial { material: &m }),
            Err(DenyReason::NotUploader)
        );
    }

    #[test]
    fn my_grades_requires_enrolled_student() {
        assert!(authorize(&student(20), &Action::ReadMyGrades { enrolled: true }).is_ok());
        assert_eq!(
            authorize(&student(20), &Action::ReadMyGrades { enrolled: false }),
            Err(DenyReason::NotEnrolled)
        );
        assert_eq!(
            authorize(&instructor(10), &Action::ReadMyGrades { enrolled: true }),
            Err(DenyReason::RequireStudent)
        );
    }
}
