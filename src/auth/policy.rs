use crate::db::models::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Class,
    ClassApproval,
    Enrollment,
    Content,
    Assignment,
    Submission,
    Grade,
    Assessment,
    ClassRequest,
    ClassRequestReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// The one capability matrix for the whole application, evaluated once per
/// request. Row-level ownership is not decided here.
pub fn can_access(role: UserRole, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;
    use UserRole::*;

    match (role, resource) {
        // Admins own the review gates and can see everything; class content
        // itself stays with the owning teacher.
        (Admin, ClassApproval) | (Admin, ClassRequestReview) => true,
        (Admin, Class) => matches!(action, Create | Read),
        (Admin, _) => action == Read,

        (Teacher, Class) | (Teacher, Content) | (Teacher, Assignment) => true,
        (Teacher, Grade) => matches!(action, Create | Read),
        (Teacher, Submission) => action == Read,
        (Teacher, ClassRequest) => matches!(action, Create | Read),
        (Teacher, Assessment) => matches!(action, Create | Read),
        (Teacher, _) => false,

        (Student, Class) => action == Read,
        (Student, Enrollment) => matches!(action, Create | Read | Delete),
        (Student, Content) => action == Read,
        (Student, Assignment) => action == Read,
        (Student, Submission) => matches!(action, Create | Read),
        (Student, Assessment) => matches!(action, Create | Read),
        (Student, _) => false,

        (Guest, Class) => action == Read,
        (Guest, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::UserRole::*;

    #[test]
    fn only_admins_approve_classes() {
        assert!(can_access(Admin, Resource::ClassApproval, Action::Update));
        assert!(!can_access(Teacher, Resource::ClassApproval, Action::Update));
        assert!(!can_access(Student, Resource::ClassApproval, Action::Update));
        assert!(!can_access(Guest, Resource::ClassApproval, Action::Update));
    }

    #[test]
    fn teachers_and_admins_create_classes() {
        assert!(can_access(Teacher, Resource::Class, Action::Create));
        assert!(can_access(Admin, Resource::Class, Action::Create));
        assert!(!can_access(Student, Resource::Class, Action::Create));
    }

    #[test]
    fn only_students_enroll() {
        assert!(can_access(Student, Resource::Enrollment, Action::Create));
        assert!(!can_access(Teacher, Resource::Enrollment, Action::Create));
        assert!(!can_access(Guest, Resource::Enrollment, Action::Create));
    }

    #[test]
    fn only_students_submit_and_only_teachers_grade() {
        assert!(can_access(Student, Resource::Submission, Action::Create));
        assert!(!can_access(Teacher, Resource::Submission, Action::Create));
        assert!(can_access(Teacher, Resource::Grade, Action::Create));
        assert!(!can_access(Student, Resource::Grade, Action::Create));
    }

    #[test]
    fn guests_only_browse() {
        assert!(can_access(Guest, Resource::Class, Action::Read));
        assert!(!can_access(Guest, Resource::Content, Action::Read));
        assert!(!can_access(Guest, Resource::Assessment, Action::Create));
    }

    #[test]
    fn class_requests_reviewed_by_admins_only() {
        assert!(can_access(Teacher, Resource::ClassRequest, Action::Create));
        assert!(can_access(Admin, Resource::ClassRequestReview, Action::Update));
        assert!(!can_access(Teacher, Resource::ClassRequestReview, Action::Update));
    }
}
