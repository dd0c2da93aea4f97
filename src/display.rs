use crate::checks::Rejection;
use crate::model::{Grade, Project, ProjectGrade, Student, StudentGrade};
use std::fmt;

/// Outcome of a command, as shown to the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reply {
    Student(Student),
    StudentAdded(Student),
    Project(Project),
    ProjectAdded(Project),
    Grade(StudentGrade),
    NoGrade { github: String, title: String },
    GradeAssigned(Grade),
    AllGrades {
        student: Student,
        grades: Vec<ProjectGrade>,
    },
    Rejected(Rejection),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reply::Student(student) => write!(f, "{student}"),
            Reply::StudentAdded(student) => {
                write!(f, "Successfully added student: {}", student.full_name())
            }
            Reply::Project(project) => write!(f, "{project}"),
            Reply::ProjectAdded(project) => write!(
                f,
                "Successfully added {} to the projects database",
                project.title
            ),
            Reply::Grade(grade) => write!(f, "{grade}"),
            Reply::NoGrade { github, title } => write!(f, "No grade found for {github} on {title}"),
            Reply::GradeAssigned(grade) => write!(
                f,
                "Successfully added a grade of {} for {}'s {} project",
                grade.grade, grade.student_github, grade.project_title
            ),
            Reply::AllGrades { student, grades } if grades.is_empty() => {
                write!(f, "No grades found for {}", student.full_name())
            }
            Reply::AllGrades { student, grades } => {
                write!(f, "All grades for {}", student.full_name())?;
                for grade in grades {
                    write!(f, "\n{grade}")?;
                }
                Ok(())
            }
            Reply::Rejected(rejection) => write!(f, "{rejection}"),
        }
    }
}
