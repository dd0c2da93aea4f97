use super::Student;
use sqlx::FromRow;
use std::fmt;

/// A grade as stored, linking a student to a project by their keys.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grade {
    pub student_github: String,
    pub project_title: String,
    pub grade: i64,
}

impl Grade {
    pub fn new(student_github: &str, project_title: &str, grade: i64) -> Self {
        Self {
            student_github: student_github.to_owned(),
            project_title: project_title.to_owned(),
            grade,
        }
    }
}

/// The grade a given student received for a given project.
#[derive(Clone, Debug, Eq, PartialEq, FromRow)]
pub struct StudentGrade {
    #[sqlx(flatten)]
    pub student: Student,
    pub project_title: String,
    pub grade: i64,
}

impl fmt::Display for StudentGrade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Student: {}\nProject: {}\nGrade: {}",
            self.student.full_name(),
            self.project_title,
            self.grade
        )
    }
}

/// One line of a student report card.
#[derive(Clone, Debug, Eq, PartialEq, FromRow)]
pub struct ProjectGrade {
    pub project_title: String,
    pub grade: i64,
    pub max_grade: i64,
}

impl fmt::Display for ProjectGrade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} Project: {}/{}",
            self.project_title, self.grade, self.max_grade
        )
    }
}

#[test]
fn test_display() {
    let g = StudentGrade {
        student: Student::new("Jane", "Hacker", "jhacks"),
        project_title: "Markov".into(),
        grade: 10,
    };
    assert_eq!(g.to_string(), "Student: Jane Hacker\nProject: Markov\nGrade: 10");
    let g = ProjectGrade {
        project_title: "Blockly".into(),
        grade: 2,
        max_grade: 20,
    };
    assert_eq!(g.to_string(), "Blockly Project: 2/20");
}
