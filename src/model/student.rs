use sqlx::FromRow;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, FromRow)]
pub struct Student {
    pub first_name: String,
    pub last_name: String,
    pub github: String,
}

impl Student {
    pub fn new(first_name: &str, last_name: &str, github: &str) -> Self {
        Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            github: github.to_owned(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Student: {}\nGitHub account: {}",
            self.full_name(),
            self.github
        )
    }
}

#[test]
fn test_display() {
    let s = Student::new("Jane", "Hacker", "jhacks");
    assert_eq!(s.full_name(), "Jane Hacker");
    assert_eq!(s.to_string(), "Student: Jane Hacker\nGitHub account: jhacks");
}
