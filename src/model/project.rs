use sqlx::FromRow;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, FromRow)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub max_grade: i64,
}

impl Project {
    pub fn new(title: &str, description: &str, max_grade: i64) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            max_grade,
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Project: {}\nDescription: {}\nMax grade: {}",
            self.title, self.description, self.max_grade
        )
    }
}

#[test]
fn test_display() {
    let p = Project::new("Markov", "Tweets generated from Markov chains", 50);
    assert_eq!(
        p.to_string(),
        "Project: Markov\nDescription: Tweets generated from Markov chains\nMax grade: 50"
    );
    let p = Project {
        description: String::new(),
        ..p
    };
    assert_eq!(p.to_string(), "Project: Markov\nDescription: \nMax grade: 50");
}
