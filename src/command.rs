use crate::model::{Grade, Project, Student};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Student { github: String },
    NewStudent(Student),
    ProjectInfo { title: String },
    GetGrade { github: String, title: String },
    AssignGrade(Grade),
    AddProject(Project),
    GetAllGrades { github: String },
    Quit,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CommandError {
    #[error("The '{command}' command takes exactly {expected}. Please try again.")]
    Arity {
        command: &'static str,
        expected: &'static str,
    },
    #[error(
        "The 'add_project' command takes a title, an optional description and a max grade. Please try again."
    )]
    AddProjectUsage,
    #[error("Invalid {what} '{value}', please enter a whole number")]
    NotANumber { what: &'static str, value: String },
    #[error("Invalid {what} '{value}', at most {max} characters are allowed", max = MAX_NAME_LEN)]
    TooLong { what: &'static str, value: String },
    #[error("Invalid Entry. Try again.")]
    Unknown(String),
    #[error("Invalid Entry. Try again.")]
    NotUtf8,
}

/// Names, GitHub accounts and project titles are stored as `VARCHAR(30)`.
pub const MAX_NAME_LEN: usize = 30;

fn checked_name<'a>(what: &'static str, value: &'a str) -> Result<&'a str, CommandError> {
    if value.chars().count() > MAX_NAME_LEN {
        Err(CommandError::TooLong {
            what,
            value: value.to_owned(),
        })
    } else {
        Ok(value)
    }
}

fn expect_args<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::Arity {
        command,
        expected: match N {
            1 => "one argument",
            2 => "two arguments",
            _ => "three arguments",
        },
    })
}

/// Grades are stored as 32-bit `INTEGER` columns.
fn parse_number(what: &'static str, value: &str) -> Result<i64, CommandError> {
    value.parse::<i32>().map(i64::from).map_err(|_| CommandError::NotANumber {
        what,
        value: value.to_owned(),
    })
}

impl Command {
    /// Parse an input line. A blank line is not a command and gives `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let command = match name {
            "student" => {
                let [github] = expect_args::<1>("student", args)?;
                Command::Student {
                    github: checked_name("GitHub account", github)?.to_owned(),
                }
            }
            "new_student" => {
                let [first_name, last_name, github] = expect_args::<3>("new_student", args)?;
                Command::NewStudent(Student::new(
                    checked_name("first name", first_name)?,
                    checked_name("last name", last_name)?,
                    checked_name("GitHub account", github)?,
                ))
            }
            "project_info" => {
                let [title] = expect_args::<1>("project_info", args)?;
                Command::ProjectInfo {
                    title: checked_name("project title", title)?.to_owned(),
                }
            }
            "get_grade" => {
                let [github, title] = expect_args::<2>("get_grade", args)?;
                Command::GetGrade {
                    github: checked_name("GitHub account", github)?.to_owned(),
                    title: checked_name("project title", title)?.to_owned(),
                }
            }
            "assign_grade" => {
                let [github, title, grade] = expect_args::<3>("assign_grade", args)?;
                Command::AssignGrade(Grade::new(
                    checked_name("GitHub account", github)?,
                    checked_name("project title", title)?,
                    parse_number("grade", grade)?,
                ))
            }
            "add_project" => {
                let [title, description @ .., max_grade] = args else {
                    return Err(CommandError::AddProjectUsage);
                };
                Command::AddProject(Project::new(
                    checked_name("project title", title)?,
                    &description.join(" "),
                    parse_number("max grade", max_grade)?,
                ))
            }
            "get_all_grades" => {
                let [github] = expect_args::<1>("get_all_grades", args)?;
                Command::GetAllGrades {
                    github: checked_name("GitHub account", github)?.to_owned(),
                }
            }
            "quit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}
