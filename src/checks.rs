use crate::tracker::{Entity, Tracker};
use eyre::Error;
use tracing::debug;

/// Reasons for refusing to act on a command. These are reported to the
/// user, who can then try again.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("Invalid student, please try again")]
    InvalidStudent,
    #[error("Invalid project title, please try again")]
    InvalidProject,
    #[error("Student with GitHub account {0} already exists")]
    DuplicateStudent(String),
    #[error("Project {0} already exists")]
    DuplicateProject(String),
}

/// The outer result carries database faults, the inner one tells
/// whether the check passed.
pub type Check = Result<Result<(), Rejection>, Error>;

pub async fn check_student(tracker: &mut Tracker, github: &str) -> Check {
    if tracker.exists(Entity::Student, github).await? {
        Ok(Ok(()))
    } else {
        debug!(github, "unknown student");
        Ok(Err(Rejection::InvalidStudent))
    }
}

pub async fn check_project(tracker: &mut Tracker, title: &str) -> Check {
    if tracker.exists(Entity::Project, title).await? {
        Ok(Ok(()))
    } else {
        debug!(title, "unknown project");
        Ok(Err(Rejection::InvalidProject))
    }
}

pub async fn check_new_student(tracker: &mut Tracker, github: &str) -> Check {
    if tracker.exists(Entity::Student, github).await? {
        debug!(github, "student already registered");
        Ok(Err(Rejection::DuplicateStudent(github.to_owned())))
    } else {
        Ok(Ok(()))
    }
}

pub async fn check_new_project(tracker: &mut Tracker, title: &str) -> Check {
    if tracker.exists(Entity::Project, title).await? {
        debug!(title, "project already registered");
        Ok(Err(Rejection::DuplicateProject(title.to_owned())))
    } else {
        Ok(Ok(()))
    }
}
