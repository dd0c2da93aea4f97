use crate::checks::{
    Rejection, check_new_project, check_new_student, check_project, check_student,
};
use crate::command::Command;
use crate::display::Reply;
use crate::model::{Grade, Project, Student};
use crate::tracker::Tracker;
use eyre::Error;
use tracing::info;

pub async fn get_student_by_github(tracker: &mut Tracker, github: &str) -> Result<Reply, Error> {
    if let Err(rejection) = check_student(tracker, github).await? {
        return Ok(Reply::Rejected(rejection));
    }
    // Only reached if the row vanished after the check.
    Ok(tracker
        .student_by_github(github)
        .await?
        .map_or(Reply::Rejected(Rejection::InvalidStudent), Reply::Student))
}

pub async fn make_new_student(tracker: &mut Tracker, student: Student) -> Result<Reply, Error> {
    if let Err(rejection) = check_new_student(tracker, &student.github).await? {
        return Ok(Reply::Rejected(rejection));
    }
    tracker.insert_student(&student).await?;
    info!(github = %student.github, "new student registered");
    Ok(Reply::StudentAdded(student))
}

pub async fn get_project_by_title(tracker: &mut Tracker, title: &str) -> Result<Reply, Error> {
    if let Err(rejection) = check_project(tracker, title).await? {
        return Ok(Reply::Rejected(rejection));
    }
    // Only reached if the row vanished after the check.
    Ok(tracker
        .project_by_title(title)
        .await?
        .map_or(Reply::Rejected(Rejection::InvalidProject), Reply::Project))
}

pub async fn get_grade_by_github_title(
    tracker: &mut Tracker,
    github: &str,
    title: &str,
) -> Result<Reply, Error> {
    if let Err(rejection) = check_student(tracker, github).await? {
        return Ok(Reply::Rejected(rejection));
    }
    if let Err(rejection) = check_project(tracker, title).await? {
        return Ok(Reply::Rejected(rejection));
    }
    Ok(match tracker.grade_by_github_title(github, title).await? {
        Some(grade) => Reply::Grade(grade),
        None => Reply::NoGrade {
            github: github.to_owned(),
            title: title.to_owned(),
        },
    })
}

/// Record a grade. Both the student and the project must exist, but the
/// same pair may be graded several times.
pub async fn assign_grade(tracker: &mut Tracker, grade: Grade) -> Result<Reply, Error> {
    if let Err(rejection) = check_student(tracker, &grade.student_github).await? {
        return Ok(Reply::Rejected(rejection));
    }
    if let Err(rejection) = check_project(tracker, &grade.project_title).await? {
        return Ok(Reply::Rejected(rejection));
    }
    tracker.insert_grade(&grade).await?;
    info!(
        github = %grade.student_github,
        title = %grade.project_title,
        grade = grade.grade,
        "grade assigned"
    );
    Ok(Reply::GradeAssigned(grade))
}

pub async fn add_project(tracker: &mut Tracker, project: Project) -> Result<Reply, Error> {
    if let Err(rejection) = check_new_project(tracker, &project.title).await? {
        return Ok(Reply::Rejected(rejection));
    }
    tracker.insert_project(&project).await?;
    info!(title = %project.title, "new project registered");
    Ok(Reply::ProjectAdded(project))
}

pub async fn get_all_grades(tracker: &mut Tracker, github: &str) -> Result<Reply, Error> {
    if let Err(rejection) = check_student(tracker, github).await? {
        return Ok(Reply::Rejected(rejection));
    }
    // The else branch only runs if the row vanished after the check.
    let Some(student) = tracker.student_by_github(github).await? else {
        return Ok(Reply::Rejected(Rejection::InvalidStudent));
    };
    let grades = tracker.all_grades(github).await?;
    Ok(Reply::AllGrades { student, grades })
}

/// Run a command against the database. `Command::Quit` has nothing to
/// run and gives `None`.
pub async fn execute(tracker: &mut Tracker, command: Command) -> Result<Option<Reply>, Error> {
    let reply = match command {
        Command::Student { github } => get_student_by_github(tracker, &github).await?,
        Command::NewStudent(student) => make_new_student(tracker, student).await?,
        Command::ProjectInfo { title } => get_project_by_title(tracker, &title).await?,
        Command::GetGrade { github, title } => {
            get_grade_by_github_title(tracker, &github, &title).await?
        }
        Command::AssignGrade(grade) => assign_grade(tracker, grade).await?,
        Command::AddProject(project) => add_project(tracker, project).await?,
        Command::GetAllGrades { github } => get_all_grades(tracker, &github).await?,
        Command::Quit => return Ok(None),
    };
    Ok(Some(reply))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::tracker::tests::memory_tracker;

    async fn run(tracker: &mut Tracker, line: &str) -> String {
        let command = Command::parse(line).unwrap().unwrap();
        execute(tracker, command).await.unwrap().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_unknown_student() {
        let mut t = memory_tracker().await;
        for line in ["student jhacks", "get_all_grades jhacks", "get_grade jhacks Markov"] {
            assert_eq!(run(&mut t, line).await, "Invalid student, please try again");
        }
        assert!(t.student_by_github("jhacks").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_student_round_trip() {
        let mut t = memory_tracker().await;
        assert_eq!(
            run(&mut t, "new_student Jane Hacker jhacks").await,
            "Successfully added student: Jane Hacker"
        );
        let out = run(&mut t, "student jhacks").await;
        assert_eq!(out, "Student: Jane Hacker\nGitHub account: jhacks");
        assert_eq!(run(&mut t, "student jhacks").await, out);
        assert_eq!(
            run(&mut t, "new_student Janet Hacker jhacks").await,
            "Student with GitHub account jhacks already exists"
        );
    }

    #[tokio::test]
    async fn test_project_round_trip() {
        let mut t = memory_tracker().await;
        assert_eq!(
            run(&mut t, "project_info Proj").await,
            "Invalid project title, please try again"
        );
        assert_eq!(
            run(&mut t, "add_project Proj a b c 10").await,
            "Successfully added Proj to the projects database"
        );
        assert_eq!(
            run(&mut t, "project_info Proj").await,
            "Project: Proj\nDescription: a b c\nMax grade: 10"
        );
        assert_eq!(
            run(&mut t, "add_project Proj other 20").await,
            "Project Proj already exists"
        );
        assert_eq!(
            t.project_by_title("Proj").await.unwrap(),
            Some(Project::new("Proj", "a b c", 10))
        );
    }

    #[tokio::test]
    async fn test_grades() {
        let mut t = memory_tracker().await;
        run(&mut t, "new_student Jane Hacker jhacks").await;
        run(&mut t, "add_project Markov Tweets from Markov chains 50").await;
        run(&mut t, "add_project Blockly Visual programming 20").await;
        assert_eq!(
            run(&mut t, "get_all_grades jhacks").await,
            "No grades found for Jane Hacker"
        );
        assert_eq!(
            run(&mut t, "get_grade jhacks Markov").await,
            "No grade found for jhacks on Markov"
        );
        assert_eq!(
            run(&mut t, "get_grade jhacks Nope").await,
            "Invalid project title, please try again"
        );
        assert_eq!(
            run(&mut t, "assign_grade jhacks Markov 42").await,
            "Successfully added a grade of 42 for jhacks's Markov project"
        );
        run(&mut t, "assign_grade jhacks Blockly 2").await;
        assert_eq!(
            run(&mut t, "get_grade jhacks Markov").await,
            "Student: Jane Hacker\nProject: Markov\nGrade: 42"
        );
        assert_eq!(
            run(&mut t, "get_all_grades jhacks").await,
            "All grades for Jane Hacker\nBlockly Project: 2/20\nMarkov Project: 42/50"
        );
    }

    #[tokio::test]
    async fn test_assign_grade_validates_references() {
        let mut t = memory_tracker().await;
        run(&mut t, "new_student Jane Hacker jhacks").await;
        run(&mut t, "add_project Markov Tweets 50").await;
        assert_eq!(
            run(&mut t, "assign_grade sdevelops Markov 10").await,
            "Invalid student, please try again"
        );
        assert_eq!(
            run(&mut t, "assign_grade jhacks Nope 10").await,
            "Invalid project title, please try again"
        );
        assert_eq!(
            run(&mut t, "get_all_grades jhacks").await,
            "No grades found for Jane Hacker"
        );
        assert!(t.all_grades("sdevelops").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_grades() {
        let mut t = memory_tracker().await;
        run(&mut t, "new_student Jane Hacker jhacks").await;
        run(&mut t, "add_project Markov Tweets 50").await;
        run(&mut t, "assign_grade jhacks Markov 10").await;
        run(&mut t, "assign_grade jhacks Markov 10").await;
        assert_eq!(t.all_grades("jhacks").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_quit() {
        let mut t = memory_tracker().await;
        assert_eq!(execute(&mut t, Command::Quit).await.unwrap(), None);
    }
}
