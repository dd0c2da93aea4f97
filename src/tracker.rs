use crate::model::{Grade, Project, ProjectGrade, Student, StudentGrade};
use eyre::{Error, WrapErr};
use sqlx::any::{AnyConnectOptions, install_default_drivers};
use sqlx::{AnyConnection, Connection};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS students (
        first_name VARCHAR(30) NOT NULL,
        last_name VARCHAR(30) NOT NULL,
        github VARCHAR(30) PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS projects (
        title VARCHAR(30) PRIMARY KEY,
        description TEXT NOT NULL,
        max_grade INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS grades (
        student_github VARCHAR(30) NOT NULL REFERENCES students (github),
        project_title VARCHAR(30) NOT NULL REFERENCES projects (title),
        grade INTEGER NOT NULL
    )",
];

/// Kind of record which can be looked up by its unique key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Entity {
    Student,
    Project,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Entity::Student => "student",
            Entity::Project => "project",
        })
    }
}

/// A session on the project tracker database. Every operation runs
/// a single statement, and modifications are committed immediately.
pub struct Tracker {
    conn: AnyConnection,
}

impl Tracker {
    pub async fn connect(url: &str) -> Result<Self, Error> {
        install_default_drivers();
        let options = AnyConnectOptions::from_str(url)
            .wrap_err_with(|| format!("invalid database URL {url}"))?;
        let conn = AnyConnection::connect_with(&options)
            .await
            .wrap_err("cannot connect to database")?;
        debug!(backend = conn.backend_name(), "connected to database");
        Ok(Self { conn })
    }

    pub async fn close(self) -> Result<(), Error> {
        self.conn
            .close()
            .await
            .wrap_err("error when closing database connection")?;
        debug!("database connection closed");
        Ok(())
    }

    pub async fn create_schema(&mut self) -> Result<(), Error> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&mut self.conn)
                .await
                .wrap_err("cannot create database schema")?;
        }
        debug!("database schema is in place");
        Ok(())
    }

    pub async fn exists(&mut self, entity: Entity, key: &str) -> Result<bool, Error> {
        let query = match entity {
            Entity::Student => "SELECT github FROM students WHERE github = $1",
            Entity::Project => "SELECT title FROM projects WHERE title = $1",
        };
        let found = sqlx::query(query)
            .bind(key)
            .fetch_optional(&mut self.conn)
            .await
            .wrap_err_with(|| format!("cannot check {entity} existence"))?
            .is_some();
        trace!(%entity, key, found, "existence check");
        Ok(found)
    }

    pub async fn student_by_github(&mut self, github: &str) -> Result<Option<Student>, Error> {
        trace!(github, "looking up student");
        sqlx::query_as("SELECT first_name, last_name, github FROM students WHERE github = $1")
            .bind(github)
            .fetch_optional(&mut self.conn)
            .await
            .wrap_err("cannot load student")
    }

    pub async fn project_by_title(&mut self, title: &str) -> Result<Option<Project>, Error> {
        trace!(title, "looking up project");
        sqlx::query_as("SELECT title, description, max_grade FROM projects WHERE title = $1")
            .bind(title)
            .fetch_optional(&mut self.conn)
            .await
            .wrap_err("cannot load project")
    }

    /// A project may have been graded several times for the same student,
    /// in which case the best grade is reported.
    pub async fn grade_by_github_title(
        &mut self,
        github: &str,
        title: &str,
    ) -> Result<Option<StudentGrade>, Error> {
        trace!(github, title, "looking up grade");
        sqlx::query_as(
            "SELECT first_name, last_name, github, project_title, grade
             FROM grades
             JOIN students ON (grades.student_github = students.github)
             WHERE github = $1 AND project_title = $2
             ORDER BY grade DESC",
        )
        .bind(github)
        .bind(title)
        .fetch_optional(&mut self.conn)
        .await
        .wrap_err("cannot load grade")
    }

    pub async fn all_grades(&mut self, github: &str) -> Result<Vec<ProjectGrade>, Error> {
        trace!(github, "loading all grades");
        sqlx::query_as(
            "SELECT project_title, grade, max_grade
             FROM grades
             JOIN projects ON (grades.project_title = projects.title)
             WHERE student_github = $1
             ORDER BY project_title",
        )
        .bind(github)
        .fetch_all(&mut self.conn)
        .await
        .wrap_err("cannot load grades")
    }

    pub async fn insert_student(&mut self, student: &Student) -> Result<(), Error> {
        sqlx::query("INSERT INTO students (first_name, last_name, github) VALUES ($1, $2, $3)")
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.github)
            .execute(&mut self.conn)
            .await
            .wrap_err("cannot save student")?;
        debug!(github = %student.github, "student added");
        Ok(())
    }

    pub async fn insert_project(&mut self, project: &Project) -> Result<(), Error> {
        sqlx::query("INSERT INTO projects (title, description, max_grade) VALUES ($1, $2, $3)")
            .bind(&project.title)
            .bind(&project.description)
            .bind(project.max_grade)
            .execute(&mut self.conn)
            .await
            .wrap_err("cannot save project")?;
        debug!(title = %project.title, "project added");
        Ok(())
    }

    pub async fn insert_grade(&mut self, grade: &Grade) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO grades (student_github, project_title, grade) VALUES ($1, $2, $3)",
        )
        .bind(&grade.student_github)
        .bind(&grade.project_title)
        .bind(grade.grade)
        .execute(&mut self.conn)
        .await
        .wrap_err("cannot save grade")?;
        debug!(
            github = %grade.student_github,
            title = %grade.project_title,
            grade = grade.grade,
            "grade assigned"
        );
        Ok(())
    }
}
