use crate::command::{Command, CommandError};
use crate::operations::execute;
use crate::tracker::Tracker;
use eyre::{Error, WrapErr};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, trace};

/// Repeatedly prompt for commands and run them until `quit` is entered
/// or the input is exhausted. Only database faults end the loop early.
pub async fn run<R, W>(
    tracker: &mut Tracker,
    mut input: R,
    output: &mut W,
    prompt: &str,
) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buffer = Vec::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        buffer.clear();
        if input
            .read_until(b'\n', &mut buffer)
            .await
            .wrap_err("cannot read command")?
            == 0
        {
            debug!("end of input");
            writeln!(output)?;
            break;
        }
        let line = match std::str::from_utf8(&buffer) {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "command is not valid UTF-8");
                writeln!(output, "{}", CommandError::NotUtf8)?;
                continue;
            }
        };
        trace!(line = %line, "command received");
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                debug!(error = %e, "cannot parse command");
                writeln!(output, "{e}")?;
                continue;
            }
        };
        match execute(tracker, command).await? {
            Some(reply) => writeln!(output, "{reply}")?,
            None => break,
        }
    }
    Ok(())
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::model::Student;
    use crate::tracker::tests::{drop_table, memory_tracker};

    async fn session(tracker: &mut Tracker, input: &str) -> String {
        session_bytes(tracker, input.as_bytes()).await
    }

    async fn session_bytes(tracker: &mut Tracker, input: &[u8]) -> String {
        let mut output = Vec::new();
        run(tracker, input, &mut output, "> ")
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_session() {
        let mut t = memory_tracker().await;
        let out = session(
            &mut t,
            "new_student Jane Hacker jhacks\n\nstudent jhacks\nfrobnicate\nquit\nstudent jhacks\n",
        )
        .await;
        assert_eq!(
            out,
            "> Successfully added student: Jane Hacker\n\
             > > Student: Jane Hacker\nGitHub account: jhacks\n\
             > Invalid Entry. Try again.\n\
             > "
        );
    }

    #[tokio::test]
    async fn test_recoverable_errors() {
        let mut t = memory_tracker().await;
        let out = session(
            &mut t,
            "add_project Proj a b c ten\nnew_student Jane\nstudent nobody\nget_all_grades\n",
        )
        .await;
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "> Invalid max grade 'ten', please enter a whole number",
                "> The 'new_student' command takes exactly three arguments. Please try again.",
                "> Invalid student, please try again",
                "> The 'get_all_grades' command takes exactly one argument. Please try again.",
                "> ",
            ]
        );
        assert!(t.project_by_title("Proj").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let mut t = memory_tracker().await;
        let out = session_bytes(&mut t, b"student \xff\xfe\nnew_student Jane Hacker jhacks\nquit\n").await;
        assert_eq!(
            out,
            "> Invalid Entry. Try again.\n> Successfully added student: Jane Hacker\n> "
        );
    }

    #[tokio::test]
    async fn test_database_fault_ends_session() {
        let mut t = memory_tracker().await;
        t.insert_student(&Student::new("Jane", "Hacker", "jhacks"))
            .await
            .unwrap();
        drop_table(&mut t, "grades").await;
        let mut output = Vec::new();
        let result = run(
            &mut t,
            &b"get_all_grades jhacks\nstudent jhacks\nquit\n"[..],
            &mut output,
            "> ",
        )
        .await;
        assert!(result.is_err());
        assert_eq!(String::from_utf8(output).unwrap(), "> ");
        t.close().await.unwrap();
    }
}
