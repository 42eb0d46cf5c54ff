//! Line-oriented front end for the panel.
//!
//! Each command maps onto one panel operation; the page is printed after
//! every command. Prompts (alert, confirm) read from the same input.

use super::{client::UsersApi, prompt::Prompt, Outcome, UserPanel};
use std::io::{self, BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Commands:
  list           refresh the user list
  select <id>    select the user with this id
  new <name>     create a user
  edit           open the edit form for the selected user
  save <name>    save the edit form with a new name
  cancel         close the edit form
  delete         delete the selected user
  help           show this help
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(u64),
    New(String),
    Edit,
    Save(String),
    Cancel,
    Delete,
    Help,
    Quit,
}

impl Command {
    /// # Errors
    /// Returns a user-facing message for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match verb.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "select" | "sel" => rest
                .trim()
                .parse::<u64>()
                .map(Command::Select)
                .map_err(|_| format!("select expects a numeric id, got {:?}", rest.trim())),
            "new" | "create" => Ok(Command::New(rest.to_string())),
            "edit" => Ok(Command::Edit),
            "save" => Ok(Command::Save(rest.to_string())),
            "cancel" => Ok(Command::Cancel),
            "delete" | "del" | "rm" => Ok(Command::Delete),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(String::new()),
            other => Err(format!("unknown command {other:?}, try help")),
        }
    }
}

/// `Prompt` over any reader/writer pair; stdin/stdout in the binary.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Reads one line; `None` at end of input.
    /// # Errors
    /// Returns an error if reading from the input fails
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// # Errors
    /// Returns an error if writing to the output fails
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn alert(&mut self, message: &str) {
        // A broken terminal has nowhere left to report to.
        let _ = self.print(&format!("! {message}"));
    }

    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{message} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }

        matches!(
            self.read_line(),
            Ok(Some(answer)) if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
        )
    }
}

/// Runs the command loop until `quit` or end of input.
/// # Errors
/// Returns an error if the terminal cannot be read or written
pub async fn run<A, R, W>(panel: &mut UserPanel<A, TerminalPrompt<R, W>>) -> io::Result<()>
where
    A: UsersApi,
    R: BufRead,
    W: Write,
{
    panel.init().await;
    let page = panel.page().to_string();
    panel.prompt_mut().print(&page)?;

    loop {
        let Some(line) = panel.prompt_mut().read_line()? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                panel.prompt_mut().print(HELP)?;
                continue;
            }
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    panel.prompt_mut().print(&message)?;
                }
                continue;
            }
        };

        debug!(?command, "terminal command");
        let outcome = apply(panel, command).await;
        if let Some(note) = outcome_note(outcome) {
            panel.prompt_mut().print(note)?;
        }

        let page = panel.page().to_string();
        panel.prompt_mut().print(&page)?;
    }

    Ok(())
}

async fn apply<A, R, W>(panel: &mut UserPanel<A, TerminalPrompt<R, W>>, command: Command) -> Outcome
where
    A: UsersApi,
    R: BufRead,
    W: Write,
{
    match command {
        Command::List => panel.refresh_list().await,
        Command::Select(id) => panel.select_id(id),
        Command::New(name) => {
            panel.set_new_user_name(&name);
            panel.create_user().await
        }
        Command::Edit => panel.begin_edit(),
        Command::Save(name) => {
            panel.set_edit_name(&name);
            panel.save_edit().await
        }
        Command::Cancel => {
            panel.cancel_edit();
            Outcome::Completed
        }
        Command::Delete => panel.delete_selected().await,
        Command::Help | Command::Quit => Outcome::Skipped,
    }
}

fn outcome_note(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Completed => None,
        Outcome::Skipped => Some("(nothing to do)"),
        Outcome::Cancelled => Some("(cancelled)"),
        Outcome::Failed => Some("(request failed, see log)"),
    }
}
