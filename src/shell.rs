//! Interactive terminal shell
//!
//! Reads one command per line and drives the views. Insight requests run
//! in the background and print when they land, unless the panel was closed
//! or reopened first.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, Lines};

use crate::api::TrackerBackend;
use crate::config::UiConfig;
use crate::models::InsightKind;
use crate::navigation::Route;
use crate::render;
use crate::session::LOGIN_PROMPT;
use crate::views::{
    AddApplicationView, ApplicationForm, ApplicationListView, InsightPanel, InsightResolution,
    LoginView, RegisterView, ViewContext, DELETE_DEFAULT_ERROR,
};

pub const HELP: &str = "\
Commands:
  login <email> <password>
  register <name> <email> <password>
  logout
  list                 show your applications
  add                  add an application (prompts for each field)
  delete <n>           delete row n of the last list
  skills <n>           skill recommendations for row n
  interview <n>        interview prep tips for row n
  analysis <n>         skill analysis for row n
  close                close the insight panel
  route                show the current route
  help
  quit";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Logout,
    List,
    Add,
    Delete(usize),
    Insight(InsightKind, usize),
    Close,
    Route,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(Command::Empty);
        };
        let args: Vec<&str> = parts.collect();

        let command = match (word, args.as_slice()) {
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("login", _) => return Err("usage: login <email> <password>".to_string()),
            ("register", [name, email, password]) => Command::Register {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ("register", _) => {
                return Err("usage: register <name> <email> <password>".to_string())
            }
            ("logout", []) => Command::Logout,
            ("list", []) => Command::List,
            ("add", []) => Command::Add,
            ("delete", [n]) => Command::Delete(parse_row(n)?),
            ("skills", [n]) => Command::Insight(InsightKind::SkillRecommendations, parse_row(n)?),
            ("interview", [n]) => Command::Insight(InsightKind::InterviewPrep, parse_row(n)?),
            ("analysis", [n]) => Command::Insight(InsightKind::SkillAnalysis, parse_row(n)?),
            ("delete" | "skills" | "interview" | "analysis", _) => {
                return Err(format!("usage: {} <n>", word))
            }
            ("close", []) => Command::Close,
            ("route", []) => Command::Route,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => return Err(format!("Unknown command: {} (try `help`)", word)),
        };
        Ok(command)
    }
}

fn parse_row(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Not a row number: {}", raw)),
    }
}

/// Printed before the `add` prompts
const NEW_APPLICATION: &str = "New application:";

/// Prompts used by `add`, in field order
const ADD_PROMPTS: [&str; 5] = [
    "Company",
    "Job Title",
    "Job Details",
    "Deadline (YYYY-MM-DD)",
    "Contact Info (optional)",
];

pub struct Shell {
    ctx: ViewContext,
    login: LoginView,
    register: RegisterView,
    add: AddApplicationView,
    list: ApplicationListView,
    panel: InsightPanel,
}

impl Shell {
    pub fn new(backend: Arc<dyn TrackerBackend>, ui: UiConfig) -> Self {
        Self::with_context(ViewContext::new(backend, ui))
    }

    pub fn with_context(ctx: ViewContext) -> Self {
        Self {
            login: LoginView::new(ctx.clone()),
            register: RegisterView::new(ctx.clone()),
            add: AddApplicationView::new(ctx.clone()),
            list: ApplicationListView::new(ctx.clone()),
            panel: InsightPanel::new(ctx.clone()),
            ctx,
        }
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    /// Read commands from `input` until it ends or `quit`
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        println!("InternSight v{} (type `help`)", env!("CARGO_PKG_VERSION"));

        loop {
            prompt(&format!("{}> ", self.ctx.navigator.current())).await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(usage) => {
                    println!("{}", usage);
                    continue;
                }
            };

            let output = match command {
                Command::Quit => break,
                Command::Add => {
                    let header = self.handle(Command::Add).await;
                    println!("{}", header);
                    if header != NEW_APPLICATION {
                        continue;
                    }
                    match read_form(&mut lines).await? {
                        Some(form) => self.add_application(form).await,
                        None => break,
                    }
                }
                other => self.handle(other).await,
            };
            if !output.is_empty() {
                println!("{}", output);
            }
        }

        self.panel.close();
        Ok(())
    }

    /// Execute one command and return what should be printed
    pub async fn handle(&mut self, command: Command) -> String {
        match command {
            Command::Login { email, password } => {
                self.login.form.email = email;
                self.login.form.password = password;
                match self.login.submit().await {
                    Ok(()) => {
                        let greeting = self
                            .ctx
                            .session
                            .current()
                            .map(|s| format!("Welcome, {}.", s.username))
                            .unwrap_or_default();
                        format!("{}\n{}", greeting, self.show_list().await)
                    }
                    Err(_) => self.login.error().unwrap_or_default().to_string(),
                }
            }
            Command::Register { name, email, password } => {
                if self.register.redirect_if_signed_in() {
                    return format!("Already signed in.\n{}", self.show_list().await);
                }
                self.ctx.navigator.navigate(Route::Register);
                self.register.form.name = name;
                self.register.form.email = email;
                self.register.form.password = password;
                match self.register.submit().await {
                    Ok(()) => self.register.message().unwrap_or_default().to_string(),
                    Err(_) => self.register.error().unwrap_or_default().to_string(),
                }
            }
            Command::Logout => {
                self.panel.close();
                self.ctx.session.logout();
                self.list.sync_identity().await;
                self.ctx.navigator.navigate(Route::Login);
                "Logged out.".to_string()
            }
            Command::List => self.show_list().await,
            Command::Add => {
                if !self.ctx.session.is_logged_in() {
                    return LOGIN_PROMPT.to_string();
                }
                self.ctx.navigator.navigate(Route::AddApplication);
                NEW_APPLICATION.to_string()
            }
            Command::Delete(row) => self.delete(row).await,
            Command::Insight(kind, row) => self.open_insight(kind, row),
            Command::Close => {
                self.panel.close();
                String::new()
            }
            Command::Route => self.ctx.navigator.current().path().to_string(),
            Command::Help => HELP.to_string(),
            Command::Quit | Command::Empty => String::new(),
        }
    }

    pub async fn add_application(&mut self, form: ApplicationForm) -> String {
        self.ctx.navigator.navigate(Route::AddApplication);
        self.add.form = form;
        match self.add.submit().await {
            Ok(()) => self.add.message().unwrap_or_default().to_string(),
            Err(_) => self.add.error().unwrap_or_default().to_string(),
        }
    }

    async fn show_list(&mut self) -> String {
        if !self.ctx.session.is_logged_in() {
            return LOGIN_PROMPT.to_string();
        }
        self.ctx.navigator.navigate(Route::Home);

        if !self.list.sync_identity().await {
            // Same user: pick up changes made since the last fetch
            let _ = self.list.refresh().await;
        }
        match self.list.error() {
            Some(error) => error.to_string(),
            None => render::list_screen(&self.list.screen()),
        }
    }

    async fn delete(&mut self, row: usize) -> String {
        if !self.ctx.session.is_logged_in() {
            return LOGIN_PROMPT.to_string();
        }
        let Some(id) = self.list.record_at(row).map(|r| r.id.clone()) else {
            return format!("No row {} in the last list.", row);
        };
        match self.list.delete(&id).await {
            Ok(()) => render::list_screen(&self.list.screen()),
            Err(err) => self
                .list
                .take_alert()
                .unwrap_or_else(|| err.user_message(DELETE_DEFAULT_ERROR)),
        }
    }

    fn open_insight(&mut self, kind: InsightKind, row: usize) -> String {
        if !self.ctx.session.is_logged_in() {
            return LOGIN_PROMPT.to_string();
        }
        let Some(record) = self.list.record_at(row).cloned() else {
            return format!("No row {} in the last list.", row);
        };
        let pending = match self.panel.open_for(kind, &record) {
            Ok(pending) => pending,
            Err(err) => return err.user_message(kind.default_error()),
        };

        tokio::spawn(async move {
            if let InsightResolution::Applied(output) = pending.run().await {
                if output.is_error() {
                    eprintln!("\n{}", render::insight_output(&output));
                } else {
                    println!("\n{}", render::insight_output(&output));
                }
            }
        });

        format!(
            "{} ({})\n{}",
            kind.action_label(),
            record.company,
            render::panel(&self.panel.snapshot()).unwrap_or_default()
        )
    }
}

async fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await
}

/// Prompt for the create-form fields. `None` when input ends early.
async fn read_form<R>(lines: &mut Lines<R>) -> std::io::Result<Option<ApplicationForm>>
where
    R: AsyncBufRead + Unpin,
{
    let mut values = Vec::with_capacity(ADD_PROMPTS.len());
    for label in ADD_PROMPTS {
        prompt(&format!("  {}: ", label)).await?;
        match lines.next_line().await? {
            Some(value) => values.push(value),
            None => return Ok(None),
        }
    }

    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    Ok(Some(ApplicationForm {
        company: next(),
        job: next(),
        job_details: next(),
        deadline: next(),
        contact_info: next(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{context, record, FakeBackend};
    use crate::views::ADD_SUCCESS_MESSAGE;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
        assert_eq!(
            Command::parse("login a@b.com pw"),
            Ok(Command::Login {
                email: "a@b.com".to_string(),
                password: "pw".to_string()
            })
        );
        assert_eq!(
            Command::parse("skills 2"),
            Ok(Command::Insight(InsightKind::SkillRecommendations, 2))
        );
        assert_eq!(
            Command::parse("analysis 1"),
            Ok(Command::Insight(InsightKind::SkillAnalysis, 1))
        );
        assert_eq!(Command::parse("delete 3"), Ok(Command::Delete(3)));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("login a@b.com").is_err());
        assert!(Command::parse("delete 0").is_err());
        assert!(Command::parse("interview x").is_err());
        assert!(Command::parse("frobnicate").unwrap_err().contains("frobnicate"));
    }

    #[tokio::test]
    async fn test_login_then_list() {
        let backend = FakeBackend::with_records(vec![record("a1", "u1", "details")]);
        let mut shell = Shell::with_context(context(backend.clone()));

        assert_eq!(shell.handle(Command::List).await, LOGIN_PROMPT);

        let out = shell
            .handle(Command::parse("login a@b.com pw").unwrap())
            .await;
        assert!(out.contains("Welcome, A."));
        assert!(out.contains("[1] Company a1"));
        assert_eq!(shell.context().navigator.current(), Route::Home);

        let out = shell.handle(Command::parse("login a@b.com bad").unwrap()).await;
        assert_eq!(out, "Invalid email or password");
    }

    #[tokio::test]
    async fn test_add_and_delete() {
        let backend = FakeBackend::with_records(vec![record("a1", "u1", "details")]);
        let mut shell = Shell::with_context(context(backend.clone()));
        shell.handle(Command::parse("login a@b.com pw").unwrap()).await;

        let form = ApplicationForm {
            company: "Acme".to_string(),
            job: "Intern".to_string(),
            job_details: "Rust".to_string(),
            deadline: "2025-03-09".to_string(),
            contact_info: String::new(),
        };
        assert_eq!(shell.add_application(form).await, ADD_SUCCESS_MESSAGE);

        assert_eq!(shell.handle(Command::Delete(5)).await, "No row 5 in the last list.");
        let out = shell.handle(Command::Delete(1)).await;
        assert!(out.ends_with("No applications found."));
        assert_eq!(backend.count("delete"), 1);
    }

    #[tokio::test]
    async fn test_delete_after_logout_prompts_login() {
        let backend = FakeBackend::with_records(vec![record("a1", "u1", "details")]);
        let mut shell = Shell::with_context(context(backend.clone()));
        shell.handle(Command::parse("login a@b.com pw").unwrap()).await;
        shell.handle(Command::Logout).await;

        assert_eq!(shell.handle(Command::Delete(1)).await, LOGIN_PROMPT);
        assert_eq!(shell.handle(Command::parse("skills 1").unwrap()).await, LOGIN_PROMPT);
        assert!(shell.list.record_at(1).is_none());
        assert_eq!(backend.count("delete"), 0);
    }

    #[tokio::test]
    async fn test_delete_failure_prints_message() {
        let backend = FakeBackend::with_records(vec![record("a1", "u1", "details")]);
        let mut shell = Shell::with_context(context(backend.clone()));
        shell.handle(Command::parse("login a@b.com pw").unwrap()).await;

        backend.fail("delete", None);
        assert_eq!(shell.handle(Command::Delete(1)).await, DELETE_DEFAULT_ERROR);
    }

    #[tokio::test]
    async fn test_add_prompts_for_fields() {
        let backend = FakeBackend::new();
        let mut shell = Shell::with_context(context(backend.clone()));
        let input: &[u8] =
            b"add
login a@b.com pw
add
Acme
Intern
Rust work
2025-03-09

quit
";

        shell.run(input).await.unwrap();
        assert_eq!(backend.count("create"), 1);
        let sent = backend.last_created().unwrap();
        assert_eq!(sent.company, "Acme");
        assert_eq!(sent.contact_info, "");
        assert_eq!(shell.context().navigator.current(), Route::AddApplication);
    }

    #[tokio::test]
    async fn test_insight_shows_loading_and_close_hides() {
        let backend = FakeBackend::with_records(vec![record("a1", "u1", "details")]);
        backend.hold_insights();
        let mut shell = Shell::with_context(context(backend.clone()));
        shell.handle(Command::parse("login a@b.com pw").unwrap()).await;

        let out = shell.handle(Command::parse("skills 1").unwrap()).await;
        assert_eq!(out, "Get Skill Recommendations (Company a1)\nLoading...");
        shell.handle(Command::Close).await;
        assert!(!shell.panel.is_open());
    }

    #[tokio::test]
    async fn test_run_reads_until_quit() {
        let backend = FakeBackend::new();
        let mut shell = Shell::with_context(context(backend.clone()));
        let input: &[u8] = b"help\nlogin a@b.com pw\nquit\nlogout\n";

        shell.run(input).await.unwrap();
        assert!(shell.context().session.is_logged_in());
        assert_eq!(backend.count("login"), 1);
    }
}
