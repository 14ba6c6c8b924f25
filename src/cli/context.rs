//! Shell state and command handlers.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    cli::{formatting, output},
    config::{Config, ConfigManager},
    core::TransactionStore,
    domain::TransactionKind,
    errors::TrackerError,
    storage::{JsonFileSlot, PersistStatus, PersistenceAdapter},
    utils::build_info,
};

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Errors reported for a single command; the shell keeps running after them.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Core(#[from] TrackerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

type Handler = fn(&mut ShellContext, &[&str]) -> Result<LoopControl, CommandError>;

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    summary: &'static str,
    handler: Handler,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "income",
        usage: "income <description> <amount>",
        summary: "Record money coming in",
        handler: cmd_income,
    },
    CommandSpec {
        name: "expense",
        usage: "expense <description> <amount>",
        summary: "Record money going out",
        handler: cmd_expense,
    },
    CommandSpec {
        name: "list",
        usage: "list [income|expense]",
        summary: "Show transaction history, newest first",
        handler: cmd_list,
    },
    CommandSpec {
        name: "summary",
        usage: "summary",
        summary: "Show total income, total expenses, and savings",
        handler: cmd_summary,
    },
    CommandSpec {
        name: "chart",
        usage: "chart",
        summary: "Show how income splits between expenses and savings",
        handler: cmd_chart,
    },
    CommandSpec {
        name: "help",
        usage: "help [command]",
        summary: "List commands or describe one",
        handler: cmd_help,
    },
    CommandSpec {
        name: "version",
        usage: "version",
        summary: "Show build information",
        handler: cmd_version,
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
        handler: cmd_exit,
    },
];

fn find_command(name: &str) -> Option<&'static CommandSpec> {
    let name = if name == "quit" { "exit" } else { name };
    COMMANDS.iter().find(|spec| spec.name == name)
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    config: Config,
    store: TransactionStore,
    theme: ColorfulTheme,
}

impl ShellContext {
    /// Loads configuration and opens the transaction store in the configured data dir.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = ConfigManager::new().load()?;
        let data_dir = config.resolve_data_dir();
        tracing::info!(path = %data_dir.display(), "opening transaction store");
        let adapter = PersistenceAdapter::new(Box::new(JsonFileSlot::in_dir(&data_dir)));
        Ok(Self::with_store(mode, config, TransactionStore::open(adapter)))
    }

    pub fn with_store(mode: CliMode, config: Config, store: TransactionStore) -> Self {
        output::set_preferences(output::OutputPreferences::from_config(&config));
        let context = Self {
            mode,
            running: true,
            config,
            store,
            theme: ColorfulTheme::default(),
        };
        if let PersistStatus::ReadFailed(reason) = context.store.last_persist_status() {
            output::warning(format!(
                "Stored transactions could not be read ({reason}); starting with an empty history."
            ));
        }
        context
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|spec| spec.name).collect()
    }

    pub fn prompt(&self) -> String {
        format!("finance ({}) > ", self.store.len())
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match find_command(command) {
            Some(spec) => (spec.handler)(self, args),
            None => Err(CommandError::UnknownCommand(command.to_string())),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit the finance tracker?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::UnknownCommand(name) => {
                output::error(format!("Unknown command `{name}`."));
                if let Some(best) = suggest(&name) {
                    output::info(format!("Suggestion: `{best}`?"));
                }
            }
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            CommandError::Core(err) if err.is_validation() => {
                output::error(format!("{err}. Please enter a valid description and amount."));
            }
            CommandError::Core(err) => output::error(err),
        }
    }

    fn symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    fn add(&mut self, kind: TransactionKind, args: &[&str]) -> Result<LoopControl, CommandError> {
        let (amount, description) = match args.split_last() {
            Some((amount, description)) if !description.is_empty() => (*amount, description.join(" ")),
            _ => {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: {} <description> <amount>",
                    kind.as_str()
                )))
            }
        };

        let outcome = self
            .store
            .add_transaction_from_input(&description, amount, kind)?;
        output::success(format!(
            "Added {}: {} ({}{})",
            kind.as_str(),
            outcome.transaction.description(),
            kind.sign(),
            formatting::format_currency(outcome.transaction.amount(), self.symbol())
        ));
        output::info(format!(
            "Savings: {}",
            formatting::format_currency(outcome.aggregates.savings, self.symbol())
        ));
        if let Some(err) = outcome.persistence.error() {
            output::warning(format!("{err}. The entry is kept for this session only."));
        }
        Ok(LoopControl::Continue)
    }
}

fn suggest(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|spec| (levenshtein(spec.name, input), spec.name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

fn cmd_income(ctx: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    ctx.add(TransactionKind::Income, args)
}

fn cmd_expense(ctx: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    ctx.add(TransactionKind::Expense, args)
}

fn cmd_list(ctx: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    let kinds: Vec<TransactionKind> = match args {
        [] => TransactionKind::ALL.to_vec(),
        [kind] => vec![TransactionKind::parse(kind).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown transaction type `{kind}`"))
        })?],
        _ => return Err(CommandError::InvalidArguments("usage: list [income|expense]".into())),
    };
    for kind in kinds {
        output::section(format!("{kind} History"));
        let rows = ctx.store.filtered_by_kind(kind);
        output::lines(formatting::render_list(&rows, ctx.symbol()));
    }
    Ok(LoopControl::Continue)
}

fn cmd_summary(ctx: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    output::section("Summary");
    output::lines([formatting::render_summary(&ctx.store.aggregates(), ctx.symbol())]);
    Ok(LoopControl::Continue)
}

fn cmd_chart(ctx: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    output::section("Financial Distribution");
    output::lines([formatting::render_distribution(&ctx.store.distribution(), ctx.symbol())]);
    Ok(LoopControl::Continue)
}

fn cmd_help(_ctx: &mut ShellContext, args: &[&str]) -> Result<LoopControl, CommandError> {
    match args.first() {
        Some(name) => {
            let spec = find_command(&name.to_ascii_lowercase())
                .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
            output::lines([format!("{}\n  {}", spec.usage, spec.summary)]);
        }
        None => {
            output::section("Available commands");
            output::lines(
                COMMANDS
                    .iter()
                    .map(|spec| format!("{:<32}{}", spec.usage, spec.summary)),
            );
        }
    }
    Ok(LoopControl::Continue)
}

fn cmd_version(_ctx: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    output::info(build_info::current().summary());
    Ok(LoopControl::Continue)
}

fn cmd_exit(_ctx: &mut ShellContext, _args: &[&str]) -> Result<LoopControl, CommandError> {
    Ok(LoopControl::Exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;

    fn context() -> ShellContext {
        let store = TransactionStore::open(PersistenceAdapter::new(Box::new(MemorySlot::new())));
        let config = Config {
            plain_output: true,
            ..Config::default()
        };
        ShellContext::with_store(CliMode::Script, config, store)
    }

    #[test]
    fn income_joins_unquoted_description_words() {
        let mut ctx = context();
        ctx.dispatch("income", &["Monthly", "salary", "3000"]).unwrap();
        let txns = ctx.store().transactions();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description(), "Monthly salary");
        assert_eq!(txns[0].amount(), 3000.0);
    }

    #[test]
    fn invalid_entry_surfaces_validation_error() {
        let mut ctx = context();
        let err = ctx.dispatch("expense", &["", "10"]).unwrap_err();
        assert!(matches!(err, CommandError::Core(ref core) if core.is_validation()));
        let err = ctx.dispatch("income", &["Bad", "-5"]).unwrap_err();
        assert!(matches!(err, CommandError::Core(_)));
        assert!(ctx.store().is_empty());
    }

    #[test]
    fn add_without_amount_is_a_usage_error() {
        let mut ctx = context();
        assert!(matches!(
            ctx.dispatch("income", &["3000"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn list_rejects_unknown_kind() {
        let mut ctx = context();
        assert!(ctx.dispatch("list", &["income"]).is_ok());
        assert!(matches!(
            ctx.dispatch("list", &["transfer"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn exit_and_quit_stop_the_loop() {
        let mut ctx = context();
        assert_eq!(ctx.dispatch("exit", &[]).unwrap(), LoopControl::Exit);
        assert_eq!(ctx.dispatch("quit", &[]).unwrap(), LoopControl::Exit);
    }

    #[test]
    fn suggestions_only_for_close_matches() {
        assert_eq!(suggest("sumary"), Some("summary"));
        assert_eq!(suggest("incme"), Some("income"));
        assert_eq!(suggest("zzzzzzzzzz"), None);
    }
}
