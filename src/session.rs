//! Command dispatch
//!
//! A [`Session`] owns the vector store and the configuration. Each input
//! line is parsed into a [`Command`], resolved against the store and turned
//! into a [`Reply`] or a [`MinimatError`]; both render as the text the shell
//! prints.

use crate::command::{self, Command, Operand, Operator};
use crate::config::MinimatConfig;
use crate::csv_codec::{self, LoadReport, SaveReport, SkipReason};
use crate::error::{MinimatError, Result};
use crate::store::{validate_name, Vector, VectorStore};
use crate::vector::Vec3;
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, error, info, warn};

/// Command reference printed by `help` and `-h`.
pub const HELP: &str = "\
Commands:
  var = x [y [z]]        Assign vector (y, z default to 0; commas optional)
  var = var1 op var2     Add (+), subtract (-), cross (x) or dot (.) vectors
  var = var1 * s         Scale a vector by a number (either order)
  var1 op var2           Same operations without assignment
  var * s                Scale without assignment (either order)
  var                    Print vector
  list                   List all vectors
  clear                  Clear all vectors
  load <file>            Load vectors from a CSV file (.csv is appended)
  save <file>            Save all vectors to a CSV file (.csv is appended)
  help                   Show this help
  quit                   Exit program
";

/// What the shell should do after a line has been executed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Successful result of one command
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// `label = (x.xx, y.xx, z.xx)`
    Vector { label: String, value: Vec3 },
    /// `label = d.dd`
    Scalar { label: String, value: f64 },
    /// `name: (x.xx, y.xx, z.xx)`
    Show(Vector),
    List(Vec<Vector>),
    Cleared,
    Help,
    Loaded(LoadReport),
    Saved(SaveReport),
    Quit,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Vector { label, value } => writeln!(f, "{label} = {value}"),
            Reply::Scalar { label, value } => writeln!(f, "{label} = {value:.2}"),
            Reply::Show(vector) => writeln!(f, "{vector}"),
            Reply::List(vectors) => vectors.iter().try_for_each(|v| writeln!(f, "{v}")),
            Reply::Cleared | Reply::Quit => Ok(()),
            Reply::Help => f.write_str(HELP),
            Reply::Loaded(report) => {
                for skipped in &report.skipped {
                    match &skipped.reason {
                        SkipReason::Blank => {
                            writeln!(f, "Warning: skipping blank line {}", skipped.line)?
                        }
                        SkipReason::Malformed(reason) => writeln!(
                            f,
                            "Warning: skipping malformed line {}: {reason}",
                            skipped.line
                        )?,
                    }
                }
                writeln!(f, "Loaded {} vectors from {}", report.loaded, report.path)
            }
            Reply::Saved(report) => {
                writeln!(f, "Saved {} vectors to {}", report.saved, report.path)
            }
        }
    }
}

/// An interactive calculator session
#[derive(Debug, Default)]
pub struct Session {
    store: VectorStore,
    config: MinimatConfig,
}

impl Session {
    pub fn new(config: MinimatConfig) -> Self {
        Session {
            store: VectorStore::with_initial_capacity(config.initial_capacity),
            config,
        }
    }

    pub fn config(&self) -> &MinimatConfig {
        &self.config
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VectorStore {
        &mut self.store
    }

    /// Execute one line and write its output
    ///
    /// Command errors are written as diagnostics and never returned; the
    /// only error is a failure to write to `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minimat::{Control, Session};
    ///
    /// let mut session = Session::default();
    /// let mut out = Vec::new();
    /// session.execute("a = 1, 2, 3", &mut out).unwrap();
    /// session.execute("a . a", &mut out).unwrap();
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "a: (1.00, 2.00, 3.00)\na . a = 14.00\n"
    /// );
    /// assert_eq!(session.execute("quit", &mut Vec::new()).unwrap(), Control::Quit);
    /// ```
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Control> {
        match self.evaluate(line) {
            Ok(Reply::Quit) => Ok(Control::Quit),
            Ok(reply) => {
                write!(out, "{reply}")?;
                Ok(Control::Continue)
            }
            Err(e) => {
                if e.is_user_error() {
                    debug!(line, error = %e, "command rejected");
                } else if matches!(e, MinimatError::StorageExhausted { .. }) {
                    error!(line, error = %e, "command failed: storage exhausted");
                } else {
                    warn!(line, error = %e, "command failed");
                }
                writeln!(out, "{e}")?;
                Ok(Control::Continue)
            }
        }
    }

    /// Parse and run one line without rendering it.
    pub fn evaluate(&mut self, line: &str) -> Result<Reply> {
        let command = command::parse(line);
        debug!(?command, "dispatching");

        match command {
            Command::AssignBinary { dest, lhs, op, rhs } => {
                self.assign_binary(dest, lhs, op, rhs)
            }
            Command::AssignComponents { dest, components } => {
                let value = Vec3::from(components);
                self.store_vector(dest, value)?;
                Ok(Reply::Show(Vector {
                    name: dest.to_string(),
                    value,
                }))
            }
            Command::Scale { name, factor } => {
                let value = self.resolve(Operand::Name(name))?;
                Ok(Reply::Vector {
                    label: format!("{factor:.2} * {name}"),
                    value: value * factor,
                })
            }
            Command::Binary { lhs, op, rhs } => self.binary(lhs, op, rhs),
            Command::Word { word, rest } => self.word(word, rest),
            Command::Empty => Err(MinimatError::Parse),
        }
    }

    /// Load vectors from a CSV file into the store.
    pub fn load(&mut self, path: &str) -> Result<LoadReport> {
        csv_codec::load(
            &mut self.store,
            path,
            self.config.max_path_len,
            self.config.max_name_len,
        )
    }

    /// Save the store to a CSV file.
    pub fn save(&self, path: &str) -> Result<SaveReport> {
        csv_codec::save(&self.store, path, self.config.max_path_len)
    }

    /// Release the store. Called by the shell before the process exits.
    pub fn shutdown(&mut self) {
        let released = self.store.len();
        self.store.clear();
        info!(released, "session shut down");
    }

    fn assign_binary(
        &mut self,
        dest: &str,
        lhs: Operand<'_>,
        op: &str,
        rhs: Operand<'_>,
    ) -> Result<Reply> {
        let operator = Operator::parse(op);

        if operator == Some(Operator::Mul) {
            let forward = self.lookup(lhs).zip(rhs.as_scalar());
            let reversed = self.lookup(rhs).zip(lhs.as_scalar());
            let (v, s) = forward
                .or(reversed)
                .ok_or(MinimatError::InvalidScalarMultiplication)?;
            return self.assign(dest, v * s);
        }

        let a = self.resolve(lhs)?;
        let b = self.resolve(rhs)?;
        match operator {
            Some(Operator::Add) => self.assign(dest, a + b),
            Some(Operator::Sub) => self.assign(dest, a - b),
            Some(Operator::Cross(_)) => self.assign(dest, a.cross(b)),
            Some(Operator::Dot) => Ok(Reply::Scalar {
                label: dest.to_string(),
                value: a.dot(b),
            }),
            Some(Operator::Mul) | None => Err(MinimatError::InvalidOperator(op.to_string())),
        }
    }

    fn binary(&self, lhs: Operand<'_>, op: &str, rhs: Operand<'_>) -> Result<Reply> {
        let a = self.resolve(lhs)?;
        let b = self.resolve(rhs)?;
        let lhs = lhs.as_name().unwrap_or_default();
        let rhs = rhs.as_name().unwrap_or_default();

        let invalid = || MinimatError::InvalidOperator(op.to_string());
        let operator = Operator::parse(op).ok_or_else(invalid)?;
        let label = format!("{lhs} {} {rhs}", operator.symbol());

        let value = match operator {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Cross(_) => a.cross(b),
            Operator::Dot => {
                return Ok(Reply::Scalar {
                    label,
                    value: a.dot(b),
                })
            }
            Operator::Mul => return Err(invalid()),
        };
        Ok(Reply::Vector { label, value })
    }

    fn word(&mut self, word: &str, rest: &str) -> Result<Reply> {
        if let Some(vector) = self.store.lookup(word) {
            return Ok(Reply::Show(vector.clone()));
        }

        match word {
            "list" => Ok(Reply::List(self.store.list().to_vec())),
            "clear" => {
                self.store.clear();
                info!("store cleared");
                Ok(Reply::Cleared)
            }
            "quit" | "exit" => Ok(Reply::Quit),
            "help" => Ok(Reply::Help),
            "load" if rest.is_empty() => Err(MinimatError::Usage("load <file>")),
            "load" => self.load(rest).map(Reply::Loaded),
            "save" if rest.is_empty() => Err(MinimatError::Usage("save <file>")),
            "save" => self.save(rest).map(Reply::Saved),
            _ => Err(MinimatError::UnknownCommand(word.to_string())),
        }
    }

    fn store_vector(&mut self, dest: &str, value: Vec3) -> Result<()> {
        validate_name(dest, self.config.max_name_len)?;
        self.store.upsert_vec(dest, value)
    }

    fn assign(&mut self, dest: &str, value: Vec3) -> Result<Reply> {
        self.store_vector(dest, value)?;
        Ok(Reply::Vector {
            label: dest.to_string(),
            value,
        })
    }

    fn lookup(&self, operand: Operand<'_>) -> Option<Vec3> {
        operand
            .as_name()
            .and_then(|name| self.store.lookup(name))
            .map(|v| v.value)
    }

    fn resolve(&self, operand: Operand<'_>) -> Result<Vec3> {
        self.lookup(operand).ok_or_else(|| MinimatError::UnknownName {
            name: match operand {
                Operand::Name(name) => name.to_string(),
                Operand::Scalar(s) => s.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        session.execute(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_assign_components_prints_and_stores() {
        let mut session = Session::default();
        assert_eq!(run(&mut session, "a = 1"), "a: (1.00, 0.00, 0.00)\n");
        assert_eq!(
            session.store().lookup("a").unwrap().value,
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_dot_assignment_does_not_store() {
        let mut session = Session::default();
        run(&mut session, "a = 1 2 3");
        assert_eq!(run(&mut session, "d = a . a"), "d = 14.00\n");
        assert!(session.store().lookup("d").is_none());
    }

    #[test]
    fn test_scalar_multiplication_assignment() {
        let mut session = Session::default();
        run(&mut session, "a = 1 2 3");
        assert_eq!(run(&mut session, "b = a * 2"), "b = (2.00, 4.00, 6.00)\n");
        assert_eq!(run(&mut session, "c = 0.5 * a"), "c = (0.50, 1.00, 1.50)\n");
        assert_eq!(run(&mut session, "e = a * a"), "Invalid scalar multiplication\n");
        assert!(session.store().lookup("e").is_none());
    }

    #[test]
    fn test_invalid_operator_and_unknown_variable() {
        let mut session = Session::default();
        run(&mut session, "a = 1 2 3");
        assert_eq!(run(&mut session, "c = a / a"), "Invalid operator: /\n");
        assert_eq!(run(&mut session, "c = a + q"), "Unknown variable\n");
        assert_eq!(run(&mut session, "a / a"), "Invalid operator: /\n");
        assert_eq!(run(&mut session, "a * a"), "Invalid operator: *\n");
        assert_eq!(run(&mut session, "a + q"), "Unknown variable\n");
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_comma_between_operands_is_invalid_operator() {
        let mut session = Session::default();
        run(&mut session, "a = 1 2 3");
        run(&mut session, "b = 4 5 6");
        assert_eq!(run(&mut session, "a , b"), "Invalid operator: ,\n");
        assert_eq!(run(&mut session, "a , q"), "Unknown variable\n");
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn test_binary_without_assignment_labels() {
        let mut session = Session::default();
        run(&mut session, "a = 1 0 0");
        run(&mut session, "b = 0 1 0");
        assert_eq!(run(&mut session, "a + b"), "a + b = (1.00, 1.00, 0.00)\n");
        assert_eq!(run(&mut session, "a X b"), "a X b = (0.00, 0.00, 1.00)\n");
        assert_eq!(run(&mut session, "a . b"), "a . b = 0.00\n");
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn test_scale_without_assignment() {
        let mut session = Session::default();
        run(&mut session, "v = 1 -2 3");
        assert_eq!(run(&mut session, "v * 3"), "3.00 * v = (3.00, -6.00, 9.00)\n");
        assert_eq!(run(&mut session, "-1 * v"), "-1.00 * v = (-1.00, 2.00, -3.00)\n");
        assert_eq!(run(&mut session, "w * 3"), "Unknown variable\n");
    }

    #[test]
    fn test_word_commands() {
        let mut session = Session::default();
        assert_eq!(run(&mut session, "frobnicate"), "Unknown variable or command\n");
        assert_eq!(run(&mut session, ""), "Could not parse command\n");
        assert_eq!(run(&mut session, "help"), HELP);
        assert_eq!(run(&mut session, "load"), "Usage: load <file>\n");

        run(&mut session, "list = 1 1 1");
        assert_eq!(run(&mut session, "list"), "list: (1.00, 1.00, 1.00)\n");
    }

    #[test]
    fn test_invalid_destination_name() {
        let mut session = Session::default();
        let out = run(&mut session, "toolongname = 1 2 3");
        assert!(out.starts_with("Invalid name: toolongname"));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_quit_and_exit() {
        let mut session = Session::default();
        let mut out = Vec::new();
        assert_eq!(session.execute("quit", &mut out).unwrap(), Control::Quit);
        assert_eq!(session.execute("exit", &mut out).unwrap(), Control::Quit);
        assert!(out.is_empty());
    }

    #[test]
    fn test_shutdown_releases_store() {
        let mut session = Session::default();
        run(&mut session, "a = 1 2 3");
        session.shutdown();
        assert!(session.store().is_empty());
        assert_eq!(session.store().capacity(), 0);
    }
}
