//! Interactive menu loop around an integer [`Tree`].

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use crate::render::DEFAULT_INDENT;
use crate::Tree;

pub const MENU: &str = "\n1. Insert\n2. Print Tree\n3. Inorder Traversal\n4. Exit\nEnter choice: ";
pub const VALUE_PROMPT: &str = "Enter value to insert: ";

/// Fatal error of a session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejected user input. Reported to the user, the session carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid option.")]
    InvalidOption(String),
    #[error("Invalid value.")]
    InvalidValue(String),
}

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert,
    Print,
    Inorder,
    Exit,
}

impl FromStr for Command {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(1) => Ok(Command::Insert),
            Ok(2) => Ok(Command::Print),
            Ok(3) => Ok(Command::Inorder),
            Ok(4) => Ok(Command::Exit),
            _ => Err(InputError::InvalidOption(s.to_owned())),
        }
    }
}

/// Session settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Indentation step of the tree print.
    pub indent: usize,
    /// Whether to write the menu and value prompts.
    pub prompts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            prompts: true,
        }
    }
}

/// Runs the menu against a tree, reading whitespace separated tokens from `input`.
pub struct Session<R, W> {
    tree: Tree<i32>,
    tokens: Tokens<R>,
    output: W,
    config: Config,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            tree: Tree::new(),
            tokens: Tokens::new(input),
            output,
            config,
        }
    }

    /// Starts the session from an existing tree instead of an empty one.
    pub fn with_tree(mut self, tree: Tree<i32>) -> Self {
        self.tree = tree;
        self
    }

    pub fn tree(&self) -> &Tree<i32> {
        &self.tree
    }

    pub fn into_tree(self) -> Tree<i32> {
        self.tree
    }

    /// Loops until the exit option is chosen or the input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompt(MENU)?;
            let token = match self.tokens.next_token()? {
                Some(token) => token,
                None => {
                    debug!("input exhausted");
                    return Ok(());
                }
            };
            let flow = match token.parse::<Command>() {
                Ok(command) => self.execute(command)?,
                Err(err) => {
                    self.reject(err)?;
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                debug!("exit requested");
                return Ok(());
            }
        }
    }

    /// Executes a single command.
    pub fn execute(&mut self, command: Command) -> Result<ControlFlow<()>> {
        debug!(?command, "executing");
        match command {
            Command::Insert => {
                self.prompt(VALUE_PROMPT)?;
                if let Some(token) = self.tokens.next_token()? {
                    match token.parse::<i32>() {
                        Ok(key) => {
                            let inserted = self.tree.insert(key);
                            debug!(key, inserted, "insert");
                        }
                        Err(_) => self.reject(InputError::InvalidValue(token))?,
                    }
                }
            }
            Command::Print => {
                write!(self.output, "{}", self.tree.display().indent(self.config.indent))?;
            }
            Command::Inorder => {
                write!(self.output, "Inorder: ")?;
                for key in &self.tree {
                    write!(self.output, "{key} ")?;
                }
                writeln!(self.output)?;
            }
            Command::Exit => return Ok(ControlFlow::Break(())),
        }
        self.output.flush()?;
        Ok(ControlFlow::Continue(()))
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        if self.config.prompts {
            write!(self.output, "{text}")?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn reject(&mut self, err: InputError) -> Result<()> {
        warn!(?err, "rejected input");
        writeln!(self.output, "{err}")?;
        self.output.flush()?;
        Ok(())
    }
}

struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            // Undecodable bytes still form a token, rejected like any other bad input
            let mut line = Vec::new();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                line.split(u8::is_ascii_whitespace)
                    .filter(|token| !token.is_empty())
                    .map(|token| String::from_utf8_lossy(token).into_owned()),
            );
        }
    }
}
