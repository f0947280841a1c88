//! A [`FlagSet`] backed by `clap`.
//!
//! Each declared flag becomes a long option on a `clap::Command`. Clap owns
//! the command-line syntax, help output, and argument errors; this adapter
//! keeps the field targets and writes every value given on the command line
//! through them once parsing succeeds.

use std::ffi::OsString;
use std::time::Duration;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};
use tracing::debug;

use crate::error::{FlagStructError, FlagStructResult};
use crate::flag_set::{FlagSet, FlagSetError};
use crate::target::Target;
use crate::value::{FlagValue, render_duration};

/// Id of the positional argument collecting everything after the flags.
const REMAINING_ID: &str = "flagstruct-remaining";

#[derive(Debug)]
struct Binding<'a> {
    name: String,
    target: Target<'a>,
}

/// Clap-backed flag set.
///
/// Flags are spelled `--name value` or `--name=value`; the argument after
/// `--name` is taken as the value even when it starts with `-`. `bool` flags
/// are spelled `--name` or `--name=<bool>`. When a flag is repeated the last
/// value wins. Arguments that are not flags are returned from
/// [`ClapFlags::try_parse_from`].
///
/// # Examples
///
/// ```
/// use flagstruct::{ClapFlags, FlagSet};
///
/// let mut verbose = false;
/// let mut flags = ClapFlags::new("demo");
/// flags.declare_bool(&mut verbose, "verbose", false, "Chatty output")?;
/// let rest = flags.try_parse_from(["--verbose", "file.txt"])?;
/// assert!(verbose);
/// assert_eq!(rest, ["file.txt"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ClapFlags<'a> {
    command: Command,
    bindings: Vec<Binding<'a>>,
}

impl<'a> ClapFlags<'a> {
    /// Creates an empty flag set for a program called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let command = Command::new(name.into())
            .no_binary_name(true)
            .args_override_self(true)
            .disable_help_flag(true)
            .arg(
                Arg::new("help")
                    .long("help")
                    .short('h')
                    .action(ArgAction::Help)
                    .help("Print help"),
            )
            .arg(
                Arg::new(REMAINING_ID)
                    .value_name("ARGS")
                    .num_args(1..)
                    .trailing_var_arg(true),
            );
        Self {
            command,
            bindings: Vec::new(),
        }
    }

    /// Sets the description shown at the top of the help output.
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.command = self.command.about(about.into());
        self
    }

    /// The underlying clap command.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Looks up a declared flag by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arg> {
        if !self.bindings.iter().any(|binding| binding.name == name) {
            return None;
        }
        self.command
            .get_arguments()
            .find(|arg| arg.get_id().as_str() == name)
    }

    /// Names of the declared flags, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|binding| binding.name.as_str())
    }

    /// Number of declared flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no flags have been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Renders the help text clap would print for `--help`.
    pub fn render_help(&mut self) -> String {
        self.command.render_help().to_string()
    }

    /// Parses `args` (without the program name) and stores every value given
    /// on the command line into its field.
    ///
    /// Consuming the flag set releases the borrows of the registered record.
    /// Returns the arguments that were not flags.
    ///
    /// # Errors
    ///
    /// - [`FlagStructError::CliParsing`] for clap errors, including `--help`
    ///   requests (see [`crate::is_display_request`]).
    /// - [`FlagStructError::InvalidValue`] when a value does not parse as its
    ///   flag's kind.
    pub fn try_parse_from<I, T>(self, args: I) -> FlagStructResult<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let Self { command, bindings } = self;
        let matches = command.try_get_matches_from(args)?;

        for Binding { name, mut target } in bindings {
            if matches.value_source(&name) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(text) = matches.try_get_one::<String>(&name)? else {
                continue;
            };
            if let Err(source) = target.set(text) {
                return Err(FlagStructError::InvalidValue {
                    name,
                    text: text.clone(),
                    source,
                });
            }
            debug!(flag = %name, value = %text, "set from command line");
        }

        Ok(matches
            .try_get_many::<String>(REMAINING_ID)?
            .map(|values| values.cloned().collect())
            .unwrap_or_default())
    }

    /// Parses the process arguments, skipping the program name.
    ///
    /// # Errors
    ///
    /// See [`ClapFlags::try_parse_from`].
    pub fn try_parse(self) -> FlagStructResult<Vec<String>> {
        self.try_parse_from(std::env::args_os().skip(1))
    }

    fn contains(&self, name: &str) -> bool {
        self.command
            .get_arguments()
            .any(|arg| arg.get_id().as_str() == name || arg.get_long() == Some(name))
    }

    fn bind(
        &mut self,
        target: Target<'a>,
        name: &str,
        initial: String,
        help: &str,
    ) -> Result<(), FlagSetError> {
        if name.is_empty()
            || name.starts_with('-')
            || name.contains(|c: char| c == '=' || c.is_whitespace())
        {
            return Err(FlagSetError::InvalidName {
                name: name.to_owned(),
            });
        }
        if self.contains(name) {
            return Err(FlagSetError::DuplicateName {
                name: name.to_owned(),
            });
        }

        let value_name = target
            .kind()
            .map_or("VALUE", |kind| kind.name())
            .to_ascii_uppercase();
        let mut arg = Arg::new(name.to_owned())
            .long(name.to_owned())
            .help(help.to_owned())
            .value_name(value_name)
            .action(ArgAction::Set);
        if matches!(target, Target::Bool(_)) {
            arg = arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true");
        } else {
            // The next argument is always the value, even `-5` or `-x`.
            arg = arg.allow_hyphen_values(true);
        }
        if !initial.is_empty() {
            arg = arg.default_value(initial);
        }

        let command = std::mem::take(&mut self.command);
        self.command = command.arg(arg);
        self.bindings.push(Binding {
            name: name.to_owned(),
            target,
        });
        Ok(())
    }
}

impl<'a> FlagSet<'a> for ClapFlags<'a> {
    fn declare_bool(
        &mut self,
        target: &'a mut bool,
        name: &str,
        initial: bool,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::Bool(target), name, initial.to_string(), help)
    }

    fn declare_int(
        &mut self,
        target: &'a mut i32,
        name: &str,
        initial: i32,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::Int(target), name, initial.to_string(), help)
    }

    fn declare_int64(
        &mut self,
        target: &'a mut i64,
        name: &str,
        initial: i64,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::Int64(target), name, initial.to_string(), help)
    }

    fn declare_uint(
        &mut self,
        target: &'a mut u32,
        name: &str,
        initial: u32,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::Uint(target), name, initial.to_string(), help)
    }

    fn declare_uint64(
        &mut self,
        target: &'a mut u64,
        name: &str,
        initial: u64,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::Uint64(target), name, initial.to_string(), help)
    }

    fn declare_float64(
        &mut self,
        target: &'a mut f64,
        name: &str,
        initial: f64,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::Float64(target), name, initial.to_string(), help)
    }

    fn declare_duration(
        &mut self,
        target: &'a mut Duration,
        name: &str,
        initial: Duration,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::Duration(target), name, render_duration(initial), help)
    }

    fn declare_string(
        &mut self,
        target: &'a mut String,
        name: &str,
        initial: &str,
        help: &str,
    ) -> Result<(), FlagSetError> {
        self.bind(Target::String(target), name, initial.to_owned(), help)
    }

    fn declare_custom(
        &mut self,
        target: &'a mut dyn FlagValue,
        name: &str,
        help: &str,
    ) -> Result<(), FlagSetError> {
        let initial = target.render();
        self.bind(Target::Custom(target), name, initial, help)
    }
}
