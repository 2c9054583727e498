//! Dispatch targets: invokable commands and named lookup tables.
//!
//! A [`Target`] is either a [`Command`] (signature plus body) or a [`Table`]
//! of named values. Tables are turned into a single-parameter selector
//! command at the dispatch boundary so the dispatcher only ever sees commands.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::convert::CallArguments;
use crate::error::Result;
use crate::signature::{Annotation, Parameter, Signature};
use crate::value::Value;

type Body = dyn Fn(CallArguments) -> Result<Value> + Send + Sync;

/// A signature paired with the function it describes.
#[derive(Clone)]
pub struct Command {
    signature: Arc<Signature>,
    body: Arc<Body>,
}

impl Command {
    /// Creates a command from its signature and body.
    pub fn new<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(CallArguments) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            signature: Arc::new(signature),
            body: Arc::new(body),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Calls the body with already-converted arguments.
    pub fn invoke(&self, args: CallArguments) -> Result<Value> {
        (self.body)(args)
    }

    fn same_as(&self, other: &Command) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// An ordered table of named values that can act as a subcommand selector.
#[derive(Debug, Clone, Default)]
pub struct Table {
    name: Option<String>,
    doc: Option<String>,
    subset: Option<Vec<String>>,
    entries: Vec<(String, Value)>,
}

impl Table {
    /// Creates an empty table with an optional display name.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            ..Self::default()
        }
    }

    /// Adds (or replaces) a named entry.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Sets the doc string shown as the selector's description.
    pub fn doc(self, doc: impl Into<String>) -> Self {
        Self {
            doc: Some(doc.into()),
            ..self
        }
    }

    /// Restricts the selectable keys to this subset (an exported-names list).
    pub fn subset<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subset: Some(keys.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the keys the selector accepts.
    ///
    /// Without an explicit subset, every entry holding a dispatch target is selectable.
    pub fn selectable(&self) -> Vec<String> {
        match &self.subset {
            Some(keys) => keys.clone(),
            None => self
                .entries
                .iter()
                .filter(|(_, v)| matches!(v, Value::Target(_)))
                .map(|(k, _)| k.clone())
                .collect(),
        }
    }

    /// Builds the selector command for this table.
    ///
    /// The command has a single `selection` parameter whose choices are the
    /// selectable keys. It returns the selected entry, or [`Value::None`] for a
    /// key outside the selectable set.
    pub fn dispatcher(self: Arc<Self>, name: Option<&str>) -> Command {
        let valid = self.selectable();
        let name = name
            .or(self.name.as_deref())
            .unwrap_or("dispatch")
            .to_string();
        let mut signature = Signature::new(name)
            .param(Parameter::positional("selection").annotated(Annotation::Choices(valid.clone())));
        if let Some(doc) = &self.doc {
            signature = signature.doc(doc.clone());
        }

        let table = self;
        Command::new(signature, move |args| {
            let selection = args.positional.first().cloned().unwrap_or_default();
            let key = selection.as_str()?;
            if !valid.iter().any(|k| k == key) {
                warn!(selection = key, "Selection is not a dispatchable entry");
                return Ok(Value::None);
            }
            Ok(table.get(key).cloned().unwrap_or_default())
        })
    }
}

/// Anything the recursive dispatcher can drive.
#[derive(Debug, Clone)]
pub enum Target {
    Command(Command),
    Table(Arc<Table>),
}

impl Target {
    /// Adapts the target into a command, wrapping tables as selectors.
    pub fn into_command(self, name: Option<&str>) -> Command {
        match self {
            Self::Command(command) => command,
            Self::Table(table) => table.dispatcher(name),
        }
    }

    /// Returns a name suitable for display.
    pub fn display_name(&self) -> String {
        match self {
            Self::Command(command) => command.name().to_string(),
            Self::Table(table) => table.name().unwrap_or("table").to_string(),
        }
    }

    pub(crate) fn same_as(&self, other: &Target) -> bool {
        match (self, other) {
            (Self::Command(a), Self::Command(b)) => a.same_as(b),
            (Self::Table(a), Self::Table(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Command> for Target {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

impl From<Table> for Target {
    fn from(table: Table) -> Self {
        Self::Table(Arc::new(table))
    }
}

impl From<Arc<Table>> for Target {
    fn from(table: Arc<Table>) -> Self {
        Self::Table(table)
    }
}
