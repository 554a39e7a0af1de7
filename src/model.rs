// Task definitions read from a Taskfile

use serde::Serialize;
use std::path::PathBuf;

/// A parsed Taskfile: where it lives and the callable tasks it declares,
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taskfile {
    pub path: PathBuf,
    pub tasks: Vec<TaskDefinition>,
}

/// One callable task.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TaskDefinition {
    /// Name passed to the task runner
    pub name: String,

    /// The task's `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The task's `summary`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Variables the task requires, in declared order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,

    /// Whether any command references `.CLI_ARGS`
    pub accepts_cli_args: bool,

    /// The task's `prompt` text, asked before it runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl TaskDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Text shown next to the task in the menu: `desc`, else the first
    /// line of `summary`.
    #[must_use]
    pub fn menu_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or_else(|| self.summary.as_deref().and_then(|s| s.lines().next()))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A variable the user is asked for before the task runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParameterSpec {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Allowed values (`enum` in the Taskfile). Empty means free-form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl ParameterSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Collected parameter values, keyed by name and kept in the order the
/// task declares them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.into_iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(entry_as_strs as fn(&'a (String, String)) -> (&'a str, &'a str))
    }
}

fn entry_as_strs((k, v): &(String, String)) -> (&str, &str) {
    (k.as_str(), v.as_str())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// What the user picked: a task plus everything needed to run it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub task: TaskDefinition,
    pub parameters: Parameters,
    pub cli_args: Vec<String>,
}
