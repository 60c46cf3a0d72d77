// Mon Feb 09 2026 - Alex

use crate::output::reader::{CommandKind, EngineCommand};
use crate::symbol::Arity;
use std::collections::{BTreeMap, BTreeSet};

/// `end<X>` commands whose `<X>` is not an environment.
const ENVIRONMENT_BLOCKLIST: [&str; 5] = ["csname", "group", "input", "linechar", "write"];

/// Name-keyed view of one snapshot for completion lookups.
#[derive(Debug, Clone, Default)]
pub struct CommandIndex {
    commands: BTreeMap<String, EngineCommand>,
    environments: BTreeSet<String>,
}

impl CommandIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands<I>(commands: I) -> Self
    where
        I: IntoIterator<Item = EngineCommand>,
    {
        let mut index = Self::new();
        index.update(commands);
        index
    }

    /// Replaces the index contents with a fresh snapshot.
    pub fn update<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = EngineCommand>,
    {
        self.commands = commands
            .into_iter()
            .map(|command| (command.name.clone(), command))
            .collect();
        self.merge_robust_arity();
        self.environments = self.detect_environments();
    }

    // A robust command `\foo` is a zero-argument wrapper around `\foo ` (with
    // a trailing space), which carries the real argument count.
    fn merge_robust_arity(&mut self) {
        let inner_counts: Vec<(String, u8)> = self
            .commands
            .iter()
            .filter_map(|(name, command)| match command.arity {
                Arity::Count(n) if n > 0 && name.ends_with(' ') => {
                    Some((name.trim_end().to_string(), n))
                }
                _ => None,
            })
            .collect();

        for (base, count) in inner_counts {
            if let Some(command) = self.commands.get_mut(&base) {
                if command.arity.count().unwrap_or(0) == 0 {
                    command.arity = Arity::Count(count);
                }
            }
        }
    }

    fn detect_environments(&self) -> BTreeSet<String> {
        self.commands
            .keys()
            .filter_map(|name| name.strip_prefix("end"))
            .filter(|base| !base.is_empty())
            .filter(|base| !ENVIRONMENT_BLOCKLIST.contains(base))
            .filter(|base| self.commands.contains_key(*base))
            .map(str::to_string)
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&EngineCommand> {
        self.commands.get(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = &EngineCommand> {
        self.commands.values()
    }

    pub fn macros(&self) -> impl Iterator<Item = &EngineCommand> {
        self.commands
            .values()
            .filter(|command| command.kind == CommandKind::Macro)
    }

    pub fn environments(&self) -> &BTreeSet<String> {
        &self.environments
    }

    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a EngineCommand> + 'a {
        self.commands
            .range(prefix.to_string()..)
            .take_while(move |(name, _)| name.starts_with(prefix))
            .map(|(_, command)| command)
    }
}
