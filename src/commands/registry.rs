//! Command registry for the command palette and help overlay.
//!
//! Provides command definitions, alias resolution, category grouping,
//! sub-command lookup and ranked fuzzy search. The registry is built once at
//! startup and is read-only afterwards.

use std::collections::HashMap;

use thiserror::Error;

use super::matching::{best_score, MatchTier};

/// Categories for organizing commands, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandCategory {
    /// Switching between resource views.
    Navigation,
    /// Actions on email messages.
    Messages,
    /// Calendar and event management.
    Calendar,
    /// Contact management.
    Contacts,
    /// Webhook management.
    Webhooks,
    /// Mail folders.
    Folders,
    /// Vim-style commands (quit, help, jumps).
    Vim,
    /// Application-level commands.
    System,
}

impl CommandCategory {
    /// All categories in display order.
    pub const ALL: [CommandCategory; 8] = [
        Self::Navigation,
        Self::Messages,
        Self::Calendar,
        Self::Contacts,
        Self::Webhooks,
        Self::Folders,
        Self::Vim,
        Self::System,
    ];

    /// Get the display name for this category.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Messages => "Messages",
            Self::Calendar => "Calendar",
            Self::Contacts => "Contacts",
            Self::Webhooks => "Webhooks",
            Self::Folders => "Folders",
            Self::Vim => "Vim Commands",
            Self::System => "System",
        }
    }
}

/// A command that can be executed from the palette or the help overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Primary command name (e.g. "messages").
    pub name: String,
    /// Short alternate names (e.g. "m", "msg").
    pub aliases: Vec<String>,
    /// Human-readable description.
    pub description: String,
    /// Category for grouping.
    pub category: CommandCategory,
    /// Direct key shortcut, for display only.
    pub shortcut: Option<String>,
    /// Child commands, e.g. `folder list`. Children never have children.
    pub sub_commands: Vec<Command>,
    /// View this command is meant for. Not enforced by the registry.
    pub context_view: Option<String>,
}

impl Command {
    /// Create a command with no aliases, shortcut or children.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: CommandCategory,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: description.into(),
            category,
            shortcut: None,
            sub_commands: Vec::new(),
            context_view: None,
        }
    }

    /// Create a sub-command. Its category is taken from the parent when the
    /// parent is registered.
    pub fn sub(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, CommandCategory::System)
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Set the display shortcut.
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Restrict the command to a view (informational).
    pub fn with_context_view(mut self, view: impl Into<String>) -> Self {
        self.context_view = Some(view.into());
        self
    }

    /// Append a sub-command.
    pub fn with_sub_command(mut self, sub: Command) -> Self {
        self.sub_commands.push(sub);
        self
    }

    /// All names including aliases, primary name first.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Aliases formatted for display.
    pub fn display_aliases(&self) -> String {
        self.aliases.join(", ")
    }

    /// Whether this command has children.
    pub fn has_sub_commands(&self) -> bool {
        !self.sub_commands.is_empty()
    }

    /// Best tier of `query` against the name and every alias.
    fn score(&self, query: &str) -> Option<MatchTier> {
        best_score(self.all_names(), query)
    }
}

/// A resolved registry entry: a top-level command, or a child together with
/// its parent.
#[derive(Debug, Clone, Copy)]
pub struct CommandRef<'a> {
    /// The matched command node.
    pub command: &'a Command,
    /// The parent when `command` is a sub-command.
    pub parent: Option<&'a Command>,
}

impl CommandRef<'_> {
    /// Full command name, e.g. "folder list" for a sub-command.
    pub fn full_name(&self) -> String {
        match self.parent {
            Some(parent) => format!("{} {}", parent.name, self.command.name),
            None => self.command.name.clone(),
        }
    }

    /// Whether this entry is a sub-command.
    pub fn is_sub_command(&self) -> bool {
        self.parent.is_some()
    }
}

/// A category and its commands, in registration order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: CommandCategory,
    pub commands: Vec<&'a Command>,
}

/// Errors raised while building the registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A command or alias was empty.
    #[error("command name cannot be empty")]
    EmptyName,

    /// A command or alias contained whitespace.
    #[error("command name '{0}' cannot contain whitespace")]
    InvalidName(String),

    /// A name or alias was registered twice.
    #[error("'{name}' is already registered for '{existing}'")]
    Duplicate { name: String, existing: String },

    /// A sub-command declared its own sub-commands.
    #[error("sub-command '{parent} {child}' cannot have sub-commands")]
    NestedSubCommand { parent: String, child: String },
}

/// Registry of all commands with lookup and search.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    /// Top-level commands in registration order.
    commands: Vec<Command>,
    /// Normalized name or alias -> index into `commands`.
    by_name: HashMap<String, usize>,
    /// Per command: normalized child name or alias -> child index.
    children: Vec<HashMap<String, usize>>,
    /// Category -> indices into `commands`, in registration order.
    by_category: HashMap<CommandCategory, Vec<usize>>,
}

/// Trim and lowercase a lookup key.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Check a single name or alias and return its lookup key.
fn validated_key(name: &str) -> Result<String, RegistryError> {
    let key = normalize(name);
    if key.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    if key.contains(char::is_whitespace) {
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    Ok(key)
}

/// Build a name index for a set of sibling commands, rejecting collisions
/// against `existing` (for top-level) or among the siblings themselves.
fn index_names(
    cmd: &Command,
    display: impl Fn(&Command) -> String,
    taken: &dyn Fn(&str) -> Option<String>,
) -> Result<Vec<String>, RegistryError> {
    let mut keys: Vec<String> = Vec::with_capacity(cmd.aliases.len() + 1);
    for name in cmd.all_names() {
        let key = validated_key(name)?;
        if let Some(existing) = taken(&key) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
                existing,
            });
        }
        if keys.contains(&key) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
                existing: display(cmd),
            });
        }
        keys.push(key);
    }
    Ok(keys)
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in command table.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for cmd in super::definitions::default_commands() {
            registry.register(cmd)?;
        }
        Ok(registry)
    }

    /// Register a command and its sub-commands.
    ///
    /// Fails without modifying the registry if any name or alias collides
    /// with one already registered.
    pub fn register(&mut self, mut cmd: Command) -> Result<(), RegistryError> {
        let keys = index_names(&cmd, |c| c.name.clone(), &|key: &str| {
            self.by_name
                .get(key)
                .map(|&idx| self.commands[idx].name.clone())
        })?;

        let mut child_index: HashMap<String, usize> = HashMap::new();
        for (pos, child) in cmd.sub_commands.iter_mut().enumerate() {
            if child.has_sub_commands() {
                return Err(RegistryError::NestedSubCommand {
                    parent: cmd.name.clone(),
                    child: child.name.clone(),
                });
            }
            child.category = cmd.category;

            let parent_name = cmd.name.clone();
            let child_keys = index_names(
                child,
                |c| format!("{} {}", parent_name, c.name),
                &|key: &str| {
                    child_index
                        .get(key)
                        .map(|_| format!("{} {}", parent_name, key))
                },
            )?;
            for key in child_keys {
                child_index.insert(key, pos);
            }
        }

        let idx = self.commands.len();
        for key in keys {
            self.by_name.insert(key, idx);
        }
        self.by_category.entry(cmd.category).or_default().push(idx);
        self.children.push(child_index);
        self.commands.push(cmd);
        Ok(())
    }

    /// Look up a command by name or alias.
    ///
    /// `"parent child"` resolves a sub-command through its parent.
    pub fn get(&self, query: &str) -> Option<CommandRef<'_>> {
        let query = normalize(query);
        match query.split_once(char::is_whitespace) {
            None => {
                let idx = *self.by_name.get(&query)?;
                Some(CommandRef {
                    command: &self.commands[idx],
                    parent: None,
                })
            }
            Some((parent, child)) => {
                let idx = *self.by_name.get(parent)?;
                let pos = *self.children[idx].get(child.trim())?;
                let parent = &self.commands[idx];
                Some(CommandRef {
                    command: &parent.sub_commands[pos],
                    parent: Some(parent),
                })
            }
        }
    }

    /// All top-level commands sorted by name.
    pub fn get_all(&self) -> Vec<&Command> {
        let mut result: Vec<&Command> = self.commands.iter().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        result
    }

    /// Commands grouped by category in display order.
    pub fn by_category(&self) -> Vec<CategoryGroup<'_>> {
        CommandCategory::ALL
            .iter()
            .filter_map(|category| {
                let indices = self.by_category.get(category)?;
                Some(CategoryGroup {
                    category: *category,
                    commands: indices.iter().map(|&i| &self.commands[i]).collect(),
                })
            })
            .collect()
    }

    /// Search top-level commands.
    ///
    /// Results are sorted by match tier, then alphabetically. An empty query
    /// returns every top-level command.
    pub fn search(&self, query: &str) -> Vec<&Command> {
        let query = normalize(query);
        if query.is_empty() {
            return self.get_all();
        }

        let mut results: Vec<(MatchTier, &Command)> = self
            .commands
            .iter()
            .filter_map(|cmd| cmd.score(&query).map(|tier| (tier, cmd)))
            .collect();

        results.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(&b.1.name)));
        results.into_iter().map(|(_, cmd)| cmd).collect()
    }

    /// Resolve a parent command that has children.
    fn parent_index(&self, parent: &str) -> Option<usize> {
        self.by_name.get(&normalize(parent)).copied()
    }

    /// Direct children of `parent`, in declaration order.
    pub fn sub_commands(&self, parent: &str) -> Vec<&Command> {
        self.parent_index(parent)
            .map(|idx| self.commands[idx].sub_commands.iter().collect())
            .unwrap_or_default()
    }

    /// Search the children of `parent`.
    ///
    /// Ranked by match tier; ties keep declaration order. An empty query
    /// returns every child.
    pub fn search_sub_commands(&self, parent: &str, query: &str) -> Vec<&Command> {
        let query = normalize(query);
        let subs = self.sub_commands(parent);
        if query.is_empty() {
            return subs;
        }

        let mut results: Vec<(MatchTier, &Command)> = subs
            .into_iter()
            .filter_map(|cmd| cmd.score(&query).map(|tier| (tier, cmd)))
            .collect();
        results.sort_by_key(|(tier, _)| *tier);
        results.into_iter().map(|(_, cmd)| cmd).collect()
    }

    /// Whether `name` resolves to a command with sub-commands.
    pub fn has_sub_commands(&self, name: &str) -> bool {
        !self.sub_commands(name).is_empty()
    }

    /// All top-level commands in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of top-level commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CommandRegistry {
        CommandRegistry::with_defaults().expect("default command table is valid")
    }

    #[test]
    fn test_with_defaults() {
        let registry = registry();
        assert!(!registry.is_empty());
        assert!(!registry.by_category().is_empty());
    }

    #[test]
    fn test_get_by_name_and_alias() {
        let registry = registry();

        let cases = [
            ("messages", "messages"),
            ("m", "messages"),
            ("msg", "messages"),
            ("events", "events"),
            ("e", "events"),
            ("cal", "events"),
            ("  messages  ", "messages"),
            ("MESSAGES", "messages"),
        ];
        for (query, want) in cases {
            let found = registry.get(query).expect(query);
            assert_eq!(found.command.name, want, "query {query:?}");
            assert!(!found.is_sub_command());
        }

        assert!(registry.get("nonexistent").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_every_alias_resolves_to_same_entry() {
        let registry = registry();
        for cmd in registry.commands() {
            let by_name = registry.get(&cmd.name).unwrap();
            for alias in &cmd.aliases {
                let by_alias = registry.get(alias).unwrap();
                assert!(
                    std::ptr::eq(by_name.command, by_alias.command),
                    "alias {alias} of {}",
                    cmd.name
                );
            }
            for sub in &cmd.sub_commands {
                let full = format!("{} {}", cmd.name, sub.name);
                let by_name = registry.get(&full).unwrap();
                for alias in &sub.aliases {
                    let by_alias = registry.get(&format!("{} {}", cmd.name, alias)).unwrap();
                    assert!(std::ptr::eq(by_name.command, by_alias.command));
                }
            }
        }
    }

    #[test]
    fn test_get_sub_command() {
        let registry = registry();

        let found = registry.get("folder list").unwrap();
        assert_eq!(found.command.name, "list");
        assert_eq!(found.parent.map(|p| p.name.as_str()), Some("folder"));
        assert_eq!(found.full_name(), "folder list");

        let found = registry.get("folder ls").unwrap();
        assert_eq!(found.full_name(), "folder list");

        let found = registry.get("  Event   Create ").unwrap();
        assert_eq!(found.full_name(), "event new");

        assert!(registry.get("folder nope").is_none());
        assert!(registry.get("messages list").is_none());
    }

    #[test]
    fn test_sub_commands_inherit_category() {
        let registry = registry();
        let subs = registry.sub_commands("webhook");
        assert!(subs.iter().all(|s| s.category == CommandCategory::Webhooks));
    }

    #[test]
    fn test_get_all_is_sorted_top_level() {
        let registry = registry();
        let all = registry.get_all();
        assert_eq!(all.len(), registry.len());
        assert!(all.windows(2).all(|w| w[0].name <= w[1].name));
        assert!(all.iter().all(|c| !c.name.contains(' ')));
    }

    #[test]
    fn test_search_empty_matches_get_all() {
        let registry = registry();
        let names: Vec<_> = registry.search("").iter().map(|c| c.name.clone()).collect();
        let all: Vec<_> = registry.get_all().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, all);
    }

    #[test]
    fn test_search_ranks_by_tier() {
        let registry = registry();

        let cases = [
            ("messages", "messages"),
            ("m", "messages"),
            ("mes", "messages"),
            ("msg", "messages"),
            ("compose", "compose"),
            ("comp", "compose"),
        ];
        for (query, want) in cases {
            let results = registry.search(query);
            assert!(!results.is_empty(), "query {query}");
            assert_eq!(results[0].name, want, "query {query}");
        }
    }

    #[test]
    fn test_search_ties_sorted_by_name() {
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("zeta", "z", CommandCategory::System))
            .unwrap();
        registry
            .register(Command::new("alpha", "a", CommandCategory::System))
            .unwrap();
        registry
            .register(Command::new("beta", "b", CommandCategory::System).with_aliases(&["a2"]))
            .unwrap();

        let names: Vec<_> = registry.search("a").iter().map(|c| c.name.as_str()).collect();
        // alpha: prefix; beta: alias prefix "a2"; zeta: contains
        assert_eq!(names, vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_search_excludes_non_matches() {
        let registry = registry();
        assert!(registry.search("xyz123").is_empty());
    }

    #[test]
    fn test_search_never_returns_sub_commands() {
        let registry = registry();
        let results = registry.search("list");
        assert!(results.iter().all(|c| c.name != "list"));
    }

    #[test]
    fn test_sub_commands_of_folder() {
        let registry = registry();
        let names: Vec<_> = registry
            .sub_commands("folder")
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["list", "create", "delete"]);
    }

    #[test]
    fn test_sub_commands_of_leaf_is_empty() {
        let registry = registry();
        assert!(registry.sub_commands("messages").is_empty());
        assert!(registry.sub_commands("missing").is_empty());
        assert!(!registry.has_sub_commands("messages"));
        assert!(registry.has_sub_commands("folder"));
        assert!(registry.has_sub_commands(" FOLDER "));
    }

    #[test]
    fn test_search_sub_commands() {
        let registry = registry();

        let all = registry.search_sub_commands("webhook", "");
        assert_eq!(all.len(), 4);

        let results = registry.search_sub_commands("webhook", "del");
        assert_eq!(results[0].name, "delete");

        // Alias match: "create" is an alias of "new"
        let results = registry.search_sub_commands("event", "create");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "new");

        assert!(registry.search_sub_commands("event", "zzz").is_empty());
    }

    #[test]
    fn test_search_sub_commands_no_duplicates() {
        let registry = registry();
        // "del" matches both the name and the alias of "delete"
        let results = registry.search_sub_commands("folder", "del");
        let deletes = results.iter().filter(|c| c.name == "delete").count();
        assert_eq!(deletes, 1);
    }

    #[test]
    fn test_by_category_display_order() {
        let registry = registry();
        let groups = registry.by_category();
        let order: Vec<_> = groups.iter().map(|g| g.category).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        assert_eq!(groups[0].category, CommandCategory::Navigation);
        assert_eq!(groups[0].commands[0].name, "dashboard");
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("messages", "", CommandCategory::Navigation).with_aliases(&["m"]))
            .unwrap();

        let err = registry
            .register(Command::new("mail", "", CommandCategory::Navigation).with_aliases(&["M"]))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                name: "M".to_string(),
                existing: "messages".to_string(),
            }
        );

        // Failed registration leaves no trace
        assert_eq!(registry.len(), 1);
        assert!(registry.get("mail").is_none());
    }

    #[test]
    fn test_duplicate_within_command_rejected() {
        let mut registry = CommandRegistry::new();
        let err = registry
            .register(Command::new("star", "", CommandCategory::Messages).with_aliases(&["star"]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
    }

    #[test]
    fn test_duplicate_sub_command_rejected() {
        let mut registry = CommandRegistry::new();
        let cmd = Command::new("folder", "", CommandCategory::Folders)
            .with_sub_command(Command::sub("list", "").with_aliases(&["ls"]))
            .with_sub_command(Command::sub("lsd", "").with_aliases(&["ls"]));
        let err = registry.register(cmd).unwrap_err();
        assert_eq!(err.to_string(), "'ls' is already registered for 'folder ls'");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut registry = CommandRegistry::new();
        assert_eq!(
            registry.register(Command::new("", "", CommandCategory::System)),
            Err(RegistryError::EmptyName)
        );
        assert_eq!(
            registry.register(Command::new("two words", "", CommandCategory::System)),
            Err(RegistryError::InvalidName("two words".to_string()))
        );
    }

    #[test]
    fn test_nested_sub_commands_rejected() {
        let mut registry = CommandRegistry::new();
        let cmd = Command::new("a", "", CommandCategory::System).with_sub_command(
            Command::sub("b", "").with_sub_command(Command::sub("c", "")),
        );
        assert_eq!(
            registry.register(cmd),
            Err(RegistryError::NestedSubCommand {
                parent: "a".to_string(),
                child: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_command_helpers() {
        let cmd = Command::new("events", "Go to events", CommandCategory::Navigation)
            .with_aliases(&["e", "ev"]);
        assert_eq!(cmd.all_names().collect::<Vec<_>>(), vec!["events", "e", "ev"]);
        assert_eq!(cmd.display_aliases(), "e, ev");
        assert!(!cmd.has_sub_commands());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(CommandCategory::Navigation.display(), "Navigation");
        assert_eq!(CommandCategory::Vim.display(), "Vim Commands");
        assert_eq!(CommandCategory::System.display(), "System");
    }
}
