//! Schema-switch command resolution.
//!
//! Every tenant lives in its own database schema. Before running
//! tenant-scoped queries, the persistence layer executes the command
//! produced here against the active connection. The resolver itself is
//! pure: it picks a template once at construction and has no failure
//! path, unknown dialects degrade to the generic default.

use std::collections::HashMap;

/// Substitution point for the tenant's schema name. Each template
/// contains exactly one occurrence.
pub const SCHEMA_PLACEHOLDER: &str = "{schema}";

const DEFAULT_COMMAND: &str = "USE {schema}";
const POSTGRESQL_COMMAND: &str = "SET SCHEMA '{schema}'";

/// Maps a database dialect to the statement template that switches the
/// active schema for a tenant.
#[derive(Debug, Clone)]
pub struct SchemaChangeResolver {
    command: &'static str,
}

impl SchemaChangeResolver {
    /// Build the resolver for the configured dialect (e.g.
    /// `"POSTGRESQL"`, `"H2"`). Unknown or unspecified dialects get
    /// the generic default template.
    pub fn new(dialect: Option<&str>) -> Self {
        let commands: HashMap<&str, &'static str> = [
            ("POSTGRESQL", POSTGRESQL_COMMAND),
            ("H2", DEFAULT_COMMAND),
        ]
        .into_iter()
        .collect();

        let command = match dialect {
            Some(d) => match commands.get(d) {
                Some(cmd) => *cmd,
                None => {
                    tracing::debug!(dialect = d, "unknown dialect, using default schema switch command");
                    DEFAULT_COMMAND
                }
            },
            None => DEFAULT_COMMAND,
        };

        Self { command }
    }

    /// The schema-switch template for the configured dialect, with one
    /// [`SCHEMA_PLACEHOLDER`] substitution point.
    pub fn schema_switch_command(&self) -> &'static str {
        self.command
    }

    /// The template with `schema` substituted in, ready to execute.
    pub fn command_for(&self, schema: &str) -> String {
        self.command.replace(SCHEMA_PLACEHOLDER, schema)
    }
}

impl Default for SchemaChangeResolver {
    fn default() -> Self {
        Self::new(None)
    }
}
