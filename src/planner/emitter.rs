//! Move-statement emitter.
//!
//! Renders validated moves as `terraform state mv` commands. Nothing is
//! executed here.

use std::fmt;

use crate::resource::ResourceAddress;

use super::validator::MovePair;

/// Command prefix of every rendered statement.
pub const STATE_MV_COMMAND: &str = "terraform state mv";

/// A single state relocation instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveStatement {
    /// Address the state is currently tracked at.
    pub source: ResourceAddress,
    /// Address the state should be tracked at.
    pub destination: ResourceAddress,
}

/// Converts validated moves into statements, preserving order.
#[must_use]
pub fn emit(pairs: &[MovePair]) -> Vec<MoveStatement> {
    pairs.iter().cloned().map(MoveStatement::from).collect()
}

impl MoveStatement {
    /// Renders the command with both addresses shell-quoted where needed.
    ///
    /// Addresses with `for_each` keys contain quotes and brackets that a
    /// POSIX shell would otherwise interpret.
    #[must_use]
    pub fn render_quoted(&self) -> String {
        format!(
            "{STATE_MV_COMMAND} {} {}",
            shell_quote(self.source.as_str()),
            shell_quote(self.destination.as_str())
        )
    }

    /// Renders the command, quoted or not.
    #[must_use]
    pub fn render(&self, quote: bool) -> String {
        if quote {
            self.render_quoted()
        } else {
            self.to_string()
        }
    }
}

fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '='));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

impl From<MovePair> for MoveStatement {
    fn from(pair: MovePair) -> Self {
        Self {
            source: pair.source,
            destination: pair.destination,
        }
    }
}

impl fmt::Display for MoveStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STATE_MV_COMMAND} {} {}", self.source, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(source: &str, destination: &str) -> MovePair {
        MovePair {
            source: ResourceAddress::parse(source).unwrap(),
            destination: ResourceAddress::parse(destination).unwrap(),
        }
    }

    #[test]
    fn test_emit_renders_source_then_destination() {
        let statements = emit(&[pair("aws_instance.old", "aws_instance.new")]);
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].to_string(),
            "terraform state mv aws_instance.old aws_instance.new"
        );
    }

    #[test]
    fn test_emit_preserves_order() {
        let pairs = [
            pair("b.old", "b.new"),
            pair("a.old", "a.new"),
            pair("c.old", "c.new"),
        ];
        let rendered: Vec<_> = emit(&pairs).iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "terraform state mv b.old b.new",
                "terraform state mv a.old a.new",
                "terraform state mv c.old c.new",
            ]
        );
    }

    #[test]
    fn test_render_quoted() {
        let statement = MoveStatement::from(pair(
            r#"aws_instance.web["it's"]"#,
            "module.app.aws_instance.web[0]",
        ));
        assert_eq!(
            statement.render(true),
            r#"terraform state mv 'aws_instance.web["it'\''s"]' 'module.app.aws_instance.web[0]'"#
        );
        assert_eq!(
            statement.render(false),
            r#"terraform state mv aws_instance.web["it's"] module.app.aws_instance.web[0]"#
        );
    }

    #[test]
    fn test_plain_addresses_are_not_quoted() {
        let statement = MoveStatement::from(pair("aws_instance.old", "module.x.aws_instance.new"));
        assert_eq!(statement.render_quoted(), statement.to_string());
    }
}
