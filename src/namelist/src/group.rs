// astrars-namelist/src/group.rs

//! Ordered namelist groups and their rendering.

use crate::error::{Result, SchemaError};
use crate::value::NmlValue;
use std::fmt;

/// A single namelist group: an ordered list of `key = value` entries
/// rendered between `&NAME` and `/`.
///
/// Entries keep insertion order, which is the declaration order of the
/// originating field model. The group is render-only; there is no lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NamelistGroup {
    name: &'static str,
    entries: Vec<(String, NmlValue)>,
}

impl NamelistGroup {
    /// Create a new empty group.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// The group name as it appears after `&`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Append an entry.
    pub fn push<V: Into<NmlValue>>(&mut self, name: impl Into<String>, value: V) -> &mut Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    /// Append an entry for an indexed module instance; the key gets the
    /// `(id)` suffix.
    pub fn push_indexed<V: Into<NmlValue>>(
        &mut self,
        name: &str,
        id: u32,
        value: V,
    ) -> &mut Self {
        self.entries.push((format!("{}({})", name, id), value.into()));
        self
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[(String, NmlValue)] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the group has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the group to its textual form.
    ///
    /// Every value is checked before any text is emitted; an unrenderable
    /// value fails the whole group rather than producing corrupt output.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        out.push('&');
        out.push_str(self.name);
        out.push('\n');
        for (name, value) in &self.entries {
            value
                .check_renderable()
                .map_err(|reason| SchemaError::UnrenderableValue {
                    field: name.clone(),
                    reason,
                })?;
            out.push_str("    ");
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&value.to_namelist_string());
            out.push('\n');
        }
        out.push('/');
        Ok(out)
    }
}

impl fmt::Display for NamelistGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "<unrenderable group &{}>", self.name),
        }
    }
}

/// Render a sequence of groups as one document: groups separated by a blank
/// line, with a trailing newline.
pub fn render_document(groups: &[NamelistGroup]) -> Result<String> {
    let mut parts = Vec::with_capacity(groups.len());
    for group in groups {
        parts.push(group.render()?);
    }
    Ok(format!("{}\n", parts.join("\n\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_delimiters_and_one_line_per_entry() {
        let mut group = NamelistGroup::new("INPUT");
        group.push("IPart", 100i64);
        group.push("Species", "electrons");
        group.push("Q_total", 1.0);

        let text = group.render().unwrap();
        assert!(text.starts_with("&INPUT\n"));
        assert!(text.ends_with("/"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("    IPart = 100\n"));
        assert!(text.contains("    Species = 'electrons'\n"));
        assert!(text.contains("    Q_total = 1.0\n"));
    }

    #[test]
    fn indexed_entries_get_the_id_suffix() {
        let mut group = NamelistGroup::new("CAVITY");
        group.push("LEfield", true);
        group.push_indexed("Nue", 1, 1.3);
        group.push_indexed("File_Efield", 1, "C1_E.dat");

        let text = group.render().unwrap();
        assert!(text.contains("    LEfield = true\n"));
        assert!(text.contains("    Nue(1) = 1.3\n"));
        assert!(text.contains("    File_Efield(1) = 'C1_E.dat'\n"));
    }

    #[test]
    fn unrenderable_value_fails_naming_the_entry() {
        let mut group = NamelistGroup::new("NEWRUN");
        group.push("Head", "it's a run");
        assert_eq!(
            group.render(),
            Err(SchemaError::UnrenderableValue {
                field: "Head".to_string(),
                reason: "value contains a quote character",
            })
        );
    }

    #[test]
    fn documents_join_groups_with_a_blank_line() {
        let mut a = NamelistGroup::new("NEWRUN");
        a.push("RUN", 1i64);
        let mut b = NamelistGroup::new("OUTPUT");
        b.push("ZSTART", 0.0);

        let text = render_document(&[a, b]).unwrap();
        assert_eq!(text, "&NEWRUN\n    RUN = 1\n/\n\n&OUTPUT\n    ZSTART = 0.0\n/\n");
    }
}
