use crate::tag::FieldTag;

/// One declared field of a record, with its tag already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Identifier as declared in the record type.
    pub ident: &'static str,
    /// Output name. `None` → field excluded by a `-` tag.
    pub name: Option<String>,
    /// Drop the field when its value is empty.
    pub omit_empty: bool,
}

impl FieldDescriptor {
    pub fn new(ident: &'static str, tag: &str) -> Self {
        let tag = FieldTag::parse(tag);
        Self {
            ident,
            name: tag.resolve(ident).map(str::to_owned),
            omit_empty: tag.omit_empty(),
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.name.is_none()
    }
}

/// Field list of a record type, in declaration order.
///
/// Position in `fields` is the index passed to `Record::field_value()`.
/// Built once per type; derived impls cache it in a `OnceLock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub record: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build from `(ident, raw tag)` pairs.
    pub fn new(record: &'static str, fields: &[(&'static str, &str)]) -> Self {
        Self {
            record,
            fields: fields
                .iter()
                .map(|&(ident, tag)| FieldDescriptor::new(ident, tag))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find a field by resolved name.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.name.as_deref() == Some(name))
    }

    /// Resolved names of all fields that can appear in output.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| f.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_tags_once() {
        let schema = Schema::new(
            "User",
            &[("Id", "id"), ("Name", ""), ("Secret", "-"), ("Friends", "friends,omitempty")],
        );

        assert_eq!(schema.len(), 4);
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["id", "Name", "friends"]);
        assert!(schema.fields[2].is_excluded());
        assert!(schema.fields[3].omit_empty);
        assert!(!schema.fields[0].omit_empty);
    }

    #[test]
    fn looks_up_by_resolved_name() {
        let schema = Schema::new("T", &[("A", "field_a"), ("B", "")]);

        assert_eq!(schema.field("field_a").map(|(i, _)| i), Some(0));
        assert_eq!(schema.field("B").map(|(i, f)| (i, f.ident)), Some((1, "B")));
        assert!(schema.field("A").is_none());
    }
}
