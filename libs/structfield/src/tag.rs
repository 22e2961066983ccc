/// Tag name marking a field as never serialized.
pub const SKIP: &str = "-";

/// Tag option dropping a field whose value is empty.
pub const OMIT_EMPTY: &str = "omitempty";

/// Parsed serialization tag of a single field: `name[,option...]`.
///
/// - `"id"` → name `id`, no options
/// - `"field_c,omitempty"` → name `field_c`, option `omitempty`
/// - `",omitempty"` → no name (the declared identifier is used), option `omitempty`
/// - `"-"` → field excluded
///
/// The name is trimmed; options are matched verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag<'a> {
    name: &'a str,
    options: &'a str,
}

impl<'a> FieldTag<'a> {
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(',') {
            Some((name, options)) => Self { name: name.trim(), options },
            None => Self { name: raw.trim(), options: "" },
        }
    }

    /// Candidate name as written in the tag (may be empty).
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn is_skip(&self) -> bool {
        self.name == SKIP
    }

    /// Resolved output name for a field declared as `ident`.
    ///
    /// `None` when the tag excludes the field.
    pub fn resolve<'b>(&self, ident: &'b str) -> Option<&'b str>
    where
        'a: 'b,
    {
        if self.is_skip() {
            None
        } else if self.name.is_empty() {
            Some(ident)
        } else {
            Some(self.name)
        }
    }

    pub fn options(&self) -> impl Iterator<Item = &'a str> + 'a {
        let options = self.options;
        (!options.is_empty())
            .then(|| options.split(','))
            .into_iter()
            .flatten()
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options().any(|o| o == option)
    }

    pub fn omit_empty(&self) -> bool {
        self.has_option(OMIT_EMPTY)
    }
}
