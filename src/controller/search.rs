use crate::model::{Query, ResourceKind, SIZE_PARAM, SORT_PARAM};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub name: &'static str,
    pub value: String,
    /// `Some` for a select box; the empty string is always the first choice.
    pub options: Option<Vec<&'static str>>,
}

/// Editable search form of one list page.
#[derive(Clone, Debug)]
pub struct SearchForm {
    pub fields: Vec<FormField>,
    pub focused: usize,
}

fn label_for(name: &str) -> String {
    let mut label = String::new();
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}

impl SearchForm {
    /// Builds the form for `kind`, pre-filled from `query`.
    pub fn new(kind: ResourceKind, query: &Query) -> Self {
        let mut fields: Vec<FormField> = kind
            .filter_fields()
            .iter()
            .map(|&name| FormField {
                label: label_for(name),
                name,
                value: query.get(name).unwrap_or_default().to_string(),
                options: None,
            })
            .collect();

        let mut options = vec![""];
        options.extend_from_slice(kind.sort_fields());
        fields.push(FormField {
            label: "Sort By".to_string(),
            name: SORT_PARAM,
            value: query.sort().unwrap_or_default().to_string(),
            options: Some(options),
        });

        Self { fields, focused: 0 }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Types into a text field. Select boxes ignore typing.
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            if field.options.is_none() {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            if field.options.is_none() {
                field.value.pop();
            }
        }
    }

    /// Moves a select box to the next (`forward`) or previous option.
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focused) else { return };
        let Some(options) = &field.options else { return };
        let pos = options.iter().position(|o| *o == field.value).unwrap_or(0);
        let next = if forward {
            (pos + 1) % options.len()
        } else {
            (pos + options.len() - 1) % options.len()
        };
        field.value = options[next].to_string();
    }

    /// Query submitted by this form. Paging restarts; `size` is carried over.
    pub fn to_query(&self, size: Option<u32>) -> Query {
        let mut q = Query::new();
        for field in &self.fields {
            q.set(field.name, field.value.trim());
        }
        if let Some(size) = size {
            q.set(SIZE_PARAM, size.to_string());
        }
        q
    }
}
