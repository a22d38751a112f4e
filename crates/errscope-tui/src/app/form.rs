use chrono_tz::Tz;

use errscope_logs::{LogQuery, QueryParams};

/// Field of the filter form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Search,
    ErrorType,
    StartDate,
    EndDate,
}

impl FormField {
    pub const ALL: [FormField; 4] = [Self::Search, Self::ErrorType, Self::StartDate, Self::EndDate];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::ErrorType => "Type",
            Self::StartDate => "From",
            Self::EndDate => "To",
        }
    }

    /// Input hint shown when the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Search => "keyword",
            Self::ErrorType => "any",
            Self::StartDate | Self::EndDate => "YYYY-MM-DD",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Search => Self::ErrorType,
            Self::ErrorType => Self::StartDate,
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::Search,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Search => Self::EndDate,
            Self::ErrorType => Self::Search,
            Self::StartDate => Self::ErrorType,
            Self::EndDate => Self::StartDate,
        }
    }
}

/// Editable text for the four filter inputs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub search: String,
    pub error_type: String,
    pub start_date: String,
    pub end_date: String,
    pub focus: FormField,
}

impl FilterForm {
    /// Populate the form from an applied query
    pub fn from_query(query: &LogQuery, tz: Tz) -> Self {
        let params = QueryParams::from_query_string(&query.to_query_string(tz));
        Self {
            search: params.search.unwrap_or_default(),
            error_type: params.error_type.unwrap_or_default(),
            start_date: params.start_date.unwrap_or_default(),
            end_date: params.end_date.unwrap_or_default(),
            focus: FormField::default(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Search => &self.search,
            FormField::ErrorType => &self.error_type,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Search => &mut self.search,
            FormField::ErrorType => &mut self.error_type,
            FormField::StartDate => &mut self.start_date,
            FormField::EndDate => &mut self.end_date,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.value_mut(self.focus).push(c);
    }

    pub fn backspace(&mut self) {
        self.value_mut(self.focus).pop();
    }

    pub fn clear_field(&mut self) {
        self.value_mut(self.focus).clear();
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Form contents as query parameters for the first page
    ///
    /// Text is passed through as typed; only an empty field is absent.
    pub fn to_params(&self) -> QueryParams {
        let text = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        QueryParams {
            search: text(&self.search),
            error_type: text(&self.error_type),
            start_date: text(&self.start_date),
            end_date: text(&self.end_date),
            page: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_follows_focus() {
        let mut form = FilterForm::default();
        for c in "memory".chars() {
            form.input_char(c);
        }
        form.next_field();
        form.input_char('x');
        form.backspace();
        form.next_field();
        for c in "2024-11-10".chars() {
            form.input_char(c);
        }

        assert_eq!(form.search, "memory");
        assert_eq!(form.error_type, "");
        assert_eq!(form.start_date, "2024-11-10");
        assert_eq!(form.focus, FormField::StartDate);

        form.prev_field();
        form.prev_field();
        form.clear_field();
        assert_eq!(form.search, "");
    }

    #[test]
    fn test_round_trip_through_query() {
        let form = FilterForm {
            search: " undefined ".to_string(),
            error_type: "Warning".to_string(),
            start_date: "2024-11-01".to_string(),
            end_date: String::new(),
            focus: FormField::EndDate,
        };
        let query = form.to_params().into_query(50, Tz::UTC).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.criteria.keyword(), Some(" undefined "));

        let restored = FilterForm::from_query(&query, Tz::UTC);
        assert_eq!(restored.search, " undefined ");
        assert_eq!(restored.error_type, "Warning");
        assert_eq!(restored.start_date, "2024-11-01");
        assert_eq!(restored.end_date, "");
        assert_eq!(restored.focus, FormField::Search);
    }

    #[test]
    fn test_keyword_matches_query_string() {
        let form = FilterForm {
            search: " in ".to_string(),
            ..FilterForm::default()
        };
        let from_form = form.to_params().into_query(50, Tz::UTC).unwrap();
        let from_qs = QueryParams::from_query_string("search=+in+").into_query(50, Tz::UTC).unwrap();
        assert_eq!(from_form.criteria.keyword(), Some(" in "));
        assert_eq!(from_form.criteria, from_qs.criteria);
    }
}
