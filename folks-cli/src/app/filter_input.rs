use chrono::NaiveDate;
use folks_core::FilterSpec;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Length of `YYYY-MM-DD`
const DATE_FORMAT_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Start,
    End,
}

/// Text buffers behind the date filter prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub start: String,
    pub end: String,
    pub focus: FilterField,
}

impl FilterInput {
    /// Prefill from the filter currently applied
    pub fn from_filter(filter: &FilterSpec) -> Self {
        let show = |d: Option<NaiveDate>| d.map(|d| d.format(DATE_FORMAT).to_string());
        Self {
            start: show(filter.start_date).unwrap_or_default(),
            end: show(filter.end_date).unwrap_or_default(),
            focus: FilterField::Start,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FilterField::Start => &mut self.start,
            FilterField::End => &mut self.end,
        }
    }

    /// Only digits and dashes are accepted
    pub fn push(&mut self, c: char) {
        let field = self.focused_mut();
        if (c.is_ascii_digit() || c == '-') && field.len() < DATE_FORMAT_LEN {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn clear_field(&mut self) {
        self.focused_mut().clear();
    }

    pub fn switch_field(&mut self) {
        self.focus = match self.focus {
            FilterField::Start => FilterField::End,
            FilterField::End => FilterField::Start,
        };
    }

    /// Empty fields mean "no bound"
    pub fn parse(&self) -> Result<FilterSpec, String> {
        Ok(FilterSpec::new(
            parse_date("start", &self.start)?,
            parse_date("end", &self.end)?,
        ))
    }
}

fn parse_date(label: &str, text: &str) -> Result<Option<NaiveDate>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("Invalid {} date '{}', expected YYYY-MM-DD", label, text))
}
