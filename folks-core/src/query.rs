use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date range restricting which records are listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    Name,
    Age,
    CreatedAt,
}

impl OrderField {
    /// Field name understood by the `ordering` query parameter
    pub fn wire_name(&self) -> &'static str {
        match self {
            OrderField::Name => "person_name",
            OrderField::Age => "age",
            OrderField::CreatedAt => "created_date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderField::Name => "Name",
            OrderField::Age => "Age",
            OrderField::CreatedAt => "Created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Ascending => "↑",
            Direction::Descending => "↓",
        }
    }
}

/// Sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
    pub field: OrderField,
    pub direction: Direction,
}

impl Default for OrderSpec {
    /// Newest records first
    fn default() -> Self {
        Self {
            field: OrderField::CreatedAt,
            direction: Direction::Descending,
        }
    }
}

impl OrderSpec {
    pub fn new(field: OrderField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Sorting by the current field flips the direction; any other field
    /// starts ascending.
    pub fn toggled(self, field: OrderField) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: Direction::Ascending,
            }
        }
    }

    /// Value for the `ordering` query parameter (`age`, `-age`, ...)
    pub fn ordering_param(&self) -> String {
        match self.direction {
            Direction::Ascending => self.field.wire_name().to_string(),
            Direction::Descending => format!("-{}", self.field.wire_name()),
        }
    }
}

/// Filter and order together; the parameters a first-page request carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub filter: FilterSpec,
    pub order: OrderSpec,
}

impl QueryParams {
    pub fn with_filter(self, filter: FilterSpec) -> Self {
        Self { filter, ..self }
    }

    pub fn with_order(self, field: OrderField) -> Self {
        Self {
            order: self.order.toggled(field),
            ..self
        }
    }

    /// Query string pairs in the order the list endpoint documents them.
    /// Absent date bounds are sent as empty values.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let date = |d: Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        vec![
            ("start_date", date(self.filter.start_date)),
            ("end_date", date(self.filter.end_date)),
            ("ordering", self.order.ordering_param()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_field_flips() {
        let order = OrderSpec::new(OrderField::Age, Direction::Ascending);
        assert_eq!(
            order.toggled(OrderField::Age),
            OrderSpec::new(OrderField::Age, Direction::Descending)
        );
        assert_eq!(
            order.toggled(OrderField::Age).toggled(OrderField::Age),
            order
        );
    }

    #[test]
    fn test_toggle_new_field_is_ascending() {
        let order = OrderSpec::new(OrderField::Age, Direction::Descending);
        assert_eq!(
            order.toggled(OrderField::Name),
            OrderSpec::new(OrderField::Name, Direction::Ascending)
        );
    }

    #[test]
    fn test_default_order_param() {
        assert_eq!(OrderSpec::default().ordering_param(), "-created_date");
        assert_eq!(
            OrderSpec::new(OrderField::Name, Direction::Ascending).ordering_param(),
            "person_name"
        );
    }

    #[test]
    fn test_query_pairs() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31);
        let params = QueryParams::default().with_filter(FilterSpec::new(start, None));
        assert_eq!(
            params.query_pairs(),
            vec![
                ("start_date", "2024-01-31".to_string()),
                ("end_date", String::new()),
                ("ordering", "-created_date".to_string()),
            ]
        );
    }
}
