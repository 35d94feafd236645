use serde::Deserialize;

use crate::employees::ClockStatus;

/// SQL query builder for the employee overview listing
/// Builds a single parameterized query with filters, sorting, and pagination
pub struct EmployeeQueryBuilder {
    base_query: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    order_clause: Option<String>,
    limit: u32,
    offset: u32,
}

impl EmployeeQueryBuilder {
    /// Creates a new EmployeeQueryBuilder with default values
    pub fn new() -> Self {
        Self {
            base_query: "SELECT * FROM employees".to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_clause: None,
            limit: 10,
            offset: 0,
        }
    }

    /// Adds a search filter for partial name matching (case-insensitive)
    pub fn add_search_filter(&mut self, search: &str) {
        let param_index = self.params.len() + 1;
        self.where_clauses.push(format!("name ILIKE ${}", param_index));
        self.params.push(format!("%{}%", search));
    }

    /// Adds a clock-status filter (exact match against the stored value)
    pub fn add_status_filter(&mut self, status: ClockStatus) {
        let param_index = self.params.len() + 1;
        self.where_clauses
            .push(format!("clock_status = ${}", param_index));
        self.params.push(status.as_str().to_string());
    }

    /// Adds leave-balance range filters (min and/or max, inclusive)
    /// All parameters travel as text, so the comparison casts explicitly
    pub fn add_leave_days_range(&mut self, min: Option<i32>, max: Option<i32>) {
        if let Some(min_days) = min {
            let param_index = self.params.len() + 1;
            self.where_clauses
                .push(format!("leave_days >= ${}::int", param_index));
            self.params.push(min_days.to_string());
        }

        if let Some(max_days) = max {
            let param_index = self.params.len() + 1;
            self.where_clauses
                .push(format!("leave_days <= ${}::int", param_index));
            self.params.push(max_days.to_string());
        }
    }

    /// Sets the sort order for the query
    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        let field_name = match field {
            SortField::Name => "name",
            SortField::LeaveDays => "leave_days",
        };

        let order_str = match order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        self.order_clause = Some(format!("{} {}", field_name, order_str));
    }

    /// Sets pagination parameters from a 1-indexed page number
    pub fn set_pagination(&mut self, page: u32, limit: u32) {
        self.limit = limit;
        self.offset = (page - 1) * limit;
    }

    /// Builds the final SQL query string with all parameters
    /// Returns a tuple of (query_string, parameters)
    pub fn build(&self) -> (String, Vec<String>) {
        let mut query = self.base_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_clause {
            query.push_str(" ORDER BY ");
            query.push_str(order);
        }

        // LIMIT and OFFSET go into the query string directly; PostgreSQL
        // requires integers there, not text parameters
        query.push_str(&format!(" LIMIT {}", self.limit));
        query.push_str(&format!(" OFFSET {}", self.offset));

        (query, self.params.clone())
    }
}

impl Default for EmployeeQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters extracted from the dashboard HTTP request
/// All fields are optional to support flexible querying
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// Search term for partial name matching (case-insensitive)
    pub search: Option<String>,
    /// Filter by clock status ("not_clocked_in", "clocked_in", "clocked_out")
    pub status: Option<String>,
    /// Minimum leave balance filter (inclusive)
    pub min_leave_days: Option<i32>,
    /// Maximum leave balance filter (inclusive)
    pub max_leave_days: Option<i32>,
    /// Sort field: "name" or "leave_days"
    pub sort: Option<String>,
    /// Sort order: "asc" or "desc"
    pub order: Option<String>,
    /// Page number (1-indexed, defaults to 1)
    pub page: Option<u32>,
    /// Items per page (defaults to 10)
    pub limit: Option<u32>,
}

/// Sort field options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    LeaveDays,
}

/// Sort order options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Validated and normalized query parameters
#[derive(Debug)]
pub struct ValidatedQuery {
    /// Normalized search term (trimmed, None if empty)
    pub search: Option<String>,
    /// Parsed clock-status filter
    pub status: Option<ClockStatus>,
    /// Minimum leave balance filter
    pub min_leave_days: Option<i32>,
    /// Maximum leave balance filter
    pub max_leave_days: Option<i32>,
    /// Sort field (None means no sorting)
    pub sort_field: Option<SortField>,
    /// Sort order (defaults based on sort field)
    pub sort_order: SortOrder,
    /// Page number (validated as positive, defaults to 1)
    pub page: u32,
    /// Items per page (validated as positive, defaults to 10)
    pub limit: u32,
}

/// Validation error type for query parameters
#[derive(Debug)]
pub struct QueryValidationError {
    pub message: String,
}

impl std::fmt::Display for QueryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for QueryValidationError {}

/// Query parameter validator
pub struct QueryValidator;

impl QueryValidator {
    /// Validates and normalizes query parameters
    pub fn validate(params: QueryParams) -> Result<ValidatedQuery, QueryValidationError> {
        let search = Self::normalize_string(params.search);

        let status = if let Some(status_str) = Self::normalize_string(params.status) {
            Some(ClockStatus::from_str(&status_str).map_err(|e| QueryValidationError {
                message: e,
            })?)
        } else {
            None
        };

        let min_leave_days = if let Some(days) = params.min_leave_days {
            Self::validate_leave_days(days, "min_leave_days")?;
            Some(days)
        } else {
            None
        };

        let max_leave_days = if let Some(days) = params.max_leave_days {
            Self::validate_leave_days(days, "max_leave_days")?;
            Some(days)
        } else {
            None
        };

        if let (Some(min), Some(max)) = (min_leave_days, max_leave_days) {
            if min > max {
                return Err(QueryValidationError {
                    message: "min_leave_days cannot be greater than max_leave_days".to_string(),
                });
            }
        }

        let sort_field = if let Some(sort_str) = params.sort {
            Some(Self::parse_sort_field(&sort_str)?)
        } else {
            None
        };

        let sort_order = if let Some(order_str) = params.order {
            Self::parse_sort_order(&order_str)?
        } else {
            // Names read naturally ascending; leave balances are usually
            // inspected from the largest remainder down
            match sort_field {
                Some(SortField::Name) => SortOrder::Asc,
                Some(SortField::LeaveDays) => SortOrder::Desc,
                None => SortOrder::Asc,
            }
        };

        let page = if let Some(p) = params.page {
            Self::validate_pagination_param(p, "page")?;
            p
        } else {
            1
        };

        let limit = if let Some(l) = params.limit {
            Self::validate_pagination_param(l, "limit")?;
            l
        } else {
            10
        };

        Ok(ValidatedQuery {
            search,
            status,
            min_leave_days,
            max_leave_days,
            sort_field,
            sort_order,
            page,
            limit,
        })
    }

    /// Normalizes string parameters by trimming whitespace
    /// Returns None if the string is empty or whitespace-only
    fn normalize_string(s: Option<String>) -> Option<String> {
        s.and_then(|s| {
            let trimmed = s.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        })
    }

    /// Validates that a leave-day bound is not negative
    fn validate_leave_days(days: i32, param_name: &str) -> Result<(), QueryValidationError> {
        if days < 0 {
            return Err(QueryValidationError {
                message: format!("{} must not be negative", param_name),
            });
        }
        Ok(())
    }

    /// Parses sort field string to SortField enum
    fn parse_sort_field(s: &str) -> Result<SortField, QueryValidationError> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "leave_days" => Ok(SortField::LeaveDays),
            _ => Err(QueryValidationError {
                message: format!("Invalid sort field '{}'. Must be 'name' or 'leave_days'", s),
            }),
        }
    }

    /// Parses sort order string to SortOrder enum
    fn parse_sort_order(s: &str) -> Result<SortOrder, QueryValidationError> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(QueryValidationError {
                message: format!("Invalid sort order '{}'. Must be 'asc' or 'desc'", s),
            }),
        }
    }

    /// Validates pagination parameters (page and limit) as positive
    fn validate_pagination_param(value: u32, param_name: &str) -> Result<(), QueryValidationError> {
        if value == 0 {
            return Err(QueryValidationError {
                message: format!("{} must be a positive number (greater than 0)", param_name),
            });
        }
        Ok(())
    }
}
