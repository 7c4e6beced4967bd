//! Typed builder for `X-Filter` expressions.
//!
//! ```
//! use linodeapi::{Comparison, ComparisonOperator, Filter, Order};
//!
//! let filter = Filter::and(vec![
//!     Comparison::new("region", ComparisonOperator::Eq, "us-east"),
//!     Comparison::new("label", ComparisonOperator::Contains, "web"),
//! ])
//! .order_by("label", Order::Asc);
//!
//! assert_eq!(
//!     filter.to_json(),
//!     r#"{"+and":[{"region":"us-east"},{"label":{"+contains":"web"}}],"+order":"asc","+order_by":"label"}"#
//! );
//! ```

use std::fmt;

use serde_json::{Map, Value};

/// Operators comparing a column with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
}

impl ComparisonOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "+eq",
            Self::Neq => "+neq",
            Self::Gt => "+gt",
            Self::Gte => "+gte",
            Self::Lt => "+lt",
            Self::Lte => "+lte",
            Self::Contains => "+contains",
        }
    }
}

/// Operators combining several comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "+and",
            Self::Or => "+or",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A single column comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub column: String,
    pub operator: ComparisonOperator,
    pub value: Value,
}

impl Comparison {
    pub fn new(
        column: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// JSON form: `{"col": v}` for equality, `{"col": {"+op": v}}` otherwise.
    pub fn to_value(&self) -> Value {
        let inner = match self.operator {
            ComparisonOperator::Eq => self.value.clone(),
            op => {
                let mut m = Map::new();
                m.insert(op.as_str().to_string(), self.value.clone());
                Value::Object(m)
            }
        };
        let mut outer = Map::new();
        outer.insert(self.column.clone(), inner);
        Value::Object(outer)
    }
}

/// One operand of a logical group: a comparison or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Comparison(Comparison),
    Group(Filter),
}

impl FilterNode {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Comparison(c) => c.to_value(),
            Self::Group(f) => f.to_value(),
        }
    }
}

impl From<Comparison> for FilterNode {
    fn from(comparison: Comparison) -> Self {
        Self::Comparison(comparison)
    }
}

impl From<Filter> for FilterNode {
    fn from(filter: Filter) -> Self {
        Self::Group(filter)
    }
}

/// A filter expression: comparisons or nested groups joined by one logical
/// operator, plus optional ordering.
///
/// ```
/// use linodeapi::{Comparison, ComparisonOperator, Filter, FilterNode};
///
/// let filter = Filter::and(vec![
///     FilterNode::from(Filter::or(vec![
///         Comparison::new("region", ComparisonOperator::Eq, "us-east"),
///         Comparison::new("region", ComparisonOperator::Eq, "us-west"),
///     ])),
///     FilterNode::from(Comparison::new("status", ComparisonOperator::Eq, "running")),
/// ]);
///
/// assert_eq!(
///     filter.to_json(),
///     r#"{"+and":[{"+or":[{"region":"us-east"},{"region":"us-west"}]},{"status":"running"}]}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub operator: LogicalOperator,
    pub children: Vec<FilterNode>,
    pub order_by: Option<String>,
    pub order: Option<Order>,
}

impl Filter {
    fn group<I>(operator: LogicalOperator, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterNode>,
    {
        Self {
            operator,
            children: children.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn and<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterNode>,
    {
        Self::group(LogicalOperator::And, children)
    }

    pub fn or<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FilterNode>,
    {
        Self::group(LogicalOperator::Or, children)
    }

    /// Shorthand for a single equality filter.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::and(vec![Comparison::new(column, ComparisonOperator::Eq, value)])
    }

    pub fn push(&mut self, node: impl Into<FilterNode>) -> &mut Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order_by = Some(column.into());
        self.order = Some(order);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        if !self.children.is_empty() {
            let children = self.children.iter().map(FilterNode::to_value).collect();
            root.insert(
                self.operator.as_str().to_string(),
                Value::Array(children),
            );
        }
        if let Some(column) = &self.order_by {
            root.insert("+order_by".to_string(), Value::String(column.clone()));
        }
        if let Some(order) = self.order {
            root.insert("+order".to_string(), Value::String(order.as_str().to_string()));
        }
        Value::Object(root)
    }

    /// Render for the `X-Filter` header.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}
