use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

/// Nullable scalar returned by the query executor, and the parameter type for binds
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Number(Decimal),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Number(n) if n.fract().is_zero() => n.to_i64(),
            SqlValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            SqlValue::Number(n) => Some(*n),
            SqlValue::Float(f) => Decimal::from_f64_retain(*f),
            SqlValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Number(_) => "NUMBER",
            SqlValue::Float(_) => "FLOAT",
            SqlValue::String(_) => "STRING",
            SqlValue::DateTime(_) => "DATETIME",
            SqlValue::Bytes(_) => "BYTES",
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => Ok(()),
            SqlValue::Number(n) => write!(f, "{}", n),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::String(s) => write!(f, "{}", s),
            SqlValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            SqlValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::String(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::String(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Number(Decimal::from(value))
    }
}

/// Kinds of schema object the browser can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    Table,
    View,
    Sequence,
    User,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Table,
        ObjectKind::View,
        ObjectKind::Sequence,
        ObjectKind::User,
    ];

    pub fn plural(&self) -> &'static str {
        match self {
            ObjectKind::Table => "Tables",
            ObjectKind::View => "Views",
            ObjectKind::Sequence => "Sequences",
            ObjectKind::User => "Users",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Table => write!(f, "table"),
            ObjectKind::View => write!(f, "view"),
            ObjectKind::Sequence => write!(f, "sequence"),
            ObjectKind::User => write!(f, "user"),
        }
    }
}

/// A named catalog object picked from a listing.
///
/// The name is kept in the catalog's uppercase convention; [`CatalogObjectRef::new`]
/// normalises whatever the operator typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogObjectRef {
    pub name: String,
    pub kind: ObjectKind,
}

impl CatalogObjectRef {
    pub fn new(name: impl AsRef<str>, kind: ObjectKind) -> Self {
        Self {
            name: normalize_name(name.as_ref()),
            kind,
        }
    }
}

impl fmt::Display for CatalogObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Catalog lookups are case-insensitive for the operator; the data dictionary stores uppercase.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Column information from `USER_TAB_COLUMNS`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub position: u32,
    pub name: String,
    pub data_type: String,
    pub length: i64,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
    pub is_nullable: bool,
    pub default_value: Option<String>,
}

impl ColumnInfo {
    /// Default expression cut to `width` characters, empty when the column has none.
    pub fn default_preview(&self, width: usize) -> String {
        self.default_value
            .as_deref()
            .map(|d| d.trim_end().chars().take(width).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    ViewCheck,
    ViewReadOnly,
    Other(String),
}

impl ConstraintKind {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "P" => ConstraintKind::PrimaryKey,
            "R" => ConstraintKind::ForeignKey,
            "U" => ConstraintKind::Unique,
            "C" => ConstraintKind::Check,
            "V" => ConstraintKind::ViewCheck,
            "O" => ConstraintKind::ViewReadOnly,
            other => ConstraintKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::PrimaryKey => write!(f, "PRIMARY KEY"),
            ConstraintKind::ForeignKey => write!(f, "FOREIGN KEY"),
            ConstraintKind::Unique => write!(f, "UNIQUE"),
            ConstraintKind::Check => write!(f, "CHECK"),
            ConstraintKind::ViewCheck => write!(f, "WITH CHECK OPTION"),
            ConstraintKind::ViewReadOnly => write!(f, "WITH READ ONLY"),
            ConstraintKind::Other(code) => write!(f, "{}", code),
        }
    }
}

/// One (constraint, column) pairing. Constraints without member columns
/// still produce a row, with `column_name` left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintInfo {
    pub name: String,
    pub kind: ConstraintKind,
    pub referenced_constraint: Option<String>,
    pub column_name: Option<String>,
    pub search_condition: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_descend(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("DESC") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: String,
    pub position: u32,
    pub direction: SortDirection,
}

/// Index information
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    pub name: String,
    pub is_unique: bool,
    pub columns: Vec<IndexColumn>,
}

/// View definition text, kept whole
#[derive(Debug, Clone, PartialEq)]
pub struct ViewInfo {
    pub name: String,
    pub definition: String,
}

/// Sequence state from `USER_SEQUENCES`.
///
/// `next_value` is only populated by an explicit NEXTVAL request, which advances the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceInfo {
    pub name: String,
    pub min_value: Decimal,
    pub max_value: Decimal,
    pub increment: Decimal,
    pub cycle: bool,
    pub ordered: bool,
    pub last_number: Decimal,
    pub next_value: Option<Decimal>,
}

impl SequenceInfo {
    pub fn with_next_value(mut self, value: Decimal) -> Self {
        self.next_value = Some(value);
        self
    }
}

/// Account summary from `ALL_USERS`
#[derive(Debug, Clone, PartialEq)]
pub struct UserInfo {
    pub username: String,
    pub user_id: i64,
    pub created: NaiveDateTime,
}

/// Connection configuration
#[derive(Debug, Clone)]
pub struct DbConnectionConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub username: String,
    pub password: String,
}

impl DbConnectionConfig {
    /// Easy Connect string, `host:port/service`
    pub fn connect_string(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.service_name)
    }
}
