//! Schema model
//!
//! Plain, serializable projection of parsed `CREATE TABLE` statements plus
//! the per-column fake-data annotations the user adds on top.

use serde::{Deserialize, Serialize};

use crate::{FakerFunction, Result};

/// A table parsed from one DDL fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as declared (not required to be unique)
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table with no columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Builder: add a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Find a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Pretty JSON of the table, used for diagnostic logging
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A column and its annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Upper-cased base type without arguments (e.g. "VARCHAR")
    pub data_type: String,
    /// First numeric type argument (e.g. 50 for VARCHAR(50))
    pub length: Option<u32>,
    /// Same as `length`
    pub precision: Option<u32>,
    /// Second numeric type argument (e.g. 2 for DECIMAL(10,2))
    pub scale: Option<u32>,
    pub is_unsigned: bool,
    /// SQL of the column's constraint options
    pub constraint: Option<String>,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub auto_increment: bool,
    /// Default value expression
    pub default: Option<String>,
    pub character_set: Option<String>,
    pub comment: Option<String>,
    /// Same as `comment`
    pub description: Option<String>,
    /// Where mock values for this column come from, once annotated
    pub source: Option<SourceAnnotation>,
}

impl Column {
    /// Create a column with a name and no type information
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: String::new(),
            length: None,
            precision: None,
            scale: None,
            is_unsigned: false,
            constraint: None,
            not_null: false,
            primary_key: false,
            unique: false,
            auto_increment: false,
            default: None,
            character_set: None,
            comment: None,
            description: None,
            source: None,
        }
    }

    /// Builder: set data type
    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Builder: set length (and precision, which mirrors it)
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self.precision = Some(length);
        self
    }

    /// Builder: set as primary key
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    /// Builder: set as not null
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Builder: set as unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Builder: set as auto increment
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Builder: set default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Builder: set comment (and description, which mirrors it)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.description = Some(comment.clone());
        self.comment = Some(comment);
        self
    }

    /// Builder: set source annotation
    pub fn with_source(mut self, source: SourceAnnotation) -> Self {
        self.source = Some(source);
        self
    }

    /// The four editable flags
    pub fn flags(&self) -> ColumnFlags {
        ColumnFlags {
            primary_key: self.primary_key,
            unique: self.unique,
            auto_increment: self.auto_increment,
            not_null: self.not_null,
        }
    }

    /// Overwrite the four editable flags
    pub fn set_flags(&mut self, flags: ColumnFlags) {
        self.primary_key = flags.primary_key;
        self.unique = flags.unique;
        self.auto_increment = flags.auto_increment;
        self.not_null = flags.not_null;
    }

    /// The reference this column draws from, if any
    pub fn reference(&self) -> Option<(&str, &str)> {
        match &self.source {
            Some(SourceAnnotation::Reference {
                table_name,
                column_name,
            }) => Some((table_name.as_str(), column_name.as_str())),
            _ => None,
        }
    }
}

/// The editable boolean flags of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnFlags {
    pub primary_key: bool,
    pub unique: bool,
    pub auto_increment: bool,
    pub not_null: bool,
}

/// One of the editable flags, for toggle controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFlag {
    PrimaryKey,
    Unique,
    AutoIncrement,
    NotNull,
}

impl ColumnFlag {
    /// Parse a flag from its short or long name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "pk" | "primary_key" | "primary-key" => Some(ColumnFlag::PrimaryKey),
            "uq" | "unique" => Some(ColumnFlag::Unique),
            "ai" | "auto" | "auto_increment" | "auto-increment" => Some(ColumnFlag::AutoIncrement),
            "nn" | "notnull" | "not_null" | "not-null" => Some(ColumnFlag::NotNull),
            _ => None,
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ColumnFlag::PrimaryKey => "Primary Key",
            ColumnFlag::Unique => "Unique",
            ColumnFlag::AutoIncrement => "Auto Increment",
            ColumnFlag::NotNull => "Not Null",
        }
    }
}

impl ColumnFlags {
    pub fn get(&self, flag: ColumnFlag) -> bool {
        match flag {
            ColumnFlag::PrimaryKey => self.primary_key,
            ColumnFlag::Unique => self.unique,
            ColumnFlag::AutoIncrement => self.auto_increment,
            ColumnFlag::NotNull => self.not_null,
        }
    }

    pub fn set(&mut self, flag: ColumnFlag, value: bool) {
        match flag {
            ColumnFlag::PrimaryKey => self.primary_key = value,
            ColumnFlag::Unique => self.unique = value,
            ColumnFlag::AutoIncrement => self.auto_increment = value,
            ColumnFlag::NotNull => self.not_null = value,
        }
    }
}

/// Where a column's mock values come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceAnnotation {
    /// A synthetic-data generator from the catalog
    Faker { function_name: FakerFunction },
    /// Values drawn from another table's column
    Reference {
        table_name: String,
        column_name: String,
    },
}

impl SourceAnnotation {
    pub fn faker(function: FakerFunction) -> Self {
        SourceAnnotation::Faker {
            function_name: function,
        }
    }

    pub fn reference(table_name: impl Into<String>, column_name: impl Into<String>) -> Self {
        SourceAnnotation::Reference {
            table_name: table_name.into(),
            column_name: column_name.into(),
        }
    }
}

impl std::fmt::Display for SourceAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceAnnotation::Faker { function_name } => write!(f, "faker:{}", function_name),
            SourceAnnotation::Reference {
                table_name,
                column_name,
            } => write!(f, "{}.{}", table_name, column_name),
        }
    }
}
