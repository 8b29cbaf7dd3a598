//! Database schema supplied by the host.
//!
//! The indexer never connects to a database. The host hands it a snapshot
//! of connected databases (the CLI reads one from a JSON dump) and the
//! completion layer and the post-pass consult it read-only.

/// Every connected database.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Schema {
    pub databases: Vec<Database>,
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Database {
    /// Logical name.
    pub name: String,
    pub tables: Vec<Table>,
    pub sequences: Vec<String>,
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Field {
    pub name: String,
    pub data_type: String,
    pub mandatory: bool,
    /// Array extent, 0 for scalars.
    pub extent: u32,
    /// Component of the table's primary index.
    pub primary_key: bool,
    /// Component of any index.
    pub indexed: bool,
}

/// A table found in the schema, with the database that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableRef<'a> {
    pub database: &'a Database,
    pub table: &'a Table,
}

impl Schema {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases
            .iter()
            .find(|db| db.name.eq_ignore_ascii_case(name))
    }

    /// Look up `name`, either `table` or `db.table`, case-insensitively.
    ///
    /// An unqualified name resolves to the first database that has it, in
    /// connection order.
    pub fn find_table(&self, name: &str) -> Option<TableRef<'_>> {
        match name.split_once('.') {
            Some((db_name, table_name)) => {
                let database = self.database(db_name)?;
                let table = database.table(table_name)?;
                Some(TableRef { database, table })
            }
            None => self.databases.iter().find_map(|database| {
                database
                    .table(name)
                    .map(|table| TableRef { database, table })
            }),
        }
    }
}

impl Database {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

impl Table {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

impl TableRef<'_> {
    /// `db.table` spelling.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.database.name, self.table.name)
    }
}
