use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::connection::{DbConnection, DbError, DbResult};
use crate::executor::QueryResult;
use crate::oracle::connection::OracleDbConnection;
use crate::plugin::CatalogPlugin;
use crate::types::*;

const LIST_TABLES_SQL: &str = "SELECT TABLE_NAME FROM USER_TABLES ORDER BY TABLE_NAME";
const LIST_VIEWS_SQL: &str = "SELECT VIEW_NAME FROM USER_VIEWS ORDER BY VIEW_NAME";
const LIST_SEQUENCES_SQL: &str = "SELECT SEQUENCE_NAME FROM USER_SEQUENCES ORDER BY SEQUENCE_NAME";
const LIST_USERS_SQL: &str = "SELECT USERNAME FROM ALL_USERS ORDER BY USERNAME";

const COLUMNS_SQL: &str = "SELECT COLUMN_ID, COLUMN_NAME, DATA_TYPE, DATA_LENGTH, \
     DATA_PRECISION, DATA_SCALE, NULLABLE, DATA_DEFAULT \
     FROM USER_TAB_COLUMNS \
     WHERE TABLE_NAME = :1 \
     ORDER BY COLUMN_ID";

// Outer join: check constraints may have no rows in USER_CONS_COLUMNS.
const CONSTRAINTS_SQL: &str = "SELECT uc.CONSTRAINT_NAME, uc.CONSTRAINT_TYPE, uc.R_CONSTRAINT_NAME, \
     ucc.COLUMN_NAME, uc.SEARCH_CONDITION \
     FROM USER_CONSTRAINTS uc \
     LEFT JOIN USER_CONS_COLUMNS ucc \
     ON uc.CONSTRAINT_NAME = ucc.CONSTRAINT_NAME \
     WHERE uc.TABLE_NAME = :1 \
     ORDER BY uc.CONSTRAINT_NAME, ucc.POSITION";

const INDEXES_SQL: &str = "SELECT INDEX_NAME, UNIQUENESS FROM USER_INDEXES \
     WHERE TABLE_NAME = :1 \
     ORDER BY INDEX_NAME";

const INDEX_COLUMNS_SQL: &str = "SELECT COLUMN_NAME, COLUMN_POSITION, DESCEND FROM USER_IND_COLUMNS \
     WHERE INDEX_NAME = :1 \
     ORDER BY COLUMN_POSITION";

const VIEW_SOURCE_SQL: &str = "SELECT TEXT FROM USER_VIEWS WHERE VIEW_NAME = :1";

const SEQUENCE_SQL: &str = "SELECT SEQUENCE_NAME, MIN_VALUE, MAX_VALUE, INCREMENT_BY, \
     CYCLE_FLAG, ORDER_FLAG, LAST_NUMBER \
     FROM USER_SEQUENCES WHERE SEQUENCE_NAME = :1";

const USER_SQL: &str = "SELECT USERNAME, USER_ID, CREATED FROM ALL_USERS WHERE USERNAME = :1";

/// Oracle data dictionary plugin (stateless)
pub struct OraclePlugin;

impl OraclePlugin {
    pub fn new() -> Self {
        Self
    }

    async fn fetch(
        &self,
        connection: &dyn DbConnection,
        label: &'static str,
        sql: &str,
        param: Option<&str>,
    ) -> DbResult<QueryResult> {
        debug!(query = label, param, "catalog query");
        let params = param.map(|p| vec![SqlValue::from(p)]);
        connection.query(sql, params).await
    }

    async fn list_names(&self, connection: &dyn DbConnection, label: &'static str, sql: &str) -> DbResult<Vec<String>> {
        let result = self.fetch(connection, label, sql, None).await?;
        result
            .shaped(label, 1)?
            .iter()
            .map(|row| row.string(0))
            .collect()
    }

    /// NEXTVAL cannot be bound, so the name is spliced in as a quoted identifier.
    fn next_value_sql(&self, sequence: &str) -> DbResult<String> {
        let valid = !sequence.is_empty()
            && sequence.len() <= 128
            && !sequence.contains(self.identifier_quote())
            && !sequence.contains('\0');
        if !valid {
            return Err(DbError::InvalidIdentifier(sequence.to_string()));
        }
        Ok(format!("SELECT {}.NEXTVAL FROM DUAL", self.quote_identifier(sequence)))
    }
}

impl Default for OraclePlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogPlugin for OraclePlugin {
    async fn create_connection(&self, config: DbConnectionConfig) -> DbResult<Box<dyn DbConnection + Send + Sync>> {
        let mut conn = OracleDbConnection::new(config);
        conn.connect().await?;
        Ok(Box::new(conn))
    }

    // === Object Listing ===

    async fn list_tables(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>> {
        self.list_names(connection, "tables", LIST_TABLES_SQL).await
    }

    async fn list_views(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>> {
        self.list_names(connection, "views", LIST_VIEWS_SQL).await
    }

    async fn list_sequences(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>> {
        self.list_names(connection, "sequences", LIST_SEQUENCES_SQL).await
    }

    async fn list_users(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>> {
        self.list_names(connection, "users", LIST_USERS_SQL).await
    }

    // === Table / View Detail ===

    async fn list_columns(&self, connection: &dyn DbConnection, table: &str) -> DbResult<Vec<ColumnInfo>> {
        let table = normalize_name(table);
        let result = self.fetch(connection, "columns", COLUMNS_SQL, Some(&table)).await?;

        let mut columns = result
            .shaped("columns", 8)?
            .iter()
            .map(|row| {
                Ok(ColumnInfo {
                    position: row.ordinal(0)?,
                    name: row.string(1)?,
                    data_type: row.string(2)?,
                    length: row.int(3)?,
                    precision: row.opt_int(4)?,
                    scale: row.opt_int(5)?,
                    is_nullable: row.flag(6, "Y")?,
                    default_value: row.opt_string(7)?,
                })
            })
            .collect::<DbResult<Vec<_>>>()?;

        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }

    async fn list_constraints(&self, connection: &dyn DbConnection, table: &str) -> DbResult<Vec<ConstraintInfo>> {
        let table = normalize_name(table);
        let result = self.fetch(connection, "constraints", CONSTRAINTS_SQL, Some(&table)).await?;

        result
            .shaped("constraints", 5)?
            .iter()
            .map(|row| {
                Ok(ConstraintInfo {
                    name: row.string(0)?,
                    kind: ConstraintKind::from_code(&row.string(1)?),
                    referenced_constraint: row.opt_string(2)?,
                    column_name: row.opt_string(3)?,
                    search_condition: row.opt_string(4)?,
                })
            })
            .collect()
    }

    async fn list_indexes(&self, connection: &dyn DbConnection, table: &str) -> DbResult<Vec<IndexInfo>> {
        let table = normalize_name(table);
        let result = self.fetch(connection, "indexes", INDEXES_SQL, Some(&table)).await?;

        let headers = result
            .shaped("indexes", 2)?
            .iter()
            .map(|row| Ok((row.string(0)?, row.flag(1, "UNIQUE")?)))
            .collect::<DbResult<Vec<_>>>()?;

        let mut indexes = Vec::with_capacity(headers.len());
        for (name, is_unique) in headers {
            let result = self
                .fetch(connection, "index columns", INDEX_COLUMNS_SQL, Some(&name))
                .await?;

            let mut columns = result
                .shaped("index columns", 3)?
                .iter()
                .map(|row| {
                    Ok(IndexColumn {
                        name: row.string(0)?,
                        position: row.ordinal(1)?,
                        direction: SortDirection::from_descend(&row.opt_string(2)?.unwrap_or_default()),
                    })
                })
                .collect::<DbResult<Vec<_>>>()?;
            columns.sort_by_key(|c| c.position);

            indexes.push(IndexInfo {
                name,
                is_unique,
                columns,
            });
        }

        Ok(indexes)
    }

    async fn view_source(&self, connection: &dyn DbConnection, view: &str) -> DbResult<Option<ViewInfo>> {
        let view = normalize_name(view);
        let result = self.fetch(connection, "view source", VIEW_SOURCE_SQL, Some(&view)).await?;

        let rows = result.shaped("view source", 1)?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        Ok(Some(ViewInfo {
            name: view,
            definition: row.opt_string(0)?.unwrap_or_default(),
        }))
    }

    // === Sequence Detail ===

    async fn sequence_state(&self, connection: &dyn DbConnection, sequence: &str) -> DbResult<Option<SequenceInfo>> {
        let sequence = normalize_name(sequence);
        let result = self.fetch(connection, "sequence", SEQUENCE_SQL, Some(&sequence)).await?;

        let rows = result.shaped("sequence", 7)?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        Ok(Some(SequenceInfo {
            name: row.string(0)?,
            min_value: row.decimal(1)?,
            max_value: row.decimal(2)?,
            increment: row.decimal(3)?,
            cycle: row.flag(4, "Y")?,
            ordered: row.flag(5, "Y")?,
            last_number: row.decimal(6)?,
            next_value: None,
        }))
    }

    async fn next_sequence_value(&self, connection: &dyn DbConnection, sequence: &str) -> DbResult<Decimal> {
        let sequence = normalize_name(sequence);
        let sql = self.next_value_sql(&sequence)?;
        let result = self.fetch(connection, "nextval", &sql, None).await?;

        let rows = result.shaped("nextval", 1)?;
        let row = rows
            .first()
            .ok_or_else(|| DbError::Execution(format!("NEXTVAL for {} returned no row", sequence)))?;
        row.decimal(0)
    }

    // === User Detail ===

    async fn user_info(&self, connection: &dyn DbConnection, username: &str) -> DbResult<Option<UserInfo>> {
        let username = normalize_name(username);
        let result = self.fetch(connection, "user", USER_SQL, Some(&username)).await?;

        let rows = result.shaped("user", 3)?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        Ok(Some(UserInfo {
            username: row.string(0)?,
            user_id: row.int(1)?,
            created: row.datetime(2)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedConnection;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn text(s: &str) -> SqlValue {
        SqlValue::from(s)
    }

    fn num(n: i64) -> SqlValue {
        SqlValue::from(n)
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() {
        let conn = ScriptedConnection::new();
        let plugin = OraclePlugin::new();

        for kind in ObjectKind::ALL {
            let objects = plugin.list_objects(&conn, kind).await.unwrap();
            assert!(objects.is_empty(), "{kind} listing should be empty");
        }
    }

    #[tokio::test]
    async fn listing_keeps_catalog_order_and_kind() {
        let conn = ScriptedConnection::new().respond(
            "FROM USER_SEQUENCES ORDER BY",
            vec![vec![text("SEQ_INV")], vec![text("SEQ_ORD")]],
        );
        let objects = OraclePlugin::new()
            .list_objects(&conn, ObjectKind::Sequence)
            .await
            .unwrap();

        assert_eq!(
            objects,
            vec![
                CatalogObjectRef::new("SEQ_INV", ObjectKind::Sequence),
                CatalogObjectRef::new("SEQ_ORD", ObjectKind::Sequence),
            ]
        );
        assert_eq!(conn.executed()[0].sql, LIST_SEQUENCES_SQL);
    }

    #[tokio::test]
    async fn columns_decode_with_absent_fields() {
        let conn = ScriptedConnection::new().respond_for(
            "USER_TAB_COLUMNS",
            "EMPLOYEES",
            vec![
                vec![num(1), text("ID"), text("NUMBER"), num(22), SqlValue::Null, SqlValue::Null, text("N"), SqlValue::Null],
                vec![num(2), text("NAME"), text("VARCHAR2"), num(100), SqlValue::Null, SqlValue::Null, text("Y"), SqlValue::Null],
            ],
        );

        let columns = OraclePlugin::new().list_columns(&conn, "employees").await.unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].position, 1);
        assert_eq!(columns[0].name, "ID");
        assert_eq!(columns[0].data_type, "NUMBER");
        assert_eq!(columns[0].length, 22);
        assert_eq!(columns[0].precision, None);
        assert!(!columns[0].is_nullable);
        assert_eq!(columns[0].default_preview(10), "");
        assert_eq!(columns[1].name, "NAME");
        assert!(columns[1].is_nullable);
        assert_eq!(columns[1].default_preview(10), "");
        assert_eq!(conn.executed()[0].params, vec![text("EMPLOYEES")]);
    }

    #[tokio::test]
    async fn columns_are_sorted_by_ordinal() {
        let row = |pos: i64, name: &str| {
            vec![num(pos), text(name), text("NUMBER"), num(22), num(10), num(2), text("Y"), text("0")]
        };
        let conn = ScriptedConnection::new().respond(
            "USER_TAB_COLUMNS",
            vec![row(3, "C"), row(1, "A"), row(2, "B")],
        );

        let columns = OraclePlugin::new().list_columns(&conn, "T").await.unwrap();
        let positions: Vec<u32> = columns.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(columns[0].precision, Some(10));
        assert_eq!(columns[0].scale, Some(2));
    }

    #[tokio::test]
    async fn column_row_with_wrong_width_is_schema_mismatch() {
        let conn = ScriptedConnection::new().respond("USER_TAB_COLUMNS", vec![vec![num(1), text("ID")]]);
        let err = OraclePlugin::new().list_columns(&conn, "T").await.unwrap_err();
        assert!(matches!(err, DbError::SchemaMismatch { expected: 8, actual: 2, .. }));
    }

    #[tokio::test]
    async fn constraints_keep_columnless_rows() {
        let conn = ScriptedConnection::new().respond(
            "LEFT JOIN USER_CONS_COLUMNS",
            vec![
                vec![text("EMP_PK"), text("P"), SqlValue::Null, text("ID"), SqlValue::Null],
                vec![text("EMP_UK"), text("U"), SqlValue::Null, text("DEPT_ID"), SqlValue::Null],
                vec![text("EMP_UK"), text("U"), SqlValue::Null, text("NAME"), SqlValue::Null],
                vec![text("SYS_C001"), text("C"), SqlValue::Null, SqlValue::Null, text("salary > 0")],
            ],
        );

        let constraints = OraclePlugin::new().list_constraints(&conn, "EMPLOYEES").await.unwrap();

        let distinct: HashSet<&str> = constraints.iter().map(|c| c.name.as_str()).collect();
        assert!(constraints.len() >= distinct.len());
        assert_eq!(distinct.len(), 3);

        let check = constraints.iter().find(|c| c.name == "SYS_C001").unwrap();
        assert_eq!(check.kind, ConstraintKind::Check);
        assert_eq!(check.column_name, None);
        assert_eq!(check.search_condition.as_deref(), Some("salary > 0"));

        let composite: Vec<_> = constraints.iter().filter(|c| c.name == "EMP_UK").collect();
        assert_eq!(composite.len(), 2);
    }

    #[tokio::test]
    async fn indexes_fetch_columns_per_exact_name() {
        let conn = ScriptedConnection::new()
            .respond(
                "FROM USER_INDEXES",
                vec![
                    vec![text("EMP_IX"), text("NONUNIQUE")],
                    vec![text("EMP_IX2"), text("UNIQUE")],
                ],
            )
            .respond_for(
                "USER_IND_COLUMNS",
                "EMP_IX",
                vec![
                    vec![text("DEPT_ID"), num(2), text("DESC")],
                    vec![text("NAME"), num(1), text("ASC")],
                ],
            )
            .respond_for("USER_IND_COLUMNS", "EMP_IX2", vec![vec![text("EMAIL"), num(1), text("ASC")]]);

        let indexes = OraclePlugin::new().list_indexes(&conn, "EMPLOYEES").await.unwrap();

        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes[0].name, "EMP_IX");
        assert!(!indexes[0].is_unique);
        let cols: Vec<(&str, u32)> = indexes[0].columns.iter().map(|c| (c.name.as_str(), c.position)).collect();
        assert_eq!(cols, vec![("NAME", 1), ("DEPT_ID", 2)]);
        assert_eq!(indexes[0].columns[1].direction, SortDirection::Desc);

        assert!(indexes[1].is_unique);
        assert_eq!(indexes[1].columns.len(), 1);
        assert_eq!(indexes[1].columns[0].name, "EMAIL");

        let column_queries: Vec<_> = conn
            .executed()
            .into_iter()
            .filter(|q| q.sql.contains("USER_IND_COLUMNS"))
            .collect();
        assert_eq!(column_queries.len(), 2);
        assert!(column_queries.iter().all(|q| q.sql.contains("INDEX_NAME = :1")));
    }

    #[tokio::test]
    async fn missing_view_is_none() {
        let conn = ScriptedConnection::new();
        let view = OraclePlugin::new().view_source(&conn, "NOPE").await.unwrap();
        assert_eq!(view, None);
    }

    #[tokio::test]
    async fn view_source_is_not_truncated() {
        let definition = "SELECT ".to_string() + &"col, ".repeat(2000) + "1 FROM dual";
        let conn = ScriptedConnection::new().respond_for(
            "FROM USER_VIEWS WHERE",
            "EMP_V",
            vec![vec![text(&definition)]],
        );
        let view = OraclePlugin::new().view_source(&conn, "emp_v").await.unwrap().unwrap();
        assert_eq!(view.name, "EMP_V");
        assert_eq!(view.definition, definition);
    }

    fn seq_ord() -> ScriptedConnection {
        ScriptedConnection::new()
            .respond_for(
                "FROM USER_SEQUENCES WHERE",
                "SEQ_ORD",
                vec![vec![text("SEQ_ORD"), num(1), num(999_999_999), num(1), text("N"), text("N"), num(42)]],
            )
            .respond("NEXTVAL", vec![vec![num(43)]])
    }

    #[tokio::test]
    async fn sequence_state_is_static_and_nextval_is_separate() {
        let conn = seq_ord();
        let plugin = OraclePlugin::new();

        let seq = plugin.sequence_state(&conn, "SEQ_ORD").await.unwrap().unwrap();
        assert_eq!(seq.min_value, Decimal::from(1));
        assert_eq!(seq.max_value, Decimal::from(999_999_999));
        assert_eq!(seq.increment, Decimal::from(1));
        assert!(!seq.cycle);
        assert!(!seq.ordered);
        assert_eq!(seq.last_number, Decimal::from(42));
        assert_eq!(seq.next_value, None);
        assert_eq!(conn.count_matching("NEXTVAL"), 0);

        let next = plugin.next_sequence_value(&conn, "SEQ_ORD").await.unwrap();
        assert!(next >= seq.last_number + seq.increment);

        let executed = conn.executed();
        assert_eq!(executed.len(), 2);
        assert_eq!(executed[1].sql, "SELECT \"SEQ_ORD\".NEXTVAL FROM DUAL");
        assert!(executed[1].params.is_empty());
        assert_eq!(conn.count_matching("FROM USER_SEQUENCES WHERE"), 1);
    }

    #[tokio::test]
    async fn sequence_max_beyond_i64_decodes() {
        let huge: Decimal = "9999999999999999999999999999".parse().unwrap();
        let conn = ScriptedConnection::new().respond(
            "FROM USER_SEQUENCES WHERE",
            vec![vec![text("S"), num(1), SqlValue::Number(huge), num(1), text("Y"), text("Y"), num(1)]],
        );
        let seq = OraclePlugin::new().sequence_state(&conn, "S").await.unwrap().unwrap();
        assert_eq!(seq.max_value, huge);
        assert!(seq.cycle);
        assert!(seq.ordered);
    }

    #[tokio::test]
    async fn nextval_rejects_quote_in_name() {
        let conn = ScriptedConnection::new();
        let err = OraclePlugin::new()
            .next_sequence_value(&conn, "X\" FROM DUAL; --")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidIdentifier(_)));
        assert!(conn.executed().is_empty());
    }

    #[tokio::test]
    async fn user_info_decodes_creation_date() {
        let created = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let conn = ScriptedConnection::new().respond_for(
            "FROM ALL_USERS WHERE",
            "HR",
            vec![vec![text("HR"), num(107), SqlValue::DateTime(created)]],
        );
        let user = OraclePlugin::new().user_info(&conn, "hr").await.unwrap().unwrap();
        assert_eq!(user.username, "HR");
        assert_eq!(user.user_id, 107);
        assert_eq!(user.created, created);
    }

    #[tokio::test]
    async fn execution_errors_carry_the_cause() {
        let conn = ScriptedConnection::new().fail("USER_TAB_COLUMNS", "ORA-01031: insufficient privileges");
        let err = OraclePlugin::new().list_columns(&conn, "T").await.unwrap_err();
        assert!(err.to_string().contains("ORA-01031"));
    }
}
