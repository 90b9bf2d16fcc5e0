//! Live SQL Server metadata source.
//!
//! Implements the catalog's [`MetadataSource`] contract over a tiberius
//! connection. The generator runs on one thread, so this crate owns a
//! current-thread tokio runtime and blocks on each round-trip; one
//! connection lives for the duration of a generation run and is released on
//! drop.

use futures_util::TryStreamExt;
use sprocgen_catalog::{
    ColumnDescriptor, MetadataSource, ParamDirection, ParameterDescriptor, ProcedureRef,
    ResultSetDescriptor, SourceError,
};
use thiserror::Error;
use tiberius::{Client, ColumnType, Config, QueryItem};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

type SqlClient = Client<Compat<TcpStream>>;

const LIST_PROCEDURES_SQL: &str = "select ROUTINE_SCHEMA, ROUTINE_NAME \
     from INFORMATION_SCHEMA.ROUTINES \
     where ROUTINE_TYPE = 'PROCEDURE' \
     order by ROUTINE_SCHEMA, ROUTINE_NAME";

const DESCRIBE_PARAMETERS_SQL: &str =
    "exec sp_sproc_columns @procedure_owner = @P1, @procedure_name = @P2";

#[derive(Debug, Error)]
pub enum MssqlError {
    #[error("connection failed")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tds(#[from] tiberius::error::Error),
}

/// A [`MetadataSource`] backed by a live SQL Server connection.
pub struct MssqlMetadataSource {
    runtime: Runtime,
    client: SqlClient,
}

impl MssqlMetadataSource {
    /// Connect using an ADO.NET-style connection string (the design-time
    /// `ConnectionString` from the options document).
    pub fn connect(connection_string: &str) -> Result<Self, MssqlError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = runtime.block_on(async {
            let config = Config::from_ado_string(connection_string)?;
            let tcp = TcpStream::connect(config.get_addr()).await?;
            tcp.set_nodelay(true)?;
            let client = Client::connect(config, tcp.compat_write()).await?;
            Ok::<SqlClient, MssqlError>(client)
        })?;
        debug!("connected to SQL Server");
        Ok(Self { runtime, client })
    }

    fn list(&mut self) -> Result<Vec<ProcedureRef>, MssqlError> {
        let rows = self.runtime.block_on(async {
            let stream = self.client.simple_query(LIST_PROCEDURES_SQL).await?;
            stream.into_first_result().await
        })?;

        let mut procedures = Vec::with_capacity(rows.len());
        for row in &rows {
            if let (Some(schema), Some(name)) =
                (row.get::<&str, _>(0), row.get::<&str, _>(1))
            {
                procedures.push(ProcedureRef::new(schema, name));
            }
        }
        debug!(count = procedures.len(), "listed stored procedures");
        Ok(procedures)
    }

    fn describe(&mut self, schema: &str, name: &str) -> Result<Vec<ParameterDescriptor>, MssqlError> {
        let rows = self.runtime.block_on(async {
            let stream = self
                .client
                .query(DESCRIBE_PARAMETERS_SQL, &[&schema, &name])
                .await?;
            stream.into_first_result().await
        })?;

        let mut parameters = Vec::with_capacity(rows.len());
        for row in &rows {
            let Some(param_name) = row.get::<&str, _>("COLUMN_NAME") else {
                continue;
            };
            let direction = match row.get::<i16, _>("COLUMN_TYPE") {
                Some(1) => ParamDirection::Input,
                Some(2) => ParamDirection::Output,
                Some(5) => ParamDirection::Return,
                _ => ParamDirection::Other,
            };
            let Some(raw_type) = row.get::<&str, _>("TYPE_NAME") else {
                continue;
            };
            parameters.push(ParameterDescriptor {
                name: param_name.to_string(),
                direction,
                raw_type: raw_type.to_string(),
                size: row.get::<i32, _>("CHAR_OCTET_LENGTH").unwrap_or(-1),
                nullable: row.get::<&str, _>("IS_NULLABLE") == Some("YES"),
            });
        }
        Ok(parameters)
    }

    fn probe(&mut self, batch: &str) -> Result<Vec<ResultSetDescriptor>, MssqlError> {
        debug!(batch, "running shape-only probe");
        self.runtime.block_on(async {
            let mut stream = self.client.simple_query(batch).await?;
            let mut result_sets = Vec::new();
            while let Some(item) = stream.try_next().await? {
                if let QueryItem::Metadata(meta) = item {
                    let columns: Vec<ColumnDescriptor> = meta
                        .columns()
                        .iter()
                        .map(|c| ColumnDescriptor {
                            name: c.name().to_string(),
                            data_type: column_type_name(c.column_type()).to_string(),
                        })
                        .collect();
                    if !columns.is_empty() {
                        result_sets.push(ResultSetDescriptor { columns });
                    }
                }
            }
            Ok(result_sets)
        })
    }
}

impl MetadataSource for MssqlMetadataSource {
    fn list_procedures(&mut self) -> Result<Vec<ProcedureRef>, SourceError> {
        self.list().map_err(Into::into)
    }

    fn procedure_parameters(
        &mut self,
        schema: &str,
        name: &str,
    ) -> Result<Vec<ParameterDescriptor>, SourceError> {
        self.describe(schema, name).map_err(Into::into)
    }

    fn probe_result_sets(&mut self, batch: &str) -> Result<Vec<ResultSetDescriptor>, SourceError> {
        self.probe(batch).map_err(Into::into)
    }
}

/// Catalog-style name for a wire column type.
fn column_type_name(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Bit | ColumnType::Bitn => "bit",
        ColumnType::Int1 => "tinyint",
        ColumnType::Int2 => "smallint",
        ColumnType::Int4 | ColumnType::Intn => "int",
        ColumnType::Int8 => "bigint",
        ColumnType::Float4 => "real",
        ColumnType::Float8 | ColumnType::Floatn => "float",
        ColumnType::Money | ColumnType::Money4 => "money",
        ColumnType::Datetime | ColumnType::Datetime4 | ColumnType::Datetimen => "datetime",
        ColumnType::Datetime2 => "datetime2",
        ColumnType::Daten => "date",
        ColumnType::Timen => "time",
        ColumnType::DatetimeOffsetn => "datetimeoffset",
        ColumnType::Decimaln | ColumnType::Numericn => "decimal",
        ColumnType::Guid => "uniqueidentifier",
        ColumnType::BigChar => "char",
        ColumnType::BigVarChar => "varchar",
        ColumnType::NChar => "nchar",
        ColumnType::NVarchar => "nvarchar",
        ColumnType::Text => "text",
        ColumnType::NText => "ntext",
        ColumnType::BigBinary => "binary",
        ColumnType::BigVarBin => "varbinary",
        ColumnType::Image => "image",
        ColumnType::Xml => "xml",
        _ => "sql_variant",
    }
}
