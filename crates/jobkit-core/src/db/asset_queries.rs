//! Asset CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{DatabaseResultExt, JobkitError, Result},
    models::{AssetKind, AssetSummary},
    reconcile::{ParameterShape, TemplateBacked},
};

const INSERT_ASSET_SQL: &str = "INSERT INTO assets (kind, name, template_path, payload, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const UPSERT_ASSET_SQL: &str = "INSERT INTO assets (kind, name, template_path, payload, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
     ON CONFLICT(kind, name) DO UPDATE SET template_path = excluded.template_path, payload = excluded.payload, updated_at = excluded.updated_at";
const SELECT_PAYLOAD_SQL: &str = "SELECT payload FROM assets WHERE kind = ?1 AND name = ?2";
const CHECK_ASSET_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM assets WHERE kind = ?1 AND name = ?2)";
const DELETE_ASSET_SQL: &str = "DELETE FROM assets WHERE kind = ?1 AND name = ?2";

const SUMMARY_COLUMNS: &str = "id, kind, name, template_path, created_at, updated_at";

impl super::Database {
    /// Stores a new asset.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::AssetExists` if an asset of the same kind and
    /// name is already stored.
    pub fn insert_asset<A>(&mut self, asset: &A) -> Result<AssetSummary>
    where
        A: TemplateBacked + Serialize,
    {
        let kind = asset.kind();
        let payload = serde_json::to_string(asset)?;
        let now = Timestamp::now().to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(
                CHECK_ASSET_EXISTS_SQL,
                params![kind.as_str(), asset.name()],
                |row| row.get(0),
            )
            .db_context("Failed to check asset existence")?;
        if exists {
            return Err(JobkitError::AssetExists {
                kind,
                name: asset.name().to_string(),
            });
        }

        tx.execute(
            INSERT_ASSET_SQL,
            params![
                kind.as_str(),
                asset.name(),
                asset.template_path().to_string_lossy().into_owned(),
                payload,
                now
            ],
        )
        .db_context("Failed to insert asset")?;
        tx.commit().db_context("Failed to commit transaction")?;

        self.require_summary(kind, asset.name())
    }

    /// Stores an asset, replacing any stored asset of the same kind and name.
    pub fn save_asset<A>(&mut self, asset: &A) -> Result<AssetSummary>
    where
        A: TemplateBacked + Serialize,
    {
        let kind = asset.kind();
        let payload = serde_json::to_string(asset)?;
        let now = Timestamp::now().to_string();

        self.connection
            .execute(
                UPSERT_ASSET_SQL,
                params![
                    kind.as_str(),
                    asset.name(),
                    asset.template_path().to_string_lossy().into_owned(),
                    payload,
                    now
                ],
            )
            .db_context("Failed to save asset")?;

        self.require_summary(kind, asset.name())
    }

    /// Loads an asset by name.
    pub fn get_asset<A>(&self, name: &str) -> Result<Option<A>>
    where
        A: TemplateBacked + DeserializeOwned,
    {
        let kind = <A::Shape as ParameterShape>::KIND;
        let payload: Option<String> = self
            .connection
            .query_row(SELECT_PAYLOAD_SQL, params![kind.as_str(), name], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query asset")?;

        payload
            .map(|payload| serde_json::from_str(&payload).map_err(JobkitError::from))
            .transpose()
    }

    /// Whether an asset of `kind` called `name` is stored.
    pub fn asset_exists(&self, kind: AssetKind, name: &str) -> Result<bool> {
        self.connection
            .query_row(CHECK_ASSET_EXISTS_SQL, params![kind.as_str(), name], |row| {
                row.get(0)
            })
            .db_context("Failed to check asset existence")
    }

    /// Lists stored assets ordered by kind and name, optionally restricted to
    /// one kind.
    pub fn list_assets(&self, kind: Option<AssetKind>) -> Result<Vec<AssetSummary>> {
        let mut query = format!("SELECT {SUMMARY_COLUMNS} FROM assets");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(kind) = kind {
            query.push_str(" WHERE kind = ?");
            params_vec.push(Box::new(kind.as_str()));
        }
        query.push_str(" ORDER BY kind, name");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let summaries = stmt
            .query_map(params_refs.as_slice(), summary_from_row)
            .db_context("Failed to query assets")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read asset row")?;

        Ok(summaries)
    }

    /// Deletes an asset. Returns `false` if nothing was stored under that
    /// kind and name.
    pub fn delete_asset(&mut self, kind: AssetKind, name: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_ASSET_SQL, params![kind.as_str(), name])
            .db_context("Failed to delete asset")?;
        Ok(deleted > 0)
    }

    /// Listing entry for one asset.
    pub fn get_summary(&self, kind: AssetKind, name: &str) -> Result<Option<AssetSummary>> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM assets WHERE kind = ?1 AND name = ?2");
        self.connection
            .query_row(&query, params![kind.as_str(), name], summary_from_row)
            .optional()
            .db_context("Failed to query asset summary")
    }

    fn require_summary(&self, kind: AssetKind, name: &str) -> Result<AssetSummary> {
        self.get_summary(kind, name)?
            .ok_or_else(|| JobkitError::AssetNotFound {
                kind,
                name: name.to_string(),
            })
    }
}

fn parse_timestamp(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<AssetSummary> {
    let kind_str: String = row.get(1)?;
    let kind = kind_str.parse::<AssetKind>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid asset kind: {kind_str}"),
            )),
        )
    })?;

    Ok(AssetSummary {
        id: row.get::<_, i64>(0)? as u64,
        kind,
        name: row.get(2)?,
        template_path: row.get(3)?,
        created_at: parse_timestamp(row, 4)?,
        updated_at: parse_timestamp(row, 5)?,
    })
}
