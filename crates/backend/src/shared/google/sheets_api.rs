use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::client::GoogleClient;
use super::gateway::{RangeWrite, SheetsGateway};
use super::GoogleError;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct SheetsApi {
    client: GoogleClient,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    properties: Option<SheetProperties>,
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsApi {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }
}

/// Formatted values arrive as strings; anything else is stringified
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetsGateway for SheetsApi {
    async fn spreadsheet_title(&self, spreadsheet_id: &str) -> Result<String, GoogleError> {
        let url = format!("{}/{}", SHEETS_API_BASE, urlencoding::encode(spreadsheet_id));
        let meta: SpreadsheetMeta = self
            .client
            .get(&url, &[("fields", "properties.title".to_string())])
            .await?;
        Ok(meta.properties.map(|p| p.title).unwrap_or_default())
    }

    async fn tab_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, GoogleError> {
        let url = format!("{}/{}", SHEETS_API_BASE, urlencoding::encode(spreadsheet_id));
        let meta: SpreadsheetMeta = self
            .client
            .get(&url, &[("fields", "sheets.properties.title".to_string())])
            .await?;
        Ok(meta
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    async fn read_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, GoogleError> {
        let url = format!(
            "{}/{}/values/{}",
            SHEETS_API_BASE,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(range)
        );
        let values: ValueRange = self.client.get(&url, &[]).await?;
        Ok(values
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn write_values(
        &self,
        spreadsheet_id: &str,
        writes: &[RangeWrite],
    ) -> Result<(), GoogleError> {
        if writes.is_empty() {
            return Ok(());
        }
        let url = format!(
            "{}/{}/values:batchUpdate",
            SHEETS_API_BASE,
            urlencoding::encode(spreadsheet_id)
        );
        let data: Vec<Value> = writes
            .iter()
            .map(|w| json!({ "range": w.range, "values": [[w.value]] }))
            .collect();
        let body = json!({ "valueInputOption": "RAW", "data": data });

        let _: Value = self.client.post(&url, &body).await?;
        tracing::info!(
            "Wrote {} cell(s) to spreadsheet {}",
            writes.len(),
            spreadsheet_id
        );
        Ok(())
    }
}
