//! DynamoDB history backend: one row per (entityName, timestamp).

use crate::error::AppError;
use crate::storage::history::{HistoryStore, SizeSample};
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, TableStatus,
};
use std::collections::HashMap;
use tokio::time::{Duration, sleep};

const ACTIVE_POLL_ATTEMPTS: u32 = 60;

pub struct DynamoHistoryStore {
    client: Client,
    table: String,
}

impl DynamoHistoryStore {
    pub fn new(conf: &aws_config::SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(conf),
            table: table.into(),
        }
    }

    async fn wait_until_active(&self) -> Result<(), AppError> {
        for _ in 0..ACTIVE_POLL_ATTEMPTS {
            let resp = self
                .client
                .describe_table()
                .table_name(&self.table)
                .send()
                .await
                .map_err(aws_sdk_dynamodb::Error::from)?;
            if resp.table().and_then(|t| t.table_status()) == Some(&TableStatus::Active) {
                return Ok(());
            }
            sleep(Duration::from_secs(1)).await;
        }
        Err(AppError::TableNotActive(self.table.clone()))
    }
}

fn num_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<i64, AppError> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| AppError::MalformedRow(format!("missing numeric attribute `{name}`")))
}

fn str_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String, AppError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| AppError::MalformedRow(format!("missing string attribute `{name}`")))
}

fn row_to_sample(item: &HashMap<String, AttributeValue>) -> Result<SizeSample, AppError> {
    Ok(SizeSample {
        entity_name: str_attr(item, "entityName")?,
        timestamp: num_attr(item, "timestamp")?,
        timestamp_string: str_attr(item, "timestampString")?,
        total_size: num_attr(item, "totalSize")?,
        object_count: num_attr(item, "objectCount")?,
    })
}

#[async_trait]
impl HistoryStore for DynamoHistoryStore {
    async fn create_table(&self) -> Result<(), AppError> {
        self.client
            .create_table()
            .table_name(&self.table)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("entityName")
                    .key_type(KeyType::Hash)
                    .build()?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("timestamp")
                    .key_type(KeyType::Range)
                    .build()?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("entityName")
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("timestamp")
                    .attribute_type(ScalarAttributeType::N)
                    .build()?,
            )
            .provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(5)
                    .write_capacity_units(5)
                    .build()?,
            )
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        self.wait_until_active().await
    }

    async fn put_sample(&self, sample: &SizeSample) -> Result<(), AppError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item("entityName", AttributeValue::S(sample.entity_name.clone()))
            .item("timestamp", AttributeValue::N(sample.timestamp.to_string()))
            .item(
                "timestampString",
                AttributeValue::S(sample.timestamp_string.clone()),
            )
            .item("totalSize", AttributeValue::N(sample.total_size.to_string()))
            .item(
                "objectCount",
                AttributeValue::N(sample.object_count.to_string()),
            )
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }

    async fn query_window(
        &self,
        entity: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<SizeSample>, AppError> {
        let mut out = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            // `timestamp` is a reserved word, so both keys go through aliases.
            let resp = self
                .client
                .query()
                .table_name(&self.table)
                .key_condition_expression("#entity = :entity AND #ts BETWEEN :from AND :to")
                .expression_attribute_names("#entity", "entityName")
                .expression_attribute_names("#ts", "timestamp")
                .expression_attribute_values(":entity", AttributeValue::S(entity.to_string()))
                .expression_attribute_values(":from", AttributeValue::N(from.to_string()))
                .expression_attribute_values(":to", AttributeValue::N(to.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(aws_sdk_dynamodb::Error::from)?;
            for item in resp.items() {
                out.push(row_to_sample(item)?);
            }
            match resp.last_evaluated_key() {
                Some(key) => start_key = Some(key.clone()),
                None => break,
            }
        }
        Ok(out)
    }

    async fn max_total_size(&self, entity: &str) -> Result<i64, AppError> {
        let mut max = 0i64;
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let resp = self
                .client
                .scan()
                .table_name(&self.table)
                .projection_expression("totalSize")
                .filter_expression("entityName = :entity")
                .expression_attribute_values(":entity", AttributeValue::S(entity.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(aws_sdk_dynamodb::Error::from)?;
            for item in resp.items() {
                max = max.max(num_attr(item, "totalSize")?);
            }
            match resp.last_evaluated_key() {
                Some(key) => start_key = Some(key.clone()),
                None => break,
            }
        }
        Ok(max)
    }
}
