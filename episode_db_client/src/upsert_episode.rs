use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};

pub const EPISODE_NUM_ATTRIBUTE: &str = "episode-num";
pub const DESCRIPTION_ATTRIBUTE: &str = "description";
pub const PUB_DATE_ATTRIBUTE: &str = "pub-date";

const UPDATE_EXPRESSION: &str = "SET #D = :d, #P = :p";

/// The pieces of an UpdateItem call which sets only the description and pub date of an episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeUpdate {
    pub key: HashMap<String, AttributeValue>,
    pub update_expression: &'static str,
    pub expression_attribute_names: HashMap<String, String>,
    pub expression_attribute_values: HashMap<String, AttributeValue>,
}

impl EpisodeUpdate {
    pub fn new(episode_num: u64, description: &str, pub_date: &str) -> Self {
        let key = HashMap::from([(
            EPISODE_NUM_ATTRIBUTE.to_string(),
            AttributeValue::N(episode_num.to_string()),
        )]);

        let expression_attribute_names = HashMap::from([
            ("#D".to_string(), DESCRIPTION_ATTRIBUTE.to_string()),
            ("#P".to_string(), PUB_DATE_ATTRIBUTE.to_string()),
        ]);

        let expression_attribute_values = HashMap::from([
            (":d".to_string(), AttributeValue::S(description.to_string())),
            (":p".to_string(), AttributeValue::S(pub_date.to_string())),
        ]);

        Self {
            key,
            update_expression: UPDATE_EXPRESSION,
            expression_attribute_names,
            expression_attribute_values,
        }
    }
}

#[tracing::instrument(skip(client, update))]
pub(crate) async fn upsert_episode(
    client: &Client,
    table: &str,
    update: EpisodeUpdate,
) -> anyhow::Result<()> {
    let output = client
        .update_item()
        .table_name(table)
        .set_key(Some(update.key))
        .update_expression(update.update_expression)
        .set_expression_attribute_names(Some(update.expression_attribute_names))
        .set_expression_attribute_values(Some(update.expression_attribute_values))
        .return_values(ReturnValue::UpdatedNew)
        .send()
        .await
        .context("failed to upsert episode into DynamoDB")?;

    tracing::trace!(attributes=?output.attributes, "updated episode attributes");

    Ok(())
}
