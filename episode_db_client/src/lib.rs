use aws_config::SdkConfig;

mod upsert_episode;

pub use upsert_episode::{
    DESCRIPTION_ATTRIBUTE, EPISODE_NUM_ATTRIBUTE, EpisodeUpdate, PUB_DATE_ATTRIBUTE,
};

/// Client for the table holding one item per podcast episode
#[derive(Debug, Clone)]
pub struct EpisodeTable {
    table: String,
    client: aws_sdk_dynamodb::Client,
}

impl EpisodeTable {
    pub fn new(aws_config: &SdkConfig, table: impl Into<String>) -> Self {
        let client = aws_sdk_dynamodb::Client::new(aws_config);

        Self::new_from_client(client, table)
    }

    pub fn new_from_client(client: aws_sdk_dynamodb::Client, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            client,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Sets the description and pub date of an episode, creating the item if it does not exist.
    /// Any other attributes on an existing item are left untouched.
    #[tracing::instrument(skip(self, description))]
    pub async fn upsert_episode(
        &self,
        episode_num: u64,
        description: &str,
        pub_date: &str,
    ) -> anyhow::Result<()> {
        upsert_episode::upsert_episode(
            &self.client,
            &self.table,
            EpisodeUpdate::new(episode_num, description, pub_date),
        )
        .await
    }
}
