//! [EpisodeRepo] backed by the DynamoDB episode table

use episode_db_client::EpisodeTable;

use crate::domain::{models::EpisodeMetadata, ports::EpisodeRepo};

#[derive(Debug, Clone)]
pub struct DynamodbEpisodeRepo {
    table: EpisodeTable,
}

impl DynamodbEpisodeRepo {
    pub fn new(table: EpisodeTable) -> Self {
        Self { table }
    }
}

impl EpisodeRepo for DynamodbEpisodeRepo {
    type Err = anyhow::Error;

    #[tracing::instrument(skip(self, metadata), fields(table = self.table.table(), episode_num = %metadata.episode_num))]
    async fn upsert_episode(&self, metadata: EpisodeMetadata) -> Result<(), Self::Err> {
        self.table
            .upsert_episode(
                metadata.episode_num.get(),
                &metadata.description,
                &metadata.pub_date,
            )
            .await
    }
}
