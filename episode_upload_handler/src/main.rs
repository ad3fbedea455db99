#![recursion_limit = "256"]

use anyhow::Context;
use episode_db_client::EpisodeTable;
use episode_upload_handler::{
    config::{Config, load_aws_config},
    domain::service::EpisodeUploadImpl,
    inbound::lambda::handler,
    outbound::{dynamodb_episode_repo::DynamodbEpisodeRepo, s3_upload_signer::S3UploadSigner},
};
use lambda_http::{Error, Request, run, service_fn};
use media_s3_client::MediaS3;

#[tokio::main]
async fn main() -> Result<(), Error> {
    podcast_entrypoint::load_dotenv();

    let config = Config::from_env()?;

    podcast_entrypoint::init_tracing(config.environment.into());

    tracing::trace!(config=?config, "initialized config");

    let aws_config = load_aws_config().await;

    let episodes = DynamodbEpisodeRepo::new(EpisodeTable::new(
        &aws_config,
        config.episode_table_name.as_str(),
    ));
    let signer = S3UploadSigner::new(
        MediaS3::new(&aws_config).context("could not build media s3 client")?,
        &config.media_bucket,
    );

    tracing::trace!("initialized aws clients");

    let verbose = config.verbose;
    let service = &EpisodeUploadImpl::new(episodes, signer, config.user_password);

    let func = service_fn(move |event: Request| async move { handler(service, verbose, event).await });

    run(func).await
}
