use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use movie_ingest_core::contract::PARTITION_KEY;
use movie_ingest_core::{MovieInfo, MovieRecord};

use crate::adapters::movie_table::MovieTable;

pub type Item = HashMap<String, AttributeValue>;

#[derive(Clone)]
pub struct DynamoMovieTable {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoMovieTable {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            dynamodb_client,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl MovieTable for DynamoMovieTable {
    fn put_movie(&self, record: &MovieRecord) -> Result<(), String> {
        let table_name = self.table_name.clone();
        let item = movie_item(record);
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put item into dynamodb: {error}"))
            })
        })
    }

    fn get_movie(&self, movie_name: &str) -> Result<Option<MovieRecord>, String> {
        let table_name = self.table_name.clone();
        let key = AttributeValue::S(movie_name.to_string());
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_item()
                    .table_name(table_name)
                    .key(PARTITION_KEY, key)
                    .consistent_read(true)
                    .send()
                    .await
                    .map_err(|error| format!("failed to get item from dynamodb: {error}"))?;

                output.item().map(record_from_item).transpose()
            })
        })
    }
}

/// `{movieName: S, title: S, info: M{plot: S, rating: S}}`
pub fn movie_item(record: &MovieRecord) -> Item {
    let info = HashMap::from([
        (
            "plot".to_string(),
            AttributeValue::S(record.info.plot.clone()),
        ),
        (
            "rating".to_string(),
            AttributeValue::S(record.info.rating.clone()),
        ),
    ]);

    HashMap::from([
        (
            PARTITION_KEY.to_string(),
            AttributeValue::S(record.movie_name.clone()),
        ),
        ("title".to_string(), AttributeValue::S(record.title.clone())),
        ("info".to_string(), AttributeValue::M(info)),
    ])
}

pub fn record_from_item(item: &Item) -> Result<MovieRecord, String> {
    let info = item
        .get("info")
        .and_then(|value| value.as_m().ok())
        .ok_or_else(|| "item is missing map attribute 'info'".to_string())?;

    Ok(MovieRecord {
        movie_name: string_attribute(item, PARTITION_KEY)?,
        title: string_attribute(item, "title")?,
        info: MovieInfo {
            plot: string_attribute(info, "plot")?,
            rating: string_attribute(info, "rating")?,
        },
    })
}

fn string_attribute(item: &Item, name: &str) -> Result<String, String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| format!("item is missing string attribute '{name}'"))
}
