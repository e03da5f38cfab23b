use movie_ingest_core::MovieRecord;

/// Key-value table holding one item per `movieName`.
pub trait MovieTable {
    /// Upsert: replaces any existing item with the same partition key.
    fn put_movie(&self, record: &MovieRecord) -> Result<(), String>;

    fn get_movie(&self, movie_name: &str) -> Result<Option<MovieRecord>, String>;
}
