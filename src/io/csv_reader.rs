use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::{Stream, StreamExt};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::error::IoError;
use super::parse::CsvRecord;
use crate::domain::Account;
use crate::engine::TransferRequest;

/// Async stream of typed records from CSV input, one per row
pub struct CsvRecordStream<T>
where
    T: CsvRecord,
{
    inner: Pin<Box<dyn Stream<Item = Result<T, IoError>> + Send>>,
}

/// Stream of `account,currency,balance` rows
pub type AccountStream = CsvRecordStream<Account>;

/// Stream of `source,destination,currency,amount` rows
pub type TransferStream = CsvRecordStream<TransferRequest>;

impl<T> CsvRecordStream<T>
where
    T: CsvRecord,
{
    /// Create a new record stream from an async reader
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let csv_reader = AsyncReaderBuilder::new()
            .trim(csv_async::Trim::All)
            .flexible(true)
            .create_deserializer(reader);

        let stream = csv_reader
            .into_deserialize::<T::Raw>()
            .map(|result| result.map_err(IoError::from).and_then(T::parse));

        Self {
            inner: Box::pin(stream),
        }
    }

    /// Open a CSV file and stream its records
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self::new(file.compat()))
    }
}

impl<T> Stream for CsvRecordStream<T>
where
    T: CsvRecord,
{
    type Item = Result<T, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
