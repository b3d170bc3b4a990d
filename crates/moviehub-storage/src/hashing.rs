//! A pass-through stream that computes a SHA-256 digest of everything it yields.

use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;
use sha2::{Digest, Sha256};
use tokio::sync::oneshot;

/// Digest and length of a fully consumed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    /// Lowercase hex SHA-256.
    pub hash: String,
    /// Total number of bytes seen.
    pub size: u64,
}

pin_project! {
    /// Wraps a byte stream and reports its [`ContentDigest`] once the inner
    /// stream is exhausted.
    ///
    /// The digest is only sent on clean end of stream. If the stream errors
    /// or is dropped early, the receiver observes a closed channel.
    pub struct HashingStream<S> {
        #[pin]
        inner: S,
        hasher: Sha256,
        size: u64,
        report: Option<oneshot::Sender<ContentDigest>>,
    }
}

impl<S> HashingStream<S> {
    /// Wrap `inner`, returning the stream and the receiving end of its digest.
    pub fn new(inner: S) -> (Self, oneshot::Receiver<ContentDigest>) {
        let (tx, rx) = oneshot::channel();
        let stream = Self {
            inner,
            hasher: Sha256::new(),
            size: 0,
            report: Some(tx),
        };
        (stream, rx)
    }
}

impl<S> Stream for HashingStream<S>
where
    S: Stream<Item = Result<Bytes, std::io::Error>>,
{
    type Item = Result<Bytes, std::io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match ready!(this.inner.poll_next(cx)) {
            Some(Ok(chunk)) => {
                this.hasher.update(&chunk);
                *this.size += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Some(Err(e)) => {
                // an errored upload must never produce a digest
                this.report.take();
                Poll::Ready(Some(Err(e)))
            }
            None => {
                if let Some(tx) = this.report.take() {
                    let digest = ContentDigest {
                        hash: hex::encode(this.hasher.finalize_reset()),
                        size: *this.size,
                    };
                    let _ = tx.send(digest);
                }
                Poll::Ready(None)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_digest_matches_sha256_of_concatenated_chunks() {
        let chunks = vec![Ok(Bytes::from_static(b"hel")), Ok(Bytes::from_static(b"lo"))];
        let (stream, rx) = HashingStream::new(futures::stream::iter(chunks));

        let passed: Vec<Bytes> = stream.map(|c| c.unwrap()).collect().await;
        assert_eq!(passed.concat(), b"hello");

        let digest = rx.await.unwrap();
        assert_eq!(
            digest.hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(digest.size, 5);
    }

    #[tokio::test]
    async fn test_empty_stream_has_digest() {
        let (stream, rx) = HashingStream::new(futures::stream::empty::<Result<Bytes, std::io::Error>>());
        assert_eq!(stream.count().await, 0);

        let digest = rx.await.unwrap();
        assert_eq!(
            digest.hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(digest.size, 0);
    }

    #[tokio::test]
    async fn test_error_suppresses_digest() {
        let chunks = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("connection reset")),
        ];
        let (stream, rx) = HashingStream::new(futures::stream::iter(chunks));
        let _ = stream.collect::<Vec<_>>().await;

        assert!(rx.await.is_err());
    }
}
