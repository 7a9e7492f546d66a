//! Shell-first streaming sink.

use std::fmt::Display;

use futures::{Sink, SinkExt};
use herbal_core::RenderError;

use crate::slots::fill_slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkState {
    Initial,
    ShellSent,
    Completed,
}

/// Streaming sink that enforces shell, then fills, then completion.
///
/// Generic over any `Sink<Vec<u8>>`, including Spin's `OutgoingBody` and a
/// plain `Vec<Vec<u8>>` in tests.
pub struct StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    inner: S,
    state: SinkState,
    sections_sent: Vec<String>,
}

impl<S, E> StreamingSink<S, E>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    pub fn new(sink: S) -> Self {
        Self {
            inner: sink,
            state: SinkState::Initial,
            sections_sent: Vec::new(),
        }
    }

    /// Send the shell. Must come first and only once.
    pub async fn send_shell(&mut self, html: &str) -> Result<(), RenderError> {
        if self.state != SinkState::Initial {
            return Err(RenderError::StreamError(
                "Shell already sent or sink completed".to_string(),
            ));
        }

        self.write(html.as_bytes().to_vec()).await?;
        self.state = SinkState::ShellSent;

        Ok(())
    }

    /// Stream a fill chunk for the named slot.
    ///
    /// Returns the number of bytes written.
    pub async fn send_fill(&mut self, name: &str, html: &str) -> Result<usize, RenderError> {
        self.ensure_open()?;

        let chunk = fill_slot(name, html).into_bytes();
        let bytes = chunk.len();
        self.write(chunk).await?;
        self.sections_sent.push(name.to_string());

        Ok(bytes)
    }

    /// Send the closing markup and close the underlying sink.
    pub async fn complete(&mut self, closing: &str) -> Result<(), RenderError> {
        self.ensure_open()?;
        self.write(closing.as_bytes().to_vec()).await?;
        self.inner
            .close()
            .await
            .map_err(|e| RenderError::StreamError(e.to_string()))?;

        self.state = SinkState::Completed;
        Ok(())
    }

    /// Slot names filled so far, in send order.
    pub fn sections_sent(&self) -> &[String] {
        &self.sections_sent
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn ensure_open(&self) -> Result<(), RenderError> {
        match self.state {
            SinkState::Initial => Err(RenderError::ShellNotSent),
            SinkState::Completed => Err(RenderError::StreamError(
                "Sink already completed".to_string(),
            )),
            SinkState::ShellSent => Ok(()),
        }
    }

    async fn write(&mut self, bytes: Vec<u8>) -> Result<(), RenderError> {
        self.inner
            .send(bytes)
            .await
            .map_err(|e| RenderError::StreamError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink() -> StreamingSink<Vec<Vec<u8>>, std::convert::Infallible> {
        StreamingSink::new(Vec::new())
    }

    fn chunks(sink: StreamingSink<Vec<Vec<u8>>, std::convert::Infallible>) -> Vec<String> {
        sink.into_inner()
            .into_iter()
            .map(|c| String::from_utf8(c).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_fill_before_shell_is_rejected() {
        let mut sink = sink();
        let err = sink.send_fill("products", "<p></p>").await.unwrap_err();
        assert!(matches!(err, RenderError::ShellNotSent));
        assert!(chunks(sink).is_empty());
    }

    #[tokio::test]
    async fn test_shell_then_fills_in_send_order() {
        let mut sink = sink();
        sink.send_shell("<html>").await.unwrap();

        sink.send_fill("offers", "<ul></ul>").await.unwrap();
        let bytes = sink.send_fill("banners", "").await.unwrap();
        assert_eq!(bytes, fill_slot("banners", "").len());
        assert_eq!(sink.sections_sent(), ["offers", "banners"]);

        sink.complete("</html>").await.unwrap();

        let out = chunks(sink);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], "<html>");
        assert!(out[1].starts_with(r#"<template data-fill="offers">"#));
        assert!(out[2].starts_with(r#"<template data-fill="banners">"#));
        assert_eq!(out[3], "</html>");
    }

    #[tokio::test]
    async fn test_shell_only_once() {
        let mut sink = sink();
        sink.send_shell("a").await.unwrap();
        assert!(sink.send_shell("b").await.is_err());
    }

    #[tokio::test]
    async fn test_nothing_after_completion() {
        let mut sink = sink();
        sink.send_shell("a").await.unwrap();
        sink.complete("z").await.unwrap();

        assert!(matches!(
            sink.send_fill("offers", "").await,
            Err(RenderError::StreamError(_))
        ));
        assert!(sink.complete("z").await.is_err());
    }
}
