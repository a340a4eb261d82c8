//! Websocket transport for the channel server

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use shared::ORIGIN;
use crate::error::{TelegraphError, TelegraphResult};
use crate::traits::{ChannelDialer, MessageReceiver, MessageSender};
use crate::types::ChannelHalves;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Dials `ws://` channel URLs with tokio-tungstenite
#[derive(Debug, Clone, Default)]
pub struct WebSocketDialer;

impl WebSocketDialer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChannelDialer for WebSocketDialer {
    async fn dial(&self, url: &str) -> TelegraphResult<ChannelHalves> {
        let dial_error = |message: String| TelegraphError::Dial {
            url: url.to_string(),
            message,
        };

        let mut request = url.into_client_request().map_err(|e| dial_error(e.to_string()))?;
        request
            .headers_mut()
            .insert("Origin", HeaderValue::from_static(ORIGIN));

        let (stream, _response) = connect_async(request)
            .await
            .map_err(|e| dial_error(e.to_string()))?;
        let (sink, stream) = stream.split();

        Ok(ChannelHalves {
            sender: Box::new(WebSocketSender { sink }),
            receiver: Box::new(WebSocketReceiver { stream }),
        })
    }
}

pub struct WebSocketSender {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl MessageSender for WebSocketSender {
    async fn send(&mut self, text: String) -> TelegraphResult<()> {
        self.sink
            .send(Message::Text(text))
            .await
            .map_err(|e| TelegraphError::Send { message: e.to_string() })
    }
}

pub struct WebSocketReceiver {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl MessageReceiver for WebSocketReceiver {
    async fn recv(&mut self) -> Option<TelegraphResult<String>> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Binary(bytes)) => {
                    return Some(Ok(String::from_utf8_lossy(&bytes).into_owned()));
                }
                Ok(Message::Close(_)) => return None,
                // ping, pong and raw frames carry no tone
                Ok(_) => continue,
                Err(e) => return Some(Err(TelegraphError::Transport { message: e.to_string() })),
            }
        }
        None
    }
}
