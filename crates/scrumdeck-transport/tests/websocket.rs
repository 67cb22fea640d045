//! Integration tests for the WebSocket transport.
//!
//! These spin up a real listener and drive it with tokio-tungstenite
//! clients to verify the upgrade handshake, parameter capture, and
//! byte flow in both directions.

#[cfg(feature = "websocket")]
mod websocket {
    use scrumdeck_transport::{Connection, Transport, WebSocketTransport};
    use tokio_tungstenite::tungstenite;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Binds a transport on a random port and returns it with its address.
    async fn bind() -> (WebSocketTransport, String) {
        let transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("should have addr").to_string();
        (transport, addr)
    }

    async fn connect_client(addr: &str, path_and_query: &str) -> ClientWs {
        let url = format!("ws://{addr}{path_and_query}");
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("client should connect");
        ws
    }

    #[tokio::test]
    async fn test_accept_captures_connect_params() {
        let (mut transport, addr) = bind().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });
        let _client =
            connect_client(&addr, "/rooms/sprint-42?id=ana&spectator=true")
                .await;

        let conn = server_handle.await.expect("task should complete");
        assert!(conn.id().into_inner() > 0);
        assert_eq!(conn.params().room, "sprint-42");
        assert_eq!(conn.params().participant, "ana");
        assert!(conn.params().spectator);
    }

    #[tokio::test]
    async fn test_accept_rejects_missing_id_with_400() {
        let (mut transport, addr) = bind().await;

        let server_handle =
            tokio::spawn(async move { transport.accept().await });

        let url = format!("ws://{addr}/rooms/sprint-42");
        let result = tokio_tungstenite::connect_async(&url).await;
        match result {
            Err(tungstenite::Error::Http(response)) => {
                assert_eq!(response.status(), 400);
            }
            other => panic!("expected HTTP 400 rejection, got {other:?}"),
        }

        // The server side surfaces the refusal as an accept error.
        assert!(server_handle.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_accept_rejects_bad_path_with_400() {
        let (mut transport, addr) = bind().await;

        let server_handle =
            tokio::spawn(async move { transport.accept().await });

        let url = format!("ws://{addr}/lobby?id=ana");
        let result = tokio_tungstenite::connect_async(&url).await;
        assert!(matches!(
            result,
            Err(tungstenite::Error::Http(response)) if response.status() == 400
        ));
        assert!(server_handle.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn test_send_and_receive() {
        let (mut transport, addr) = bind().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });
        let mut client = connect_client(&addr, "/rooms/alpha?id=ana").await;
        let conn = server_handle.await.expect("task should complete");

        // Server sends, client receives.
        conn.send(b"hello client").await.expect("send should succeed");
        use futures_util::StreamExt;
        let msg = client.next().await.unwrap().unwrap();
        assert_eq!(msg.into_data().as_ref(), b"hello client");

        // Client sends text, server receives bytes.
        use futures_util::SinkExt;
        client
            .send(tungstenite::Message::Text("hello server".into()))
            .await
            .unwrap();
        let received = conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, b"hello server");

        conn.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_send_completes_while_recv_pending() {
        use std::sync::Arc;
        use std::time::Duration;

        let (mut transport, addr) = bind().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });
        let mut client = connect_client(&addr, "/rooms/alpha?id=ana").await;
        let conn = Arc::new(server_handle.await.unwrap());

        // Park a reader on the idle socket, as the per-connection read
        // loop does while a client sits quietly in a room.
        let reader_conn = conn.clone();
        let reader = tokio::spawn(async move { reader_conn.recv().await });
        tokio::time::sleep(Duration::from_millis(50)).await;

        // A broadcast push must still go through.
        tokio::time::timeout(Duration::from_secs(1), conn.send(b"ping"))
            .await
            .expect("send should not wait on the pending recv")
            .expect("send should succeed");

        use futures_util::{SinkExt, StreamExt};
        let msg = client.next().await.unwrap().unwrap();
        assert_eq!(msg.into_data().as_ref(), b"ping");

        client
            .send(tungstenite::Message::Text("pong".into()))
            .await
            .unwrap();
        let received = reader
            .await
            .expect("reader task should complete")
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, b"pong");
    }

    #[tokio::test]
    async fn test_recv_returns_none_on_client_close() {
        let (mut transport, addr) = bind().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });
        let mut client = connect_client(&addr, "/rooms/alpha?id=ana").await;
        let conn = server_handle.await.unwrap();

        use futures_util::SinkExt;
        client
            .send(tungstenite::Message::Close(None))
            .await
            .unwrap();

        let result = conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }
}
