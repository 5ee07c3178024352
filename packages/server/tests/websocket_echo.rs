//! WebSocket echo integration tests.

mod fixtures;
use fixtures::TestServer;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

async fn next_message(ws: &mut WsStream) -> Message {
    tokio::time::timeout(std::time::Duration::from_secs(5), ws.next())
        .await
        .expect("Timed out waiting for a message")
        .expect("Stream ended")
        .expect("WebSocket error")
}

#[tokio::test]
async fn test_text_message_is_echoed() {
    // テスト項目: クライアントの挨拶メッセージがそのまま返される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws, _) = connect_async(server.ws_url()).await.unwrap();

    // when (操作):
    ws.send(Message::text("Hello from Rust client!"))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(
        next_message(&mut ws).await,
        Message::text("Hello from Rust client!")
    );
}

#[tokio::test]
async fn test_binary_message_is_echoed_byte_for_byte() {
    // テスト項目: バイナリメッセージがバイト単位で一致して返される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws, _) = connect_async(server.ws_url()).await.unwrap();
    let bytes: Vec<u8> = (0..=255).rev().collect();

    // when (操作):
    ws.send(Message::binary(bytes.clone())).await.unwrap();

    // then (期待する結果):
    assert_eq!(next_message(&mut ws).await, Message::binary(bytes));
}

#[tokio::test]
async fn test_echoes_preserve_order() {
    // テスト項目: 同じ接続のエコーは送信順に返される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut ws, _) = connect_async(server.ws_url()).await.unwrap();

    // when (操作):
    for i in 0..20 {
        ws.send(Message::text(format!("message {i}"))).await.unwrap();
    }

    // then (期待する結果):
    for i in 0..20 {
        assert_eq!(
            next_message(&mut ws).await,
            Message::text(format!("message {i}"))
        );
    }
}

#[tokio::test]
async fn test_echo_only_reaches_sender() {
    // テスト項目: エコーは送信元にだけ届き、他のクライアントには届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = connect_async(server.ws_url()).await.unwrap();
    let (mut bob, _) = connect_async(server.ws_url()).await.unwrap();

    // when (操作):
    alice.send(Message::text("from alice")).await.unwrap();
    bob.send(Message::text("from bob")).await.unwrap();

    // then (期待する結果): 各自が自分のメッセージだけを受け取る
    assert_eq!(next_message(&mut alice).await, Message::text("from alice"));
    assert_eq!(next_message(&mut bob).await, Message::text("from bob"));
}

#[tokio::test]
async fn test_active_count_follows_connects_and_closes() {
    // テスト項目: 3 クライアントが接続・切断すると接続数は 3 から 0 になる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut clients = Vec::new();
    for _ in 0..3 {
        let (ws, _) = connect_async(server.ws_url()).await.unwrap();
        clients.push(ws);
    }
    server.wait_for_active_connections(3).await;

    // when (操作): 1 つずつ切断
    let mut remaining = 3;
    for mut ws in clients {
        ws.close(None).await.unwrap();
        remaining -= 1;

        // then (期待する結果):
        server.wait_for_active_connections(remaining).await;
    }

    assert_eq!(server.active_connections().await, 0);
}

#[tokio::test]
async fn test_abrupt_disconnect_is_removed_from_set() {
    // テスト項目: Close フレーム無しで切断されても集合から削除される
    // given (前提条件):
    let server = TestServer::start().await;
    let (ws, _) = connect_async(server.ws_url()).await.unwrap();
    server.wait_for_active_connections(1).await;

    // when (操作):
    drop(ws);

    // then (期待する結果):
    server.wait_for_active_connections(0).await;
}
