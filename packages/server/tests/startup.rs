//! Server startup integration tests.

use std::time::Duration;

use tokio::net::TcpListener;
use wsecho_server::{ServerConfig, ServerError, run_server};
use wsecho_shared::{EXIT_FAILURE, exit_code};

#[tokio::test]
async fn test_bind_failure_is_fatal() {
    // テスト項目: ポートが使用中なら起動に失敗し、終了コード 1 になる
    // given (前提条件):
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
        shutdown_grace: Duration::from_millis(50),
    };

    // when (操作):
    let result = tokio::time::timeout(Duration::from_secs(5), run_server(config))
        .await
        .expect("Startup should fail immediately");

    // then (期待する結果):
    assert!(matches!(result, Err(ServerError::Bind { .. })));
    assert_eq!(exit_code(&result), EXIT_FAILURE);
}
