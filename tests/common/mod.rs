use axum::Router;
use hn_digest::domain::{ConfigBundle, Provider};

/// Serve `app` on an ephemeral loopback port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn bundle(endpoint_url: String, proxy_url_prefix: String) -> ConfigBundle {
    ConfigBundle {
        endpoint_url,
        api_key: "sk-test".to_string(),
        model_name: "test-model".to_string(),
        system_prompt: "Summarize for engineers.".to_string(),
        proxy_url_prefix,
        provider: Provider::ChatCompletions,
    }
}
