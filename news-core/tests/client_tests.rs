use news_core::{ArticleFeed, FetchError, LoadState, NewsView, ProxyClient, NEWS_PATH};
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_body() -> serde_json::Value {
    json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": { "id": "reuters", "name": "Reuters" },
                "author": "Jane Doe",
                "title": "Tesla opens new factory",
                "description": "Expansion in Texas",
                "url": "https://example.com/factory",
                "urlToImage": "https://example.com/factory.jpg",
                "publishedAt": "2024-11-04T09:12:00Z",
                "content": "Tesla said on Monday..."
            },
            {
                "source": { "id": null, "name": "CNBC" },
                "author": null,
                "title": "Tesla stock moves",
                "description": null,
                "url": "https://example.com/stock",
                "urlToImage": null,
                "publishedAt": "2024-11-03T18:00:00Z",
                "content": null
            }
        ]
    })
}

#[tokio::test]
async fn fetch_news_reads_articles_and_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .and(header("authorization", "Bearer 1234567890"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProxyClient::new(Client::new(), &server.uri())
        .unwrap()
        .with_bearer("1234567890");
    let news = client.fetch_news().await.unwrap();

    assert_eq!(news.articles.len(), 2);
    assert_eq!(news.total_results(), Some(2));
    assert_eq!(news.metadata["status"], "ok");

    let first = &news.articles[0];
    assert_eq!(first.source_name(), "Reuters");
    assert_eq!(first.image_url(), "https://example.com/factory.jpg");

    let second = &news.articles[1];
    assert_eq!(second.author, None);
    assert_eq!(second.description(), "");
    assert_eq!(second.image_url(), news_core::PLACEHOLDER_IMAGE);
}

#[tokio::test]
async fn proxy_failure_surfaces_as_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "success": false, "error": "Failed to fetch Tesla news" })),
        )
        .mount(&server)
        .await;

    let client = ProxyClient::new(Client::new(), &server.uri()).unwrap();
    match client.fetch_articles().await {
        Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn body_without_articles_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let client = ProxyClient::new(Client::new(), &server.uri()).unwrap();
    assert!(matches!(
        client.fetch_articles().await,
        Err(FetchError::Decode(_))
    ));
}

#[tokio::test]
async fn view_activation_against_the_proxy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProxyClient::new(Client::new(), &server.uri()).unwrap();
    let mut view = NewsView::new();
    view.activate(&client).await;
    view.activate(&client).await;

    assert_eq!(view.state(), &LoadState::Ready);
    view.set_source("CNBC");
    assert_eq!(view.result_count(), 1);
    view.set_source("All");
    view.set_keyword("texas");
    assert_eq!(view.result_count(), 1);
}

#[test]
fn endpoint_is_joined_onto_the_base_url() {
    let client = ProxyClient::new(Client::new(), "http://localhost:5001").unwrap();
    assert_eq!(client.endpoint().as_str(), "http://localhost:5001/api/tesla-news");
    assert!(matches!(
        ProxyClient::new(Client::new(), "not a url"),
        Err(FetchError::Url(_))
    ));
}
