#![allow(dead_code)]

use news_core::{Article, ArticleSource};

pub fn article(title: &str, source: &str, published_at: &str) -> Article {
    Article {
        source: Some(ArticleSource {
            id: None,
            name: Some(source.to_owned()),
        }),
        title: Some(title.to_owned()),
        url: Some(format!("https://example.com/{}", title.replace(' ', "-"))),
        published_at: Some(published_at.to_owned()),
        ..Default::default()
    }
}

/// `count` articles titled `a0`, `a1`, ... from Reuters.
pub fn numbered(count: usize) -> Vec<Article> {
    (0..count)
        .map(|i| article(&format!("a{i}"), "Reuters", "2024-11-01T10:00:00Z"))
        .collect()
}

pub fn titles(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(Article::title).collect()
}

/// Unique scratch directory under the system temp dir.
pub fn temp_dir(label: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "tesla_news_{}_{}_{}",
        label,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
