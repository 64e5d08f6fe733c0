pub mod article;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod session;
pub mod storage;
pub mod view;

pub use article::{Article, ArticleSource, NewsResponse, PLACEHOLDER_IMAGE};
pub use client::{ArticleFeed, ProxyClient, NEWS_PATH};
pub use config::{config_dir, ClientConfig, PortalConfig, ProxyConfig};
pub use error::{ConfigError, FetchError, SessionError};
pub use filter::{apply_filters, DateWindow, FilterCriteria, ALL_SOURCES, KNOWN_SOURCES};
pub use pagination::{paginate, Page, PAGE_SIZE};
pub use session::{Identity, Session, SessionState, USER_KEY};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use view::{LoadState, NewsView, FETCH_FAILED_MESSAGE};
