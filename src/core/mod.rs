pub mod batch;
pub mod direct_downloader;
pub mod events;
pub mod filename;
pub mod http_client;
pub mod normalizer;
pub mod pipeline;
pub mod registry;
pub mod resolver;
