//! gRPC clients for calling the directory service.

mod directory_client;

pub use directory_client::DirectoryClient;
