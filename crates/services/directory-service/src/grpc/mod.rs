//! gRPC layer.

mod directory_grpc;

pub use directory_grpc::DirectoryGrpcService;
