pub mod registry;

pub use registry::MetadataRegistry;
