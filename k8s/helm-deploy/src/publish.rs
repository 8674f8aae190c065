/// Contains the bucket abstraction and its object_store backed implementation.
pub mod bucket;

/// Contains the layout of chart archive keys in the bucket.
pub mod key;

/// Packaging, upload, download and extraction of chart archives.
pub mod publisher;
