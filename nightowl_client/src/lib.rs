pub mod composer;
pub mod timeline;
pub mod transport;
