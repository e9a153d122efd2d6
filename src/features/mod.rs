pub mod download;
pub mod form;
pub mod service;
pub mod signature;
pub mod submit;
pub mod upload;
