pub mod client;
pub mod image;

pub use client::OpenAiHttpClient;
pub use image::DalleImageClient;
