pub mod security;

#[cfg(feature = "ssr")]
pub mod db;
