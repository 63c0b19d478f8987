//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Document store handle (PostgreSQL JSONB or in-process memory)
//! - Password hashing (Argon2id, configurable policy)
//! - Cookie management
//! - Cryptographic helpers (random secrets, Base64)

pub mod cookie;
pub mod crypto;
pub mod docstore;
pub mod password;
