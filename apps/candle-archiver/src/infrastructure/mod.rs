//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `marketdata/`: Exchange REST adapters (Binance)
//!   - `storage/`: Object store archive with Parquet encoding
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod config;
pub mod marketdata;
pub mod storage;
