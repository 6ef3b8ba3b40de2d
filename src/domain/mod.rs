//! Domain Layer
//!
//! Pure rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Lock tree nodes and the sanitize transform
//! - `value_objects/` - Spawn specs, platform capabilities
//! - `ports/` - Interfaces for notifications, package managers and test runners
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or processes directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;
