// Command handling layer
pub mod config; // Configuration management
pub mod crud; // Add, edit and delete handlers
pub mod menu; // Interactive menu loop
pub mod query; // Report rendering
