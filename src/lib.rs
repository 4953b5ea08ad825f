//! portkey-mcp: the Portkey admin and prompt-management API as an MCP server.
//!
//! The same tool catalog is served over stdio (one implicit session) or over
//! streamable HTTP, where [`session`] tracks every client session, expires
//! idle ones and closes them all on shutdown.

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod mcp;
pub mod portkey;
pub mod session;
